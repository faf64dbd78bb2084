//! Instanced ornaments
//!
//! Attributes are drawn once at construction. Each frame every instance
//! steps its owned state toward the destination of the current mode and
//! the derived transforms are packed per kind for instanced drawing.

mod kind;
mod motion;
mod placement;

pub use kind::OrnamentKind;
pub use motion::{
    step, transform, OrnamentState, Transform, BOB_AMPLITUDE, GIFT_SPIN, LIGHT_PULSE, SETTLE_DISTANCE,
};
pub use placement::{generate, Ornament, OrnamentParams};

use rand::Rng;

use crate::animation::{FrameTick, TreeMode};

pub struct OrnamentSystem {
    ornaments: Vec<Ornament>,
    states: Vec<OrnamentState>,
    transforms: Vec<Transform>,
    /// Instance indices grouped by `OrnamentKind::index`
    batches: [Vec<usize>; 3],
}

impl OrnamentSystem {
    pub fn new<R: Rng + ?Sized>(params: &OrnamentParams, rng: &mut R) -> Self {
        let ornaments = generate(params, rng);
        let states: Vec<OrnamentState> = ornaments.iter().map(OrnamentState::initial).collect();
        let transforms = ornaments
            .iter()
            .zip(&states)
            .map(|(o, s)| transform(o, s, 0.0, TreeMode::Chaos))
            .collect();

        let mut batches: [Vec<usize>; 3] = Default::default();
        for (i, o) in ornaments.iter().enumerate() {
            batches[o.kind.index()].push(i);
        }

        Self {
            ornaments,
            states,
            transforms,
            batches,
        }
    }

    /// Step every instance and refresh the derived transforms
    pub fn update(&mut self, tick: FrameTick, mode: TreeMode) {
        for ((ornament, state), out) in self
            .ornaments
            .iter()
            .zip(self.states.iter_mut())
            .zip(self.transforms.iter_mut())
        {
            *state = step(ornament, state, tick, mode);
            *out = transform(ornament, state, tick.elapsed, mode);
        }
    }

    pub fn ornaments(&self) -> &[Ornament] {
        &self.ornaments
    }

    pub fn states(&self) -> &[OrnamentState] {
        &self.states
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn len(&self) -> usize {
        self.ornaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ornaments.is_empty()
    }

    pub fn count_of(&self, kind: OrnamentKind) -> usize {
        self.batches[kind.index()].len()
    }

    /// Column-major instance matrices for one kind, 16 floats each.
    /// Reuses `out` so the per-frame upload doesn't allocate.
    pub fn fill_matrix_data(&self, kind: OrnamentKind, out: &mut Vec<f32>) {
        out.clear();
        for &i in &self.batches[kind.index()] {
            out.extend_from_slice(self.transforms[i].matrix().as_slice());
        }
    }

    /// Instance colors for one kind, 3 floats each. Fixed for the
    /// lifetime of the system.
    pub fn color_data(&self, kind: OrnamentKind) -> Vec<f32> {
        self.batches[kind.index()]
            .iter()
            .flat_map(|&i| self.ornaments[i].color.to_array())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn system(count: usize) -> OrnamentSystem {
        let params = OrnamentParams {
            count,
            ..Default::default()
        };
        OrnamentSystem::new(&params, &mut SmallRng::seed_from_u64(21))
    }

    fn run(system: &mut OrnamentSystem, frames: usize, mode: TreeMode) -> f32 {
        let dt = 1.0 / 60.0;
        let mut elapsed = 0.0;
        for _ in 0..frames {
            elapsed += dt;
            system.update(FrameTick::new(elapsed, dt), mode);
        }
        elapsed
    }

    #[test]
    fn test_batches_cover_every_instance() {
        let ornaments = system(300);
        let total: usize = OrnamentKind::ALL.iter().map(|&k| ornaments.count_of(k)).sum();
        assert_eq!(total, 300);
        for kind in OrnamentKind::ALL {
            assert_eq!(ornaments.color_data(kind).len(), ornaments.count_of(kind) * 3);
        }
    }

    #[test]
    fn test_matrix_data_reuses_buffer() {
        let ornaments = system(100);
        let mut data = vec![1.0; 7];
        ornaments.fill_matrix_data(OrnamentKind::Ball, &mut data);
        assert_eq!(data.len(), ornaments.count_of(OrnamentKind::Ball) * 16);
    }

    #[test]
    fn test_zero_delta_double_update_is_idempotent() {
        let mut ornaments = system(100);
        let elapsed = run(&mut ornaments, 120, TreeMode::Formed);
        let tick = FrameTick::new(elapsed, 0.0);

        ornaments.update(tick, TreeMode::Formed);
        let first = ornaments.transforms().to_vec();
        ornaments.update(tick, TreeMode::Formed);
        assert_eq!(ornaments.transforms(), &first[..]);
    }

    #[test]
    fn test_formed_600_frames_stay_finite() {
        let mut ornaments = system(100);
        run(&mut ornaments, 600, TreeMode::Formed);
        let mut data = Vec::new();
        for t in ornaments.transforms() {
            assert!(t.is_finite());
            assert!(t.matrix().is_finite());
        }
        for kind in OrnamentKind::ALL {
            ornaments.fill_matrix_data(kind, &mut data);
            assert!(data.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_converges_to_targets() {
        let mut ornaments = system(100);
        // Slowest speed 0.6/s: 20 s leaves (1 - 0.01)^1200 of the distance
        run(&mut ornaments, 1200, TreeMode::Formed);
        for (o, s) in ornaments.ornaments().iter().zip(ornaments.states()) {
            assert!(s.position.distance(&o.target) < 0.01);
        }
    }

    #[test]
    fn test_returns_to_chaos() {
        let mut ornaments = system(50);
        run(&mut ornaments, 600, TreeMode::Formed);
        run(&mut ornaments, 1200, TreeMode::Chaos);
        for (o, s) in ornaments.ornaments().iter().zip(ornaments.states()) {
            assert!(s.position.distance(&o.chaos) < 0.05);
        }
    }

    #[test]
    fn test_colors_are_fixed() {
        let mut ornaments = system(60);
        let before = ornaments.color_data(OrnamentKind::Light);
        run(&mut ornaments, 60, TreeMode::Formed);
        assert_eq!(ornaments.color_data(OrnamentKind::Light), before);
    }
}
