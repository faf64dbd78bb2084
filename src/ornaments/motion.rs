//! Per-frame ornament motion
//!
//! Each instance owns an [`OrnamentState`]; [`step`] produces the next state
//! from the current one and [`transform`] derives what gets drawn. Neither
//! touches anything but its arguments.

use std::f32::consts::TAU;

use super::kind::OrnamentKind;
use super::placement::Ornament;
use crate::animation::{FrameTick, TreeMode};
use crate::math::{Mat4, Vec3};

/// Distance to the formed target below which an ornament idles
pub const SETTLE_DISTANCE: f32 = 0.5;
pub const BOB_AMPLITUDE: f32 = 0.08;
pub const BOB_FREQUENCY: f32 = 2.0;
/// Relative scale swing of a breathing light
pub const LIGHT_PULSE: f32 = 0.3;
pub const LIGHT_PULSE_FREQUENCY: f32 = 4.0;
/// Gift spin rates around X and Y (rad/s)
pub const GIFT_SPIN: Vec3 = Vec3::new(0.6, 0.9, 0.0);

/// Mutable per-instance state carried between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentState {
    pub position: Vec3,
    /// XYZ Euler angles
    pub rotation: Vec3,
}

impl OrnamentState {
    /// Resting state at the scattered position
    pub fn initial(ornament: &Ornament) -> Self {
        let rotation = match ornament.kind {
            OrnamentKind::Gift => Vec3::new(ornament.rotation_offset, ornament.rotation_offset, 0.0),
            OrnamentKind::Ball | OrnamentKind::Light => facing_away(ornament.chaos),
        };
        Self {
            position: ornament.chaos,
            rotation,
        }
    }
}

/// What actually gets drawn for an instance this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_trs(self.position, self.rotation, self.scale)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

/// Advance one instance by one frame
///
/// The lerp factor is the raw `speed * delta`, so convergence depends on
/// frame rate; it is clamped to 1 so long frames land on the target instead
/// of overshooting. A negative or non-finite delta holds the state.
pub fn step(ornament: &Ornament, state: &OrnamentState, tick: FrameTick, mode: TreeMode) -> OrnamentState {
    let destination = mode.select(ornament.chaos, ornament.target);
    let delta = tick.step_delta();
    let alpha = (ornament.speed * delta).clamp(0.0, 1.0);
    let position = state.position.lerp(&destination, alpha);

    let rotation = match ornament.kind {
        OrnamentKind::Gift => {
            let spun = state.rotation + GIFT_SPIN.scale(delta);
            Vec3::new(spun.x.rem_euclid(TAU), spun.y.rem_euclid(TAU), spun.z)
        }
        OrnamentKind::Ball | OrnamentKind::Light => facing_away(position),
    };

    OrnamentState { position, rotation }
}

/// Derive the drawn transform: idle bob near the formed target and
/// breathing scale for lights
pub fn transform(ornament: &Ornament, state: &OrnamentState, time: f32, mode: TreeMode) -> Transform {
    let mut position = state.position;
    if mode.is_formed() && state.position.distance(&ornament.target) < SETTLE_DISTANCE {
        position.y += (time * BOB_FREQUENCY + ornament.rotation_offset).sin() * BOB_AMPLITUDE;
    }

    let scale = match ornament.kind {
        OrnamentKind::Light => {
            let pulse = (time * LIGHT_PULSE_FREQUENCY + ornament.rotation_offset).sin();
            ornament.scale * (1.0 + LIGHT_PULSE * pulse)
        }
        OrnamentKind::Ball | OrnamentKind::Gift => ornament.scale,
    };

    Transform {
        position,
        rotation: state.rotation,
        scale: Vec3::splat(scale),
    }
}

/// Yaw that turns local +Z away from the tree's vertical axis
fn facing_away(position: Vec3) -> Vec3 {
    Vec3::new(0.0, position.x.atan2(position.z), 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ornament(kind: OrnamentKind) -> Ornament {
        Ornament {
            kind,
            chaos: Vec3::new(0.0, 25.0, 20.0),
            target: Vec3::new(3.0, 2.0, 0.0),
            color: Vec3::ONE,
            scale: 0.3,
            speed: 1.2,
            rotation_offset: 0.7,
        }
    }

    #[test]
    fn test_step_moves_toward_destination() {
        let o = ornament(OrnamentKind::Ball);
        let state = OrnamentState::initial(&o);
        let next = step(&o, &state, FrameTick::new(0.1, 0.1), TreeMode::Formed);
        assert!(next.position.distance(&o.target) < state.position.distance(&o.target));

        let back = step(&o, &next, FrameTick::new(0.2, 0.1), TreeMode::Chaos);
        assert!(back.position.distance(&o.chaos) < next.position.distance(&o.chaos));
    }

    #[test]
    fn test_long_frame_lands_on_target() {
        let o = ornament(OrnamentKind::Ball);
        let state = OrnamentState::initial(&o);
        let next = step(&o, &state, FrameTick::new(5.0, 5.0), TreeMode::Formed);
        assert_eq!(next.position, o.target);
    }

    #[test]
    fn test_zero_delta_is_idempotent() {
        for kind in OrnamentKind::ALL {
            let o = ornament(kind);
            let mut state = OrnamentState::initial(&o);
            for i in 1..30 {
                state = step(&o, &state, FrameTick::new(i as f32 / 30.0, 1.0 / 30.0), TreeMode::Formed);
            }
            let tick = FrameTick::new(1.0, 0.0);
            let once = step(&o, &state, tick, TreeMode::Formed);
            let twice = step(&o, &once, tick, TreeMode::Formed);
            assert_eq!(once, state);
            assert_eq!(twice, state);
            assert_eq!(
                transform(&o, &once, tick.elapsed, TreeMode::Formed),
                transform(&o, &twice, tick.elapsed, TreeMode::Formed),
            );
        }
    }

    #[test]
    fn test_gift_spins_on_two_axes() {
        let o = ornament(OrnamentKind::Gift);
        let state = OrnamentState::initial(&o);
        let next = step(&o, &state, FrameTick::new(0.5, 0.5), TreeMode::Formed);
        assert!((next.rotation.x - (state.rotation.x + GIFT_SPIN.x * 0.5)).abs() < 0.0001);
        assert!((next.rotation.y - (state.rotation.y + GIFT_SPIN.y * 0.5)).abs() < 0.0001);
        assert_eq!(next.rotation.z, state.rotation.z);
    }

    #[test]
    fn test_ball_faces_away_from_axis() {
        let o = ornament(OrnamentKind::Ball);
        let state = OrnamentState {
            position: Vec3::new(2.0, 4.0, 0.0),
            rotation: Vec3::ZERO,
        };
        let next = step(&o, &state, FrameTick::new(0.0, 0.0), TreeMode::Formed);
        let forward = Mat4::from_euler(next.rotation).transform_point(Vec3::new(0.0, 0.0, 1.0));
        assert!((forward.x - 1.0).abs() < 0.0001);
        assert!(forward.z.abs() < 0.0001);
    }

    #[test]
    fn test_bob_only_when_settled_and_formed() {
        let o = ornament(OrnamentKind::Ball);
        let settled = OrnamentState {
            position: o.target,
            rotation: Vec3::ZERO,
        };
        let time = 0.4;
        let bobbing = transform(&o, &settled, time, TreeMode::Formed);
        let expected = o.target.y + (time * BOB_FREQUENCY + o.rotation_offset).sin() * BOB_AMPLITUDE;
        assert!((bobbing.position.y - expected).abs() < 0.0001);

        let scattered = transform(&o, &settled, time, TreeMode::Chaos);
        assert_eq!(scattered.position, o.target);

        let far = OrnamentState {
            position: o.target + Vec3::new(0.0, 0.0, 1.0),
            rotation: Vec3::ZERO,
        };
        assert_eq!(transform(&o, &far, time, TreeMode::Formed).position, far.position);
    }

    #[test]
    fn test_light_pulses_others_do_not() {
        let light = ornament(OrnamentKind::Light);
        let state = OrnamentState::initial(&light);
        let scales: Vec<f32> = (0..20)
            .map(|i| transform(&light, &state, i as f32 * 0.1, TreeMode::Formed).scale.x)
            .collect();
        let min = scales.iter().cloned().fold(f32::MAX, f32::min);
        let max = scales.iter().cloned().fold(f32::MIN, f32::max);
        assert!(max - min > 0.05);
        assert!(min >= light.scale * (1.0 - LIGHT_PULSE) - 0.0001);

        let gift = ornament(OrnamentKind::Gift);
        let state = OrnamentState::initial(&gift);
        for i in 0..20 {
            assert_eq!(transform(&gift, &state, i as f32 * 0.1, TreeMode::Formed).scale, Vec3::splat(0.3));
        }
    }

    #[test]
    fn test_bad_delta_holds_state() {
        for kind in OrnamentKind::ALL {
            let o = ornament(kind);
            let state = step(&o, &OrnamentState::initial(&o), FrameTick::new(0.1, 0.1), TreeMode::Formed);
            for delta in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -0.5] {
                let next = step(&o, &state, FrameTick::new(0.2, delta), TreeMode::Formed);
                assert_eq!(next, state, "{:?} delta {}", kind, delta);
            }
        }
    }

    #[test]
    fn test_on_axis_position_is_finite() {
        let o = ornament(OrnamentKind::Light);
        let state = OrnamentState {
            position: Vec3::new(0.0, 3.0, 0.0),
            rotation: Vec3::ZERO,
        };
        let next = step(&o, &state, FrameTick::new(0.0, 0.0), TreeMode::Formed);
        assert!(transform(&o, &next, 1.0, TreeMode::Formed).is_finite());
    }
}
