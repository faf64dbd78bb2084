//! Host-side mirror of the foliage vertex/fragment shader math
//!
//! The GPU does this work every frame; the model exists so the same
//! behavior can be asserted in tests and sampled on the CPU.

use std::f32::consts::TAU;

use super::generator::FoliagePoint;
use crate::animation::{ease, smoothstep, Easing};
use crate::math::Vec3;

/// Fraction of the progress range used to stagger point start times
pub const STAGGER: f32 = 0.25;
/// Horizontal sway amplitude once a point has arrived
pub const SWAY_AMPLITUDE: f32 = 0.08;
/// Depth at which a point is drawn at its nominal size
pub const SIZE_ATTENUATION: f32 = 30.0;

pub const DEEP_BLUE: Vec3 = Vec3::new(0.02, 0.08, 0.32);
pub const LIGHT_BLUE: Vec3 = Vec3::new(0.38, 0.66, 0.98);
pub const SPARKLE_WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

#[derive(Debug, Clone, Copy)]
pub struct FoliageModel {
    pub easing: Easing,
    /// Tree height, used to normalize the color gradient
    pub tree_height: f32,
    pub point_size: f32,
}

impl FoliageModel {
    pub fn new(tree_height: f32, point_size: f32) -> Self {
        Self {
            easing: Easing::EaseInOutCubic,
            tree_height,
            point_size,
        }
    }

    /// Per-point progress after the random start offset
    pub fn local_progress(&self, point: &FoliagePoint, progress: f32) -> f32 {
        ((progress - point.random * STAGGER) / (1.0 - STAGGER)).clamp(0.0, 1.0)
    }

    pub fn position(&self, point: &FoliagePoint, progress: f32, time: f32) -> Vec3 {
        let eased = ease(self.local_progress(point, progress), self.easing);
        let mut pos = point.chaos.lerp(&point.target, eased);

        let phase = time * 1.5 + point.random * TAU;
        pos.x += phase.sin() * SWAY_AMPLITUDE * eased;
        pos.z += phase.cos() * SWAY_AMPLITUDE * eased;
        pos
    }

    /// Deep blue at the base, light blue toward the tip, twinkling white
    pub fn color(&self, point: &FoliagePoint, progress: f32, time: f32) -> Vec3 {
        let eased = ease(self.local_progress(point, progress), self.easing);
        let height_t = (point.target.y / self.tree_height).clamp(0.0, 1.0);
        let base = DEEP_BLUE.lerp(&LIGHT_BLUE, (height_t * 0.7 + point.random * 0.3).clamp(0.0, 1.0));

        let twinkle = (time * 3.0 + point.random * 60.0).sin();
        let sparkle = smoothstep(0.92, 1.0, twinkle) * (0.4 + 0.6 * eased);
        base.lerp(&SPARKLE_WHITE, sparkle)
    }

    /// Point size in pixels at the given view-space depth
    pub fn point_size(&self, point: &FoliagePoint, depth: f32) -> f32 {
        self.point_size * (0.6 + point.random * 0.8) * (SIZE_ATTENUATION / depth.max(0.1))
    }

    /// Soft circular falloff for a fragment `dist` from the point center
    /// (0.5 is the sprite edge)
    pub fn edge_alpha(dist: f32) -> f32 {
        if dist > 0.5 {
            return 0.0;
        }
        1.0 - smoothstep(0.1, 0.5, dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(random: f32) -> FoliagePoint {
        FoliagePoint {
            chaos: Vec3::new(20.0, 5.0, 0.0),
            target: Vec3::new(2.0, 6.0, 0.0),
            random,
        }
    }

    #[test]
    fn test_endpoints() {
        let model = FoliageModel::new(12.0, 4.0);
        let p = point(0.7);
        assert_eq!(model.position(&p, 0.0, 0.0), p.chaos);
        let formed = model.position(&p, 1.0, 0.0);
        assert!(formed.distance(&p.target) <= SWAY_AMPLITUDE * 1.5);
    }

    #[test]
    fn test_stagger_delays_high_random() {
        let model = FoliageModel::new(12.0, 4.0);
        let early = model.local_progress(&point(0.0), 0.3);
        let late = model.local_progress(&point(1.0), 0.3);
        assert!(early > late);
        assert!((late - (0.3 - 0.25) / 0.75).abs() < 0.0001);
    }

    #[test]
    fn test_full_progress_reaches_every_point() {
        let model = FoliageModel::new(12.0, 4.0);
        for i in 0..=10 {
            let p = point(i as f32 / 10.0 * 0.999);
            assert_eq!(model.local_progress(&p, 1.0), 1.0);
        }
    }

    #[test]
    fn test_color_stays_in_gradient() {
        let model = FoliageModel::new(12.0, 4.0);
        for i in 0..200 {
            let c = model.color(&point((i % 10) as f32 / 10.0), 1.0, i as f32 * 0.13);
            for channel in c.to_array() {
                assert!((0.0..=1.0).contains(&channel));
            }
            assert!(c.z >= DEEP_BLUE.z - 0.0001);
        }
    }

    #[test]
    fn test_size_falls_off_with_depth() {
        let model = FoliageModel::new(12.0, 4.0);
        let p = point(0.5);
        assert!(model.point_size(&p, 10.0) > model.point_size(&p, 40.0));
        assert!(model.point_size(&p, 0.0).is_finite());
    }

    #[test]
    fn test_edge_alpha() {
        assert_eq!(FoliageModel::edge_alpha(0.0), 1.0);
        assert_eq!(FoliageModel::edge_alpha(0.6), 0.0);
        assert!(FoliageModel::edge_alpha(0.3) > 0.0 && FoliageModel::edge_alpha(0.3) < 1.0);
    }
}
