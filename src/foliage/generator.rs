use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::math::{random_unit_vector, Vec3, GOLDEN_RATIO};

/// Parameters controlling foliage point placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoliageParams {
    /// Number of points, fixed for the lifetime of the system
    pub count: usize,
    /// Radius of the scattered sphere
    pub chaos_radius: f32,
    /// Vertical offset of the scattered sphere's center
    pub chaos_offset_y: f32,
    /// Height of the formed cone
    pub height: f32,
    /// Cone radius at the base
    pub max_radius: f32,
    /// Progress smoothing rate, fraction of remaining distance per second
    pub smoothing_rate: f32,
    /// Base point size in pixels at unit depth
    pub point_size: f32,
}

impl Default for FoliageParams {
    fn default() -> Self {
        Self {
            count: 12_000,
            chaos_radius: 25.0,
            chaos_offset_y: 5.0,
            height: 12.0,
            max_radius: 5.0,
            smoothing_rate: 1.5,
            point_size: 4.0,
        }
    }
}

/// One foliage particle: where it scatters to, where it sits on the tree,
/// and a per-point random used to stagger its timing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoliagePoint {
    pub chaos: Vec3,
    pub target: Vec3,
    pub random: f32,
}

impl FoliagePoint {
    /// GPU layout: chaos(3) + target(3) + random(1) = 7 floats
    pub fn to_array(&self) -> [f32; 7] {
        [
            self.chaos.x, self.chaos.y, self.chaos.z,
            self.target.x, self.target.y, self.target.z,
            self.random,
        ]
    }
}

/// Generate `params.count` foliage points
pub fn generate<R: Rng + ?Sized>(params: &FoliageParams, rng: &mut R) -> Vec<FoliagePoint> {
    (0..params.count)
        .map(|i| FoliagePoint {
            chaos: sample_ball(rng, params.chaos_radius) + Vec3::new(0.0, params.chaos_offset_y, 0.0),
            target: spiral_point(i, params),
            random: rng.gen::<f32>(),
        })
        .collect()
}

/// Uniform sample inside a ball; the cube root keeps volume density even
fn sample_ball<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let r = radius * rng.gen::<f32>().cbrt();
    random_unit_vector(rng).scale(r)
}

/// Point `index` on the golden-angle spiral wrapped around the cone
pub fn spiral_point(index: usize, params: &FoliageParams) -> Vec3 {
    let y_norm = index as f32 / params.count.max(1) as f32;
    let y = y_norm * params.height;
    let radius = params.max_radius * (1.0 - y_norm);
    // fract first so large indices keep full angular precision
    let angle = (index as f32 * GOLDEN_RATIO).fract() * TAU;
    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Cone radius at height `y`
pub fn cone_radius(y: f32, params: &FoliageParams) -> f32 {
    params.max_radius * (1.0 - (y / params.height).clamp(0.0, 1.0))
}
