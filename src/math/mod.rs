pub mod vec3;
pub mod matrix;

pub use vec3::Vec3;
pub use matrix::Mat4;

use rand::Rng;
use std::f32::consts::TAU;

/// Golden ratio, drives the foliage phyllotaxis spiral
pub const GOLDEN_RATIO: f32 = 1.618_034;

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Direction uniformly distributed over the unit sphere
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    // acos of a uniform cosine avoids clustering at the poles
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    Vec3::from_spherical(theta, phi)
}
