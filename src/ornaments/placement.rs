use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::kind::OrnamentKind;
use crate::config::HexColor;
use crate::math::{lerp, random_unit_vector, Vec3};

/// Parameters controlling ornament placement and appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrnamentParams {
    pub count: usize,
    /// Height of the formed tree the ornaments hang on
    pub height: f32,
    /// Tree radius at the base
    pub max_radius: f32,
    /// Distance ornaments sit outside the foliage surface
    pub surface_offset: f32,
    /// Exponent on the height draw; larger values crowd the base
    pub height_bias: f32,
    /// Spiral turns from base to tip
    pub spiral_bands: f32,
    /// Random angular spread around the spiral (radians)
    pub angle_jitter: f32,
    pub chaos_min_radius: f32,
    pub chaos_max_radius: f32,
    pub chaos_offset_y: f32,
    pub gift_ratio: f32,
    pub light_ratio: f32,
    /// Range of per-instance lerp speeds (1/s)
    pub min_speed: f32,
    pub max_speed: f32,
    /// Colors for balls and gifts
    pub palette: Vec<HexColor>,
    /// Colors for lights
    pub light_palette: Vec<HexColor>,
}

impl Default for OrnamentParams {
    fn default() -> Self {
        Self {
            count: 300,
            height: 11.0,
            max_radius: 5.0,
            surface_offset: 0.35,
            height_bias: 2.5,
            spiral_bands: 3.0,
            angle_jitter: 0.9,
            chaos_min_radius: 15.0,
            chaos_max_radius: 30.0,
            chaos_offset_y: 5.0,
            gift_ratio: 0.1,
            light_ratio: 0.1,
            min_speed: 0.6,
            max_speed: 1.8,
            palette: vec![
                HexColor::rgb8(0xd4, 0xaf, 0x37), // gold
                HexColor::rgb8(0xb3, 0x00, 0x1b), // crimson
                HexColor::rgb8(0xc0, 0xc0, 0xc8), // silver
                HexColor::rgb8(0x0b, 0x66, 0x23), // forest
                HexColor::rgb8(0x8f, 0xb8, 0xff), // ice
            ],
            light_palette: vec![
                HexColor::rgb8(0xff, 0xf4, 0xd6),
                HexColor::rgb8(0xff, 0xd2, 0x7a),
                HexColor::rgb8(0xff, 0xb3, 0xa7),
                HexColor::rgb8(0xdf, 0xef, 0xff),
            ],
        }
    }
}

/// Immutable per-instance attributes, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ornament {
    pub kind: OrnamentKind,
    pub chaos: Vec3,
    pub target: Vec3,
    pub color: Vec3,
    pub scale: f32,
    pub speed: f32,
    pub rotation_offset: f32,
}

/// Generate `params.count` ornaments
pub fn generate<R: Rng + ?Sized>(params: &OrnamentParams, rng: &mut R) -> Vec<Ornament> {
    (0..params.count).map(|_| place(params, rng)).collect()
}

fn place<R: Rng + ?Sized>(params: &OrnamentParams, rng: &mut R) -> Ornament {
    let kind = OrnamentKind::from_draw(rng.gen(), params.gift_ratio, params.light_ratio);

    let y_norm = rng.gen::<f32>().powf(params.height_bias);
    let y = y_norm * params.height;
    let radius = params.max_radius * (1.0 - y_norm) + params.surface_offset;
    let angle = y_norm * params.spiral_bands * TAU + (rng.gen::<f32>() - 0.5) * params.angle_jitter;
    let target = Vec3::new(angle.cos() * radius, y, angle.sin() * radius);

    let shell = lerp(params.chaos_min_radius, params.chaos_max_radius, rng.gen());
    let chaos = random_unit_vector(rng).scale(shell) + Vec3::new(0.0, params.chaos_offset_y, 0.0);

    let (min_scale, max_scale) = kind.scale_range();
    let scale = lerp(min_scale, max_scale, rng.gen());
    let speed = lerp(params.min_speed, params.max_speed, rng.gen());
    let rotation_offset = rng.gen::<f32>() * TAU;

    let palette = match kind {
        OrnamentKind::Light => &params.light_palette,
        OrnamentKind::Ball | OrnamentKind::Gift => &params.palette,
    };
    let color = if palette.is_empty() {
        Vec3::ONE
    } else {
        palette[rng.gen_range(0..palette.len())].rgb()
    };

    Ornament {
        kind,
        chaos,
        target,
        color,
        scale,
        speed,
        rotation_offset,
    }
}
