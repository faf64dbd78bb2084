//! YAML configuration
//!
//! Every section has defaults, so an empty document is a valid config.
//!
//! ```yaml
//! seed: 42
//! initial_mode: formed
//! foliage:
//!   count: 8000
//! ornaments:
//!   count: 200
//!   palette: ["#d4af37", "#b3001b"]
//! camera:
//!   distance: 28.0
//! ```

mod color;

pub use color::HexColor;

use serde::{Deserialize, Serialize};

use crate::animation::TreeMode;
use crate::error::{Result, TreeError};
use crate::foliage::FoliageParams;
use crate::math::Vec3;
use crate::ornaments::OrnamentParams;

/// Initial orbit camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    pub distance: f32,
    /// Elevation in radians
    pub angle_x: f32,
    /// Azimuth in radians
    pub angle_y: f32,
    pub target: Vec3,
    pub fov_degrees: f32,
    /// Azimuth drift while idle (rad/s)
    pub auto_rotate: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            distance: 30.0,
            angle_x: 0.2,
            angle_y: 0.0,
            target: Vec3::new(0.0, 5.5, 0.0),
            fov_degrees: 45.0,
            auto_rotate: 0.05,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    pub initial_mode: TreeMode,
    pub foliage: FoliageParams,
    pub ornaments: OrnamentParams,
    pub camera: CameraParams,
}

impl TreeConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: TreeConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Cross-field checks serde can't express. Comparisons are written so
    /// NaN fails them.
    pub fn validate(&self) -> Result<()> {
        let f = &self.foliage;
        all_finite(
            "foliage",
            &[f.chaos_radius, f.chaos_offset_y, f.height, f.max_radius, f.smoothing_rate, f.point_size],
        )?;
        if !(f.height > 0.0 && f.max_radius >= 0.0 && f.chaos_radius >= 0.0) {
            return Err(invalid("foliage dimensions must be positive"));
        }
        if !(f.smoothing_rate >= 0.0 && f.point_size >= 0.0) {
            return Err(invalid("foliage.smoothing_rate and point_size must not be negative"));
        }

        let o = &self.ornaments;
        all_finite(
            "ornaments",
            &[
                o.height,
                o.max_radius,
                o.surface_offset,
                o.height_bias,
                o.spiral_bands,
                o.angle_jitter,
                o.chaos_min_radius,
                o.chaos_max_radius,
                o.chaos_offset_y,
                o.gift_ratio,
                o.light_ratio,
                o.min_speed,
                o.max_speed,
            ],
        )?;
        if !(o.height > 0.0 && o.max_radius >= 0.0) {
            return Err(invalid("ornament dimensions must be positive"));
        }
        // r^bias with bias <= 0 leaves [0, 1) and lifts targets off the tree
        if !(o.height_bias > 0.0) {
            return Err(invalid("ornaments.height_bias must be positive"));
        }
        let ratio_ok = |r: f32| (0.0..=1.0).contains(&r);
        if !ratio_ok(o.gift_ratio) || !ratio_ok(o.light_ratio) || o.gift_ratio + o.light_ratio > 1.0 {
            return Err(invalid("gift_ratio and light_ratio must be in [0, 1] and sum to at most 1"));
        }
        if !(o.chaos_min_radius >= 0.0 && o.chaos_min_radius <= o.chaos_max_radius) {
            return Err(invalid("chaos shell needs 0 <= chaos_min_radius <= chaos_max_radius"));
        }
        if !(o.min_speed >= 0.0 && o.min_speed <= o.max_speed) {
            return Err(invalid("speed range needs 0 <= min_speed <= max_speed"));
        }
        if o.palette.is_empty() || o.light_palette.is_empty() {
            return Err(invalid("ornament palettes must not be empty"));
        }

        let c = &self.camera;
        all_finite(
            "camera",
            &[c.distance, c.angle_x, c.angle_y, c.fov_degrees, c.auto_rotate],
        )?;
        if !c.target.is_finite() {
            return Err(invalid("camera.target must be finite"));
        }
        if !(c.distance > 0.0) || !(1.0..179.0).contains(&c.fov_degrees) {
            return Err(invalid("camera distance must be positive and fov within (1, 179) degrees"));
        }
        Ok(())
    }
}

fn all_finite(section: &str, values: &[f32]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(TreeError::InvalidConfig(format!("{} values must be finite", section)))
    }
}

fn invalid(msg: &str) -> TreeError {
    TreeError::InvalidConfig(msg.to_string())
}
