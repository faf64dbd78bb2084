use serde::{Deserialize, Serialize};

use crate::error::{Result, TreeError};
use crate::math::Vec3;

/// sRGB color written as `#rrggbb` in config files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(Vec3);

impl HexColor {
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        HexColor(Vec3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0))
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn parse(text: &str) -> Result<Self> {
        let digits = text.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(TreeError::InvalidColor(text.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| TreeError::InvalidColor(text.to_string()))
        };
        Ok(Self::rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Channels in [0, 1] as uploaded to the GPU
    pub fn rgb(&self) -> Vec3 {
        self.0
    }

    fn to_u8(channel: f32) -> u8 {
        (channel.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl TryFrom<String> for HexColor {
    type Error = TreeError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        let c = color.0;
        format!(
            "#{:02x}{:02x}{:02x}",
            HexColor::to_u8(c.x),
            HexColor::to_u8(c.y),
            HexColor::to_u8(c.z)
        )
    }
}
