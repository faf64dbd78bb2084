use serde::{Deserialize, Serialize};

/// Visual category of an ornament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrnamentKind {
    Ball,
    Gift,
    Light,
}

impl OrnamentKind {
    pub const ALL: [OrnamentKind; 3] = [OrnamentKind::Ball, OrnamentKind::Gift, OrnamentKind::Light];

    /// Categorize a uniform draw in [0, 1): balls take whatever the gift
    /// and light shares leave over, in that order
    pub fn from_draw(draw: f32, gift_ratio: f32, light_ratio: f32) -> Self {
        let ball_ratio = 1.0 - gift_ratio - light_ratio;
        if draw < ball_ratio {
            OrnamentKind::Ball
        } else if draw < ball_ratio + gift_ratio {
            OrnamentKind::Gift
        } else {
            OrnamentKind::Light
        }
    }

    /// Inclusive-exclusive range the base scale is drawn from
    pub fn scale_range(self) -> (f32, f32) {
        match self {
            OrnamentKind::Ball => (0.22, 0.38),
            OrnamentKind::Gift => (0.30, 0.50),
            OrnamentKind::Light => (0.08, 0.13),
        }
    }

    /// How much the kind glows on its own
    pub fn emissive(self) -> f32 {
        match self {
            OrnamentKind::Light => 1.0,
            OrnamentKind::Ball | OrnamentKind::Gift => 0.1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            OrnamentKind::Ball => 0,
            OrnamentKind::Gift => 1,
            OrnamentKind::Light => 2,
        }
    }
}
