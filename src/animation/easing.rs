//! Easing curves shared by the foliage shader and its host-side model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Matches `ease_in_out_cubic` in the foliage vertex shader
    #[default]
    EaseInOutCubic,
}

/// Apply easing function to a value t in range [0, 1]
pub fn ease(t: f32, easing: Easing) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseInOutCubic => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }
    }
}

/// GLSL `smoothstep`, edges must be ordered
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_bounds() {
        for easing in [Easing::Linear, Easing::EaseInOutCubic] {
            assert!(ease(0.0, easing).abs() < 0.0001, "Easing {:?} should start at 0", easing);
            assert!((ease(1.0, easing) - 1.0).abs() < 0.0001, "Easing {:?} should end at 1", easing);
        }
    }

    #[test]
    fn test_ease_monotonic() {
        for easing in [Easing::Linear, Easing::EaseInOutCubic] {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = ease(i as f32 / 100.0, easing);
                assert!(v >= prev - 0.0001, "Easing {:?} should be monotonic", easing);
                prev = v;
            }
        }
    }

    #[test]
    fn test_cubic_symmetric() {
        let v1 = ease(0.25, Easing::EaseInOutCubic);
        let v2 = ease(0.75, Easing::EaseInOutCubic);
        assert!((v1 + v2 - 1.0).abs() < 0.0001);
        assert!((ease(0.5, Easing::EaseInOutCubic) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_ease_clamps_input() {
        assert_eq!(ease(-0.5, Easing::Linear), 0.0);
        assert_eq!(ease(1.5, Easing::EaseInOutCubic), 1.0);
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.1, 0.5, 0.0), 0.0);
        assert_eq!(smoothstep(0.1, 0.5, 0.7), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 0.0001);
    }
}
