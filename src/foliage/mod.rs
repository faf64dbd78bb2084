//! Particle foliage
//!
//! Points are generated once: a scattered sphere and a golden-angle spiral
//! over a cone. Per frame the host only advances a smoothed progress value;
//! the shader blends every point between its two positions.

mod generator;
mod model;

pub use generator::{cone_radius, generate, spiral_point, FoliageParams, FoliagePoint};
pub use model::{FoliageModel, STAGGER};

use rand::Rng;

use crate::animation::{FrameTick, SmoothedProgress, TreeMode};

/// Values handed to the foliage shader each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoliageUniforms {
    pub time: f32,
    pub progress: f32,
}

/// Owns the foliage points and their shared progress value
pub struct FoliageSystem {
    points: Vec<FoliagePoint>,
    progress: SmoothedProgress,
    params: FoliageParams,
}

impl FoliageSystem {
    pub fn new<R: Rng + ?Sized>(params: &FoliageParams, rng: &mut R) -> Self {
        Self {
            points: generate(params, rng),
            progress: SmoothedProgress::new(params.smoothing_rate),
            params: *params,
        }
    }

    /// Advance progress toward the goal of `mode`
    pub fn update(&mut self, tick: FrameTick, mode: TreeMode) {
        self.progress.update(tick.step_delta(), mode.goal());
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    pub fn uniforms(&self, tick: FrameTick) -> FoliageUniforms {
        FoliageUniforms {
            time: tick.elapsed,
            progress: self.progress.value(),
        }
    }

    /// CPU model of the shader for this system's parameters
    pub fn model(&self) -> FoliageModel {
        FoliageModel::new(self.params.height, self.params.point_size)
    }

    pub fn points(&self) -> &[FoliagePoint] {
        &self.points
    }

    pub fn params(&self) -> &FoliageParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Interleaved vertex data for GPU upload
    /// Format: chaos(3) + target(3) + random(1) = 7 floats per point
    pub fn vertex_data(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| p.to_array()).collect()
    }
}
