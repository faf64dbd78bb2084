//! The foliage and ornament systems driven by one clock and one mode flag

use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::animation::{FrameTick, TreeMode};
use crate::config::TreeConfig;
use crate::foliage::FoliageSystem;
use crate::ornaments::OrnamentSystem;

pub struct TreeScene {
    foliage: FoliageSystem,
    ornaments: OrnamentSystem,
    mode: TreeMode,
    time: f32,
}

impl TreeScene {
    /// Build both systems from one RNG so a seed reproduces the whole scene
    pub fn new(config: &TreeConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let foliage = FoliageSystem::new(&config.foliage, &mut rng);
        let ornaments = OrnamentSystem::new(&config.ornaments, &mut rng);
        Self {
            foliage,
            ornaments,
            mode: config.initial_mode,
            time: 0.0,
        }
    }

    pub fn mode(&self) -> TreeMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TreeMode) {
        if mode != self.mode {
            debug!("tree mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> TreeMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    /// Accumulate `delta` seconds and update both systems
    pub fn advance(&mut self, delta: f32) -> FrameTick {
        let delta = FrameTick::new(self.time, delta).step_delta();
        self.time += delta;
        let tick = FrameTick::new(self.time, delta);
        self.update(tick);
        tick
    }

    /// Apply an explicit tick without touching the scene clock
    pub fn update(&mut self, tick: FrameTick) {
        self.foliage.update(tick, self.mode);
        self.ornaments.update(tick, self.mode);
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn foliage(&self) -> &FoliageSystem {
        &self.foliage
    }

    pub fn ornaments(&self) -> &OrnamentSystem {
        &self.ornaments
    }
}
