//! Frame timing and exponentially smoothed progress

/// One host frame: total elapsed seconds and seconds since the last frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTick {
    pub elapsed: f32,
    pub delta: f32,
}

impl FrameTick {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }
    }

    /// `delta` with negative and non-finite values read as a paused frame
    pub fn step_delta(&self) -> f32 {
        if self.delta.is_finite() && self.delta > 0.0 {
            self.delta
        } else {
            0.0
        }
    }
}

/// Scalar in [0, 1] that chases a goal at a fixed rate per second
#[derive(Debug, Clone, Copy)]
pub struct SmoothedProgress {
    value: f32,
    /// Fraction of the remaining distance covered per second
    pub rate: f32,
}

impl SmoothedProgress {
    pub fn new(rate: f32) -> Self {
        Self { value: 0.0, rate }
    }

    pub fn with_value(rate: f32, value: f32) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            rate,
        }
    }

    /// Move toward `goal` by `min(delta * rate, 1)` of the remaining distance
    pub fn update(&mut self, delta: f32, goal: f32) -> f32 {
        if !(delta > 0.0) || !delta.is_finite() {
            return self.value;
        }
        let alpha = (delta * self.rate).min(1.0);
        self.value += (goal - self.value) * alpha;
        self.value = self.value.clamp(0.0, 1.0);
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}
