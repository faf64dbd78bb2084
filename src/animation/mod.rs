//! Animation primitives shared by the foliage and ornament systems
//!
//! Both systems are driven by the same per-frame tick and mode flag; only
//! their convergence models differ.

mod easing;
mod mode;
mod progress;

pub use easing::{ease, smoothstep, Easing};
pub use mode::TreeMode;
pub use progress::{FrameTick, SmoothedProgress};
