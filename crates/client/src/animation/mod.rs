//! Time-based animation primitives driven by an explicit clock.
//!
//! Nothing here reads the wall clock. Callers pass the current [`Instant`]
//! to every sampling method, which keeps transitions deterministic under
//! test and lets the host loop own frame scheduling.
//!
//! [`Instant`]: std::time::Instant

mod easing;
mod keyframes;
mod lerp;
mod pose;
mod tween;

pub use easing::Easing;
pub use keyframes::{Keyframe, Keyframes};
pub use lerp::Animatable;
pub use pose::ViewPose;
pub use tween::Tween;
