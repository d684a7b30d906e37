//! Math helpers shared by the scene graph, the picker and the controls.
//!
//! Easing curves, tolerance comparisons for animation convergence, and the
//! look-at rotation used to aim cameras and pivots.

pub mod approx;
pub mod easing;
mod look_at;

pub use approx::{clamp, clamp_symmetric, NearlyEqual, DEFAULT_TOLERANCE};
pub use easing::{ease_between, EaseTo, Easing};
pub use look_at::look_rotation;
