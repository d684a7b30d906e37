//! Tolerance comparisons and clamping used to decide when an animation has
//! converged.

use glam::{Quat, Vec3};

/// Default Manhattan tolerance for [`NearlyEqual`].
pub const DEFAULT_TOLERANCE: f32 = 0.002;

/// Approximate equality over the x, y and z components.
pub trait NearlyEqual {
    /// `true` when `|Δx| + |Δy| + |Δz| < tolerance`.
    fn nearly_equal(&self, other: &Self, tolerance: f32) -> bool;
}

impl NearlyEqual for Vec3 {
    fn nearly_equal(&self, other: &Self, tolerance: f32) -> bool {
        (*self - *other).abs().element_sum() < tolerance
    }
}

impl NearlyEqual for Quat {
    /// Compares the vector part only, after flipping `other` into the same
    /// hemisphere as `self`.
    fn nearly_equal(&self, other: &Self, tolerance: f32) -> bool {
        let other = if self.dot(*other) < 0.0 { -*other } else { *other };
        (self.xyz() - other.xyz()).abs().element_sum() < tolerance
    }
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics: infinite bounds are allowed and
/// a reversed range collapses to `max`.
#[must_use]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Clamp `value` into `[-limit, limit]`; `None` leaves it unbounded.
#[must_use]
pub fn clamp_symmetric(value: f32, limit: Option<f32>) -> f32 {
    limit.map_or(value, |l| clamp(value, -l, l))
}
