//! Easing curves and the small interpolation helpers built on them.
//!
//! The curves map a normalized progress value in `[0, 1]` to an eased
//! weight. [`EaseTo`] applies such a weight as a relative step toward a
//! target, which is how the per-frame animations converge.

use glam::{Quat, Vec2, Vec3};

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    #[default]
    Linear,
    /// Quartic ease-in-out: `8t⁴` up to the midpoint, mirrored after.
    InOutQuart,
    /// Tent curve: rises linearly to 1 at the midpoint, then falls back to 0.
    InOutLinear,
}

impl Easing {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    let u = t - 1.0;
                    1.0 - 8.0 * u * u * u * u
                }
            }
            Self::InOutLinear => {
                if t < 0.5 {
                    2.0 * t
                } else {
                    2.0 * (1.0 - t)
                }
            }
        }
    }
}

/// Interpolate between two screen-space points with an easing curve.
#[must_use]
pub fn ease_between(from: Vec2, to: Vec2, easing: Easing, t: f32) -> Vec2 {
    from + (to - from) * easing.evaluate(t)
}

/// Relative step toward a target, weighted by an easing curve.
pub trait EaseTo {
    /// Move `self` toward `target` by `easing(t)` of the remaining distance.
    fn ease_to(&mut self, target: Self, easing: Easing, t: f32);
}

impl EaseTo for Vec3 {
    fn ease_to(&mut self, target: Self, easing: Easing, t: f32) {
        *self += (target - *self) * easing.evaluate(t);
    }
}

impl EaseTo for Quat {
    fn ease_to(&mut self, target: Self, easing: Easing, t: f32) {
        let weight = easing.evaluate(t);
        // Step along the shorter arc so q and -q converge the same way.
        let target = if self.dot(target) < 0.0 { -target } else { target };
        *self = (*self + (target - *self) * weight).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        assert_eq!(Easing::Linear.evaluate(0.0), 0.0);
        assert_eq!(Easing::Linear.evaluate(0.5), 0.5);
        assert_eq!(Easing::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_in_out_quart_shape() {
        let quart = Easing::InOutQuart;
        assert_eq!(quart.evaluate(0.0), 0.0);
        assert!((quart.evaluate(1.0) - 1.0).abs() < 1e-6);
        assert!((quart.evaluate(0.25) - 8.0 * 0.25_f32.powi(4)).abs() < 1e-6);
        // Symmetric about the midpoint.
        let a = quart.evaluate(0.2);
        let b = quart.evaluate(0.8);
        assert!((a + b - 1.0).abs() < 1e-5, "got {a} + {b}");
    }

    #[test]
    fn test_in_out_linear_is_a_tent() {
        let tent = Easing::InOutLinear;
        assert_eq!(tent.evaluate(0.0), 0.0);
        assert_eq!(tent.evaluate(0.25), 0.5);
        assert_eq!(tent.evaluate(0.5), 1.0);
        assert_eq!(tent.evaluate(0.75), 0.5);
        assert_eq!(tent.evaluate(1.0), 0.0);
    }

    #[test]
    fn test_input_clamping() {
        assert_eq!(Easing::Linear.evaluate(-0.5), 0.0);
        assert_eq!(Easing::Linear.evaluate(1.5), 1.0);
        assert!((Easing::InOutQuart.evaluate(3.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ease_between_moves_both_axes() {
        let p = ease_between(
            Vec2::ZERO,
            Vec2::new(10.0, -4.0),
            Easing::Linear,
            0.5,
        );
        assert_eq!(p, Vec2::new(5.0, -2.0));
    }

    #[test]
    fn vec3_ease_to_takes_relative_step() {
        let mut v = Vec3::ZERO;
        v.ease_to(Vec3::new(4.0, 0.0, -8.0), Easing::Linear, 0.25);
        assert_eq!(v, Vec3::new(1.0, 0.0, -2.0));
        v.ease_to(Vec3::new(4.0, 0.0, -8.0), Easing::Linear, 1.0);
        assert_eq!(v, Vec3::new(4.0, 0.0, -8.0));
    }

    #[test]
    fn quat_ease_to_stays_normalized_and_converges() {
        let target = Quat::from_rotation_y(1.2);
        let mut q = Quat::IDENTITY;
        for _ in 0..40 {
            q.ease_to(target, Easing::Linear, 0.3);
            assert!((q.length() - 1.0).abs() < 1e-4);
        }
        assert!(q.angle_between(target) < 1e-3);
    }
}
