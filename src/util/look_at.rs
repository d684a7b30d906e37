use glam::{Mat3, Quat, Vec3};

/// Rotation whose +Z axis points from `target` toward `eye`.
///
/// Applied to a camera (which looks down −Z) this aims it at `target` from
/// `eye`. Swap the arguments to aim an ordinary object's +Z at a target.
/// Coincident points and an `up` parallel to the view axis are nudged
/// rather than producing NaN.
#[must_use]
pub fn look_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Quat {
    let mut z = eye - target;
    if z.length_squared() == 0.0 {
        z.z = 1.0;
    }
    z = z.normalize();

    let mut x = up.cross(z);
    if x.length_squared() == 0.0 {
        if (up.z.abs() - 1.0).abs() < f32::EPSILON {
            z.x += 0.0001;
        } else {
            z.z += 0.0001;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);

    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}
