use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use glam::{Mat4, Quat, Vec3};

use super::shape::Shape;

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Handle to a node in a [`SceneGraph`](super::SceneGraph).
///
/// Ids are never reused, so a handle to a removed node stays invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(super) u32);

impl NodeId {
    /// Arena slot index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// NodeFlags
// ---------------------------------------------------------------------------

/// Per-node marker bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeFlags(u32);

impl NodeFlags {
    /// No flags set.
    pub const EMPTY: Self = Self(0);
    /// Node is a camera: `look_at` aims its −Z axis instead of +Z.
    pub const CAMERA: Self = Self(1);
    /// Node belongs to an editor transform gizmo and is skipped by picking.
    pub const TRANSFORM_GIZMO: Self = Self(1 << 1);
    /// Node and its subtree are invisible to the ray caster.
    pub const HIDDEN: Self = Self(1 << 2);

    /// Whether every bit of `other` is set.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any bit of `other` is set.
    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether no bits are set.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Set the bits of `other`.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clear the bits of `other`.
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for NodeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for NodeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Translation, rotation and scale relative to the parent node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in the parent's space.
    pub translation: Vec3,
    /// Orientation relative to the parent.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Identity rotation and scale at `translation`.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Decompose an affine matrix.
    #[must_use]
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, translation) =
            matrix.to_scale_rotation_translation();
        Self {
            translation,
            rotation: rotation.normalize(),
            scale,
        }
    }

    /// Builder-style rotation override.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder-style scale override.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local-to-parent matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }

    /// Move along a local axis (the axis is rotated by this transform's
    /// orientation before the move).
    pub fn translate_on_axis(&mut self, axis: Vec3, distance: f32) {
        self.translation += self.rotation * axis * distance;
    }

    /// Rotate about a local axis.
    pub fn rotate_on_axis(&mut self, axis: Vec3, angle: f32) {
        self.rotation =
            (self.rotation * Quat::from_axis_angle(axis, angle)).normalize();
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A single scene graph node.
#[derive(Debug, Clone)]
pub struct Node {
    pub(super) name: String,
    /// Transform relative to the parent.
    pub transform: Transform,
    /// Local-space pick geometry, if any.
    pub shape: Option<Shape>,
    /// Marker bits (camera, gizmo, hidden).
    pub flags: NodeFlags,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl Node {
    pub(super) fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            transform: Transform::IDENTITY,
            shape: None,
            flags: NodeFlags::EMPTY,
            parent,
            children: Vec::new(),
        }
    }

    /// Human-readable name (not necessarily unique).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node; `None` only for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn flags_combine_and_query() {
        let mut flags = NodeFlags::CAMERA | NodeFlags::HIDDEN;
        assert!(flags.contains(NodeFlags::CAMERA));
        assert!(flags.intersects(NodeFlags::HIDDEN | NodeFlags::TRANSFORM_GIZMO));
        assert!(!flags.contains(NodeFlags::HIDDEN | NodeFlags::TRANSFORM_GIZMO));
        flags.remove(NodeFlags::HIDDEN);
        assert!(!flags.intersects(NodeFlags::HIDDEN));
        flags.remove(NodeFlags::CAMERA);
        assert!(flags.is_empty());
    }

    #[test]
    fn translate_follows_local_orientation() {
        let mut t = Transform::IDENTITY.with_rotation(Quat::from_rotation_y(FRAC_PI_2));
        t.translate_on_axis(Vec3::Z, 2.0);
        // +Z rotated a quarter turn about Y points along +X.
        assert!(t.translation.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn rotations_compose_in_local_space() {
        let mut t = Transform::IDENTITY;
        t.rotate_on_axis(Vec3::Y, FRAC_PI_2);
        t.rotate_on_axis(Vec3::X, FRAC_PI_2);
        let expected = Quat::from_rotation_y(FRAC_PI_2) * Quat::from_rotation_x(FRAC_PI_2);
        assert!(t.rotation.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn matrix_round_trips_through_decomposition() {
        let t = Transform::from_translation(Vec3::new(1.0, -2.0, 3.0))
            .with_rotation(Quat::from_rotation_z(0.4))
            .with_scale(Vec3::splat(2.0));
        let back = Transform::from_matrix(t.matrix());
        assert!(back.translation.abs_diff_eq(t.translation, 1e-5));
        assert!(back.rotation.abs_diff_eq(t.rotation, 1e-5));
        assert!(back.scale.abs_diff_eq(t.scale, 1e-5));
    }
}
