use glam::Vec3;

use crate::error::ViewError;

/// Pick geometry in the owning node's local space.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Sphere centred on the node origin.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
    /// Axis-aligned box centred on the node origin.
    Cuboid {
        /// Half the box size along each axis.
        half_extents: Vec3,
    },
    /// Arbitrary indexed triangles.
    Mesh(TriangleMesh),
}

/// Indexed triangle list with a precomputed bounding sphere for early-out
/// ray rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    indices: Vec<[u32; 3]>,
    bounds_center: Vec3,
    bounds_radius: f32,
}

impl TriangleMesh {
    /// Build a mesh, rejecting indices that point past `positions`.
    pub fn new(
        positions: Vec<Vec3>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, ViewError> {
        let vertex_count = positions.len();
        if let Some(index) = indices
            .iter()
            .flatten()
            .copied()
            .find(|&i| i as usize >= vertex_count)
        {
            return Err(ViewError::InvalidMesh {
                index,
                vertex_count,
            });
        }

        let (min, max) = positions.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(lo, hi), &p| (lo.min(p), hi.max(p)),
        );
        let bounds_center = if positions.is_empty() {
            Vec3::ZERO
        } else {
            (min + max) * 0.5
        };
        let bounds_radius = positions
            .iter()
            .map(|p| p.distance(bounds_center))
            .fold(0.0, f32::max);

        Ok(Self {
            positions,
            indices,
            bounds_center,
            bounds_radius,
        })
    }

    /// A `width` × `depth` rectangle in the XZ plane facing +Y, split into
    /// two triangles.
    #[must_use]
    pub fn plane(width: f32, depth: f32) -> Self {
        let (hw, hd) = (width * 0.5, depth * 0.5);
        let positions = vec![
            Vec3::new(-hw, 0.0, -hd),
            Vec3::new(hw, 0.0, -hd),
            Vec3::new(hw, 0.0, hd),
            Vec3::new(-hw, 0.0, hd),
        ];
        Self {
            bounds_center: Vec3::ZERO,
            bounds_radius: Vec3::new(hw, 0.0, hd).length(),
            positions,
            indices: vec![[0, 2, 1], [0, 3, 2]],
        }
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Bounding sphere as `(center, radius)`.
    #[must_use]
    pub fn bounding_sphere(&self) -> (Vec3, f32) {
        (self.bounds_center, self.bounds_radius)
    }

    /// Triangle corners by face index.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.iter().map(|&[a, b, c]| {
            [
                self.positions[a as usize],
                self.positions[b as usize],
                self.positions[c as usize],
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = TriangleMesh::new(vec![Vec3::ZERO, Vec3::X], vec![[0, 1, 2]])
            .unwrap_err();
        assert!(matches!(
            err,
            ViewError::InvalidMesh {
                index: 2,
                vertex_count: 2
            }
        ));
    }

    #[test]
    fn bounding_sphere_covers_all_vertices() {
        let positions = vec![
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
        ];
        let mesh = TriangleMesh::new(positions.clone(), vec![[0, 1, 2]]).unwrap();
        let (center, radius) = mesh.bounding_sphere();
        for p in positions {
            assert!(p.distance(center) <= radius + 1e-5);
        }
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn plane_faces_up() {
        let plane = TriangleMesh::plane(4.0, 2.0);
        for [a, b, c] in plane.triangles() {
            let normal = (b - a).cross(c - a).normalize();
            assert!(normal.abs_diff_eq(Vec3::Y, 1e-6), "normal {normal}");
        }
    }
}
