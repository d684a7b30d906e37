use glam::{Vec2, Vec3};

use super::ray::Ray;
use crate::camera::Camera;
use crate::error::ViewError;
use crate::scene::{Node, NodeFlags, NodeId, SceneGraph, Shape};

/// A ray hit on a scene node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Node whose shape was hit.
    pub node: NodeId,
    /// World-space hit point.
    pub point: Vec3,
    /// World-space distance from the ray origin.
    pub distance: f32,
    /// Triangle index for mesh hits.
    pub face: Option<usize>,
}

/// Casts a world-space ray against node shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raycaster {
    /// World-space ray.
    pub ray: Ray,
    /// Hits closer than this are ignored.
    pub near: f32,
    /// Hits farther than this are ignored.
    pub far: f32,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self::new(Ray::new(Vec3::ZERO, Vec3::NEG_Z))
    }
}

impl Raycaster {
    /// Unbounded raycaster along `ray`.
    #[must_use]
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            near: 0.0,
            far: f32::INFINITY,
        }
    }

    /// Aim the ray from the camera through a point in normalized device
    /// coordinates.
    pub fn set_from_camera(
        &mut self,
        graph: &SceneGraph,
        camera: &Camera,
        ndc: Vec2,
    ) -> Result<(), ViewError> {
        self.ray = camera.ray_from_ndc(graph, ndc)?;
        Ok(())
    }

    /// Append hits on `node` (and its subtree when `recursive`) to `hits`,
    /// then sort all of `hits` nearest first.
    pub fn intersect_node(
        &self,
        graph: &SceneGraph,
        node: NodeId,
        recursive: bool,
        hits: &mut Vec<Intersection>,
    ) -> Result<(), ViewError> {
        self.collect(graph, node, recursive, hits)?;
        sort_by_distance(hits);
        Ok(())
    }

    /// [`intersect_node`](Self::intersect_node) over several roots, sorted
    /// once at the end.
    pub fn intersect_nodes(
        &self,
        graph: &SceneGraph,
        nodes: &[NodeId],
        recursive: bool,
        hits: &mut Vec<Intersection>,
    ) -> Result<(), ViewError> {
        for &node in nodes {
            self.collect(graph, node, recursive, hits)?;
        }
        sort_by_distance(hits);
        Ok(())
    }

    fn collect(
        &self,
        graph: &SceneGraph,
        id: NodeId,
        recursive: bool,
        hits: &mut Vec<Intersection>,
    ) -> Result<(), ViewError> {
        let node = graph.node(id)?;
        if node.flags.contains(NodeFlags::HIDDEN) {
            return Ok(());
        }
        if let Some(hit) = self.intersect_shape(graph, id, node)? {
            hits.push(hit);
        }
        if recursive {
            for &child in node.children() {
                self.collect(graph, child, true, hits)?;
            }
        }
        Ok(())
    }

    fn intersect_shape(
        &self,
        graph: &SceneGraph,
        id: NodeId,
        node: &Node,
    ) -> Result<Option<Intersection>, ViewError> {
        let Some(shape) = &node.shape else {
            return Ok(None);
        };
        let world = graph.world_matrix(id)?;
        let inverse = world.inverse();
        let local = Ray::new(
            inverse.transform_point3(self.ray.origin),
            inverse.transform_vector3(self.ray.direction),
        );

        let (t, face) = match shape {
            Shape::Sphere { radius } => {
                match local.intersect_sphere(Vec3::ZERO, *radius) {
                    Some(t) => (t, None),
                    None => return Ok(None),
                }
            }
            Shape::Cuboid { half_extents } => {
                match local.intersect_box(-*half_extents, *half_extents) {
                    Some(t) => (t, None),
                    None => return Ok(None),
                }
            }
            Shape::Mesh(mesh) => {
                let (center, radius) = mesh.bounding_sphere();
                if local.intersect_sphere(center, radius).is_none() {
                    return Ok(None);
                }
                let nearest = mesh
                    .triangles()
                    .enumerate()
                    .filter_map(|(face, [a, b, c])| {
                        local.intersect_triangle(a, b, c).map(|t| (t, face))
                    })
                    .min_by(|x, y| x.0.total_cmp(&y.0));
                match nearest {
                    Some((t, face)) => (t, Some(face)),
                    None => return Ok(None),
                }
            }
        };

        let point = world.transform_point3(local.at(t));
        let distance = self.ray.origin.distance(point);
        if distance < self.near || distance > self.far {
            return Ok(None);
        }
        Ok(Some(Intersection {
            node: id,
            point,
            distance,
            face,
        }))
    }
}

fn sort_by_distance(hits: &mut [Intersection]) {
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}
