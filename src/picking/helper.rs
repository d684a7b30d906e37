use glam::Vec2;

use super::raycaster::{Intersection, Raycaster};
use crate::camera::Camera;
use crate::error::ViewError;
use crate::scene::{NodeFlags, NodeId, SceneGraph};

/// Pointer location on the input surface, in the same units as the
/// surface size (CSS pixels on the web, physical pixels in winit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    /// Horizontal offset from the left edge.
    pub x: f32,
    /// Vertical offset from the top edge.
    pub y: f32,
    /// Surface width.
    pub width: f32,
    /// Surface height.
    pub height: f32,
}

impl PointerPosition {
    /// Normalized device coordinates (+Y up), or `None` for an empty
    /// surface.
    #[must_use]
    pub fn to_ndc(&self) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            (self.x / self.width) * 2.0 - 1.0,
            -(self.y / self.height) * 2.0 + 1.0,
        ))
    }
}

/// What to cast against: one subtree or several.
#[derive(Debug, Clone, Copy)]
pub enum PickTargets<'a> {
    /// A single subtree root.
    Node(NodeId),
    /// Several subtree roots.
    Nodes(&'a [NodeId]),
}

impl From<NodeId> for PickTargets<'_> {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl<'a> From<&'a [NodeId]> for PickTargets<'a> {
    fn from(ids: &'a [NodeId]) -> Self {
        Self::Nodes(ids)
    }
}

/// Reusable picker: keeps its raycaster and hit buffer between calls.
#[derive(Debug, Clone, Default)]
pub struct RaycasterHelper {
    raycaster: Raycaster,
    intersects: Vec<Intersection>,
}

impl RaycasterHelper {
    /// Create a helper with an unbounded raycaster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The raycaster as aimed by the most recent pick.
    #[must_use]
    pub fn raycaster(&self) -> &Raycaster {
        &self.raycaster
    }

    /// Every hit from the most recent pick, nearest first, ignored nodes
    /// included.
    #[must_use]
    pub fn intersects(&self) -> &[Intersection] {
        &self.intersects
    }

    /// Nearest hit under the pointer, skipping nodes that carry any of the
    /// `ignore` flags.
    pub fn pick<'a>(
        &mut self,
        pointer: PointerPosition,
        targets: impl Into<PickTargets<'a>>,
        graph: &SceneGraph,
        camera: &Camera,
        ignore: NodeFlags,
    ) -> Result<Option<Intersection>, ViewError> {
        self.intersects.clear();
        let Some(ndc) = pointer.to_ndc() else {
            return Ok(None);
        };
        self.raycaster.set_from_camera(graph, camera, ndc)?;

        match targets.into() {
            PickTargets::Node(id) => {
                self.raycaster
                    .intersect_node(graph, id, true, &mut self.intersects)?;
            }
            PickTargets::Nodes(ids) => {
                self.raycaster
                    .intersect_nodes(graph, ids, true, &mut self.intersects)?;
            }
        }

        for hit in &self.intersects {
            if ignore.is_empty() || !graph.node(hit.node)?.flags.intersects(ignore)
            {
                return Ok(Some(*hit));
            }
        }
        Ok(None)
    }
}
