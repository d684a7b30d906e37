//! Retained-mode scene graph.
//!
//! Nodes live in an arena owned by [`SceneGraph`] and are addressed by
//! [`NodeId`]. Each node stores a transform relative to its parent; world
//! matrices are computed on demand by walking the parent chain, so the graph
//! never holds stale cached state.
//!
//! Two reparenting operations exist: [`SceneGraph::add`] keeps the child's
//! local transform (it jumps with the new parent), while
//! [`SceneGraph::attach`] keeps its world transform (it stays where it is on
//! screen). The camera controls rely on the latter to hand the camera back
//! and forth between its home parent and the orbit rig.

mod node;
mod shape;

use glam::{Mat4, Quat, Vec3};
use rustc_hash::FxHashMap;

pub use node::{Node, NodeFlags, NodeId, Transform};
pub use shape::{Shape, TriangleMesh};

use crate::error::ViewError;
use crate::util::look_rotation;

/// Name given to the root node.
pub const ROOT_NAME: &str = "scene";

/// Arena-backed hierarchy of transformed nodes.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    names: FxHashMap<String, Vec<NodeId>>,
    live: usize,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut names = FxHashMap::default();
        let _ = names.insert(ROOT_NAME.to_owned(), vec![root]);
        Self {
            nodes: vec![Some(Node::new(ROOT_NAME.to_owned(), None))],
            root,
            names,
            live: 1,
        }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Always `false`: the root cannot be removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Whether `id` refers to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.get(id.index()).is_some_and(Option::is_some)
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Result<&Node, ViewError> {
        self.nodes
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(ViewError::UnknownNode(id))
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, ViewError> {
        self.nodes
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(ViewError::UnknownNode(id))
    }

    /// First live node registered under `name`.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).and_then(|ids| ids.first().copied())
    }

    /// Rename a node.
    pub fn set_name(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
    ) -> Result<(), ViewError> {
        let name = name.into();
        let old = std::mem::replace(&mut self.node_mut(id)?.name, name.clone());
        self.unindex_name(&old, id);
        self.names.entry(name).or_default().push(id);
        Ok(())
    }

    /// Create an empty child of `parent`.
    pub fn add_node(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
    ) -> Result<NodeId, ViewError> {
        self.spawn(parent, name, Transform::IDENTITY)
    }

    /// Create a child of `parent` with an initial local transform.
    pub fn spawn(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Transform,
    ) -> Result<NodeId, ViewError> {
        let _ = self.node(parent)?;
        let id = NodeId(self.nodes.len() as u32);
        let name = name.into();
        let mut node = Node::new(name.clone(), Some(parent));
        node.transform = transform;
        self.nodes.push(Some(node));
        self.node_mut(parent)?.children.push(id);
        self.names.entry(name).or_default().push(id);
        self.live += 1;
        Ok(id)
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, ViewError> {
        Ok(self.node(id)?.parent)
    }

    /// Whether `ancestor` lies on the parent chain of `node` (a node is not
    /// its own ancestor).
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.node(node).ok().and_then(Node::parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).ok().and_then(Node::parent);
        }
        false
    }

    /// `id` followed by its whole subtree, depth first in child order.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>, ViewError> {
        let _ = self.node(id)?;
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            let node = self.node(current)?;
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(out)
    }

    /// Reparent `child` under `parent`, keeping its local transform.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<(), ViewError> {
        self.check_reparent(parent, child)?;
        self.relink(parent, child)
    }

    /// Reparent `child` under `parent`, keeping its world transform.
    pub fn attach(
        &mut self,
        parent: NodeId,
        child: NodeId,
    ) -> Result<(), ViewError> {
        self.check_reparent(parent, child)?;
        let child_world = self.world_matrix(child)?;
        let parent_world = self.world_matrix(parent)?;
        let local = parent_world.inverse() * child_world;
        self.node_mut(child)?.transform = Transform::from_matrix(local);
        self.relink(parent, child)
    }

    /// Remove `id` and its subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<(), ViewError> {
        if id == self.root {
            return Err(ViewError::RootRemoval);
        }
        let subtree = self.descendants(id)?;
        if let Some(parent) = self.node(id)?.parent {
            self.node_mut(parent)?.children.retain(|&c| c != id);
        }
        for node_id in subtree {
            if let Some(node) = self.nodes[node_id.index()].take() {
                self.unindex_name(&node.name, node_id);
                self.live -= 1;
            }
        }
        Ok(())
    }

    // -- Transforms -------------------------------------------------------

    /// Local-to-world matrix.
    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4, ViewError> {
        let mut node = self.node(id)?;
        let mut matrix = node.transform.matrix();
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            matrix = node.transform.matrix() * matrix;
        }
        Ok(matrix)
    }

    /// World-space position of the node origin.
    pub fn world_position(&self, id: NodeId) -> Result<Vec3, ViewError> {
        Ok(self.world_matrix(id)?.w_axis.truncate())
    }

    /// World-space orientation.
    pub fn world_rotation(&self, id: NodeId) -> Result<Quat, ViewError> {
        let mut node = self.node(id)?;
        let mut rotation = node.transform.rotation;
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            rotation = node.transform.rotation * rotation;
        }
        Ok(rotation.normalize())
    }

    /// Place the node origin at a world-space position.
    pub fn set_world_position(
        &mut self,
        id: NodeId,
        position: Vec3,
    ) -> Result<(), ViewError> {
        let local = match self.node(id)?.parent {
            Some(parent) => {
                self.world_matrix(parent)?.inverse().transform_point3(position)
            }
            None => position,
        };
        self.node_mut(id)?.transform.translation = local;
        Ok(())
    }

    /// Move along the node's own Z axis.
    pub fn translate_z(&mut self, id: NodeId, distance: f32) -> Result<(), ViewError> {
        self.node_mut(id)?
            .transform
            .translate_on_axis(Vec3::Z, distance);
        Ok(())
    }

    /// Rotate about the node's own X axis.
    pub fn rotate_x(&mut self, id: NodeId, angle: f32) -> Result<(), ViewError> {
        self.node_mut(id)?.transform.rotate_on_axis(Vec3::X, angle);
        Ok(())
    }

    /// Rotate about the node's own Y axis.
    pub fn rotate_y(&mut self, id: NodeId, angle: f32) -> Result<(), ViewError> {
        self.node_mut(id)?.transform.rotate_on_axis(Vec3::Y, angle);
        Ok(())
    }

    /// Turn the node to face a world-space point.
    ///
    /// Ordinary nodes aim +Z at the target; nodes flagged
    /// [`NodeFlags::CAMERA`] aim −Z, which is the direction a camera looks.
    pub fn look_at(&mut self, id: NodeId, target: Vec3) -> Result<(), ViewError> {
        let position = self.world_position(id)?;
        let node = self.node(id)?;
        let world = if node.flags.contains(NodeFlags::CAMERA) {
            look_rotation(position, target, Vec3::Y)
        } else {
            look_rotation(target, position, Vec3::Y)
        };
        let local = match node.parent {
            Some(parent) => self.world_rotation(parent)?.inverse() * world,
            None => world,
        };
        self.node_mut(id)?.transform.rotation = local.normalize();
        Ok(())
    }

    // -- Internals --------------------------------------------------------

    fn check_reparent(&self, parent: NodeId, child: NodeId) -> Result<(), ViewError> {
        let _ = self.node(parent)?;
        let _ = self.node(child)?;
        if child == self.root {
            return Err(ViewError::RootRemoval);
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(ViewError::InvalidParent {
                node: child,
                parent,
            });
        }
        Ok(())
    }

    fn relink(&mut self, parent: NodeId, child: NodeId) -> Result<(), ViewError> {
        if let Some(old) = self.node(child)?.parent {
            self.node_mut(old)?.children.retain(|&c| c != child);
        }
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    fn unindex_name(&mut self, name: &str, id: NodeId) {
        if let Some(ids) = self.names.get_mut(name) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                let _ = self.names.remove(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn graph_with_chain() -> (SceneGraph, NodeId, NodeId) {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph
            .spawn(
                root,
                "a",
                Transform::from_translation(Vec3::new(10.0, 0.0, 0.0))
                    .with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
            )
            .unwrap();
        let b = graph
            .spawn(a, "b", Transform::from_translation(Vec3::new(0.0, 0.0, 2.0)))
            .unwrap();
        (graph, a, b)
    }

    #[test]
    fn world_position_composes_parent_chain() {
        let (graph, _, b) = graph_with_chain();
        // Local +Z of `a` is world +X.
        let p = graph.world_position(b).unwrap();
        assert!(p.abs_diff_eq(Vec3::new(12.0, 0.0, 0.0), 1e-5), "{p}");
    }

    #[test]
    fn attach_preserves_world_transform() {
        let (mut graph, a, b) = graph_with_chain();
        let before = graph.world_matrix(b).unwrap();
        graph.attach(graph.root(), b).unwrap();
        assert_eq!(graph.parent(b).unwrap(), Some(graph.root()));
        assert!(!graph.node(a).unwrap().children().contains(&b));
        let after = graph.world_matrix(b).unwrap();
        assert!(after.abs_diff_eq(before, 1e-5));
    }

    #[test]
    fn add_preserves_local_transform() {
        let (mut graph, _, b) = graph_with_chain();
        let local = graph.node(b).unwrap().transform;
        graph.add(graph.root(), b).unwrap();
        assert_eq!(graph.node(b).unwrap().transform, local);
        let p = graph.world_position(b).unwrap();
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-6));
    }

    #[test]
    fn cycles_are_rejected() {
        let (mut graph, a, b) = graph_with_chain();
        assert!(matches!(
            graph.attach(b, a),
            Err(ViewError::InvalidParent { .. })
        ));
        assert!(matches!(graph.add(a, a), Err(ViewError::InvalidParent { .. })));
        assert!(matches!(
            graph.add(a, graph.root()),
            Err(ViewError::RootRemoval)
        ));
        // Unchanged.
        assert_eq!(graph.parent(b).unwrap(), Some(a));
    }

    #[test]
    fn remove_drops_subtree_and_names() {
        let (mut graph, a, b) = graph_with_chain();
        assert_eq!(graph.len(), 3);
        graph.remove(a).unwrap();
        assert_eq!(graph.len(), 1);
        assert!(!graph.contains(b));
        assert!(graph.find_by_name("b").is_none());
        assert!(matches!(graph.node(a), Err(ViewError::UnknownNode(_))));
        assert!(matches!(graph.remove(graph.root()), Err(ViewError::RootRemoval)));
        assert!(graph.node(graph.root()).unwrap().children().is_empty());
    }

    #[test]
    fn rename_updates_index() {
        let (mut graph, a, _) = graph_with_chain();
        graph.set_name(a, "pivot").unwrap();
        assert_eq!(graph.find_by_name("pivot"), Some(a));
        assert!(graph.find_by_name("a").is_none());
        assert_eq!(graph.node(a).unwrap().name(), "pivot");
    }

    #[test]
    fn descendants_are_depth_first() {
        let (mut graph, a, b) = graph_with_chain();
        let c = graph.add_node(a, "c").unwrap();
        let d = graph.add_node(b, "d").unwrap();
        assert_eq!(graph.descendants(a).unwrap(), vec![a, b, d, c]);
    }

    #[test]
    fn look_at_respects_parent_rotation() {
        let (mut graph, _, b) = graph_with_chain();
        graph.look_at(b, Vec3::new(12.0, 5.0, 5.0)).unwrap();
        let forward = graph.world_rotation(b).unwrap() * Vec3::Z;
        let expected = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert!(forward.abs_diff_eq(expected, 1e-5), "{forward}");
    }

    #[test]
    fn camera_look_at_aims_negative_z() {
        let mut graph = SceneGraph::new();
        let cam = graph
            .spawn(
                graph.root(),
                "camera",
                Transform::from_translation(Vec3::new(0.0, 0.0, 5.0)),
            )
            .unwrap();
        graph.node_mut(cam).unwrap().flags.insert(NodeFlags::CAMERA);
        graph.look_at(cam, Vec3::new(5.0, 0.0, 5.0)).unwrap();
        let forward = graph.world_rotation(cam).unwrap() * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::X, 1e-5), "{forward}");
    }

    #[test]
    fn set_world_position_converts_into_parent_space() {
        let (mut graph, a, _) = graph_with_chain();
        let child = graph.add_node(a, "child").unwrap();
        graph.set_world_position(child, Vec3::new(1.0, 2.0, 3.0)).unwrap();
        let p = graph.world_position(child).unwrap();
        assert!(p.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
    }
}
