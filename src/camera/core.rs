use glam::{Mat4, Vec2, Vec3};

use crate::error::ViewError;
use crate::options::CameraOptions;
use crate::picking::Ray;
use crate::scene::{NodeFlags, NodeId, SceneGraph};

/// Name given to nodes created by [`Camera::spawn`].
pub const CAMERA_NODE_NAME: &str = "camera";

/// Perspective projection attached to a scene node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Node carrying the camera's transform.
    pub node: NodeId,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Up direction used when aiming the camera.
    pub up: Vec3,
}

impl Camera {
    /// Wrap an existing node. The node is flagged as a camera so that
    /// [`SceneGraph::look_at`] aims its −Z axis.
    pub fn from_node(
        graph: &mut SceneGraph,
        node: NodeId,
        options: &CameraOptions,
    ) -> Result<Self, ViewError> {
        graph.node_mut(node)?.flags.insert(NodeFlags::CAMERA);
        Ok(Self {
            node,
            fovy: options.fovy,
            aspect: 1.0,
            znear: options.znear,
            zfar: options.zfar,
            up: Vec3::Y,
        })
    }

    /// Create a new camera node under `parent`.
    pub fn spawn(
        graph: &mut SceneGraph,
        parent: NodeId,
        options: &CameraOptions,
    ) -> Result<Self, ViewError> {
        let node = graph.add_node(parent, CAMERA_NODE_NAME)?;
        Self::from_node(graph, node, options)
    }

    /// Update the aspect ratio from a viewport size. Zero-sized viewports
    /// are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Projection matrix (right-handed, OpenGL depth range).
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self, graph: &SceneGraph) -> Result<Mat4, ViewError> {
        Ok(graph.world_matrix(self.node)?.inverse())
    }

    /// Ray from the camera position through a point in normalized device
    /// coordinates (`[-1, 1]` on both axes, +Y up).
    pub fn ray_from_ndc(
        &self,
        graph: &SceneGraph,
        ndc: Vec2,
    ) -> Result<Ray, ViewError> {
        let world = graph.world_matrix(self.node)?;
        let origin = world.w_axis.truncate();
        let view_point = self
            .projection()
            .inverse()
            .project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        let through = world.transform_point3(view_point);
        Ok(Ray::new(origin, through - origin))
    }
}
