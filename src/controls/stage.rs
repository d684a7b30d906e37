use glam::Vec3;

use super::{Response, ViewControls};
use crate::camera::Camera;
use crate::error::ViewError;
use crate::input::InputEvent;
use crate::options::Options;
use crate::scene::{NodeId, SceneGraph, Shape, Transform};

/// A scene graph together with the controls that drive its camera.
///
/// Hosts that hand events over from callbacks (the winit viewer, the DOM
/// binding) need a single owner for both halves; everyone else can keep
/// the graph and the controls separately.
#[derive(Debug, Clone)]
pub struct Stage {
    /// The scene.
    pub graph: SceneGraph,
    /// Controls bound to the scene's camera.
    pub controls: ViewControls,
}

impl Stage {
    /// Create an empty scene with a camera under the root at
    /// `camera_transform`, and controls for it.
    pub fn new(
        camera_transform: Transform,
        options: Options,
    ) -> Result<Self, ViewError> {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let camera = Camera::spawn(&mut graph, root, &options.camera)?;
        graph.node_mut(camera.node)?.transform = camera_transform;
        let controls = ViewControls::new(&mut graph, camera, options)?;
        Ok(Self { graph, controls })
    }

    /// Create a stage whose camera sits at `eye` looking at `target`.
    pub fn looking_at(
        eye: Vec3,
        target: Vec3,
        options: Options,
    ) -> Result<Self, ViewError> {
        let mut stage = Self::new(Transform::from_translation(eye), options)?;
        let camera = stage.controls.camera().node;
        stage.graph.look_at(camera, target)?;
        stage.controls.save_home(&stage.graph)?;
        Ok(stage)
    }

    /// Add a pickable object under the scene root.
    pub fn add_object(
        &mut self,
        name: &str,
        shape: Shape,
        transform: Transform,
    ) -> Result<NodeId, ViewError> {
        let root = self.graph.root();
        let id = self.graph.spawn(root, name, transform)?;
        self.graph.node_mut(id)?.shape = Some(shape);
        Ok(id)
    }

    /// Forward an input event to the controls.
    pub fn handle_event(&mut self, event: InputEvent) -> Response {
        self.controls.handle_event(&mut self.graph, event)
    }

    /// Advance the controls' animation by one frame.
    pub fn update(&mut self) -> Result<(), ViewError> {
        self.controls.update(&mut self.graph)
    }

    /// Resize the camera viewport.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.controls.camera_mut().set_viewport(width, height);
    }
}
