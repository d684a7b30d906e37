//! Pointer-driven camera controls.
//!
//! [`ViewControls`] adds a two-node rig to the scene: a *pivot* that yaws
//! and an *outer* child that pitches. Alt-clicking an object turns the
//! camera toward the picked point over a few frames, then moves the pivot
//! to that point and attaches the camera to the outer node, so that
//! dragging orbits and dollies around it. Escape detaches the camera again
//! and eases it back to the pose it had when the controls were created.
//!
//! The controls never own the scene graph or a clock. Hosts pass the graph
//! into every call, feed [`InputEvent`]s through
//! [`handle_event`](ViewControls::handle_event), apply the returned
//! [`Response`], and call [`update`](ViewControls::update) once per frame.

mod animation;
mod response;
mod stage;

use glam::{Quat, Vec2, Vec3};

pub use animation::Animation;
pub use response::{ControlEvent, PointerLock, Response};
pub use stage::Stage;

use crate::camera::Camera;
use crate::error::ViewError;
use crate::input::{
    InputEvent, KeyAction, Listener, ListenerSet, Modifiers, MouseButton,
};
use crate::options::Options;
use crate::picking::{PointerPosition, RaycasterHelper};
use crate::scene::{NodeFlags, NodeId, SceneGraph, Transform};
use crate::util::{clamp_symmetric, look_rotation};

/// Name of the pitch node under the pivot.
pub const OUTER_NODE_NAME: &str = "outer";

/// Nodes that picking skips when a pointer goes down.
pub const PICK_IGNORE: NodeFlags = NodeFlags::TRANSFORM_GIZMO;

/// Camera pose the reset animation returns to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomePose {
    /// Parent the camera is re-attached to when focus is released.
    pub parent: NodeId,
    /// Position in `parent`'s space.
    pub translation: Vec3,
    /// Orientation in `parent`'s space.
    pub rotation: Quat,
}

/// Look-around, focus, dolly and reset controls for one camera.
#[derive(Debug, Clone)]
pub struct ViewControls {
    pivot: NodeId,
    outer: NodeId,
    camera: Camera,
    home: HomePose,
    options: Options,
    ray: RaycasterHelper,
    listeners: ListenerSet,
    focused: bool,
    focus_increment: f32,
    focus_iterations: u32,
    focus_rotation: Quat,
    animation: Option<Animation>,
}

impl ViewControls {
    /// Add the pivot rig under the scene root and capture the camera's
    /// current local pose as home.
    pub fn new(
        graph: &mut SceneGraph,
        camera: Camera,
        options: Options,
    ) -> Result<Self, ViewError> {
        let root = graph.root();
        let camera_node = graph.node(camera.node)?;
        let home = HomePose {
            parent: camera_node.parent().unwrap_or(root),
            translation: camera_node.transform.translation,
            rotation: camera_node.transform.rotation,
        };

        let pivot = graph.add_node(root, options.controls.name.clone())?;
        let outer = graph.add_node(pivot, OUTER_NODE_NAME)?;
        let listeners = ListenerSet::persistent(options.controls.auto_return);
        log::debug!(
            "view controls '{}' ready, camera home at {}",
            options.controls.name,
            home.translation
        );

        Ok(Self {
            pivot,
            outer,
            camera,
            home,
            options,
            ray: RaycasterHelper::new(),
            listeners,
            focused: false,
            focus_increment: 0.0,
            focus_iterations: 0,
            focus_rotation: Quat::IDENTITY,
            animation: None,
        })
    }

    // -- Accessors --------------------------------------------------------

    /// Yaw node positioned at the focus point.
    #[must_use]
    pub fn pivot(&self) -> NodeId {
        self.pivot
    }

    /// Pitch node the camera hangs from while focused.
    #[must_use]
    pub fn outer(&self) -> NodeId {
        self.outer
    }

    /// The controlled camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access (viewport changes, field of view).
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Pose the reset animation returns to.
    #[must_use]
    pub fn home(&self) -> &HomePose {
        &self.home
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options. Toggling `auto_return` installs or removes the
    /// reset key listener; a running look session is left alone.
    pub fn set_options(&mut self, options: Options) {
        if options.controls.auto_return {
            self.listeners.insert(Listener::KeyDown);
        } else {
            self.listeners.remove(Listener::KeyDown);
        }
        self.options = options;
    }

    /// Currently installed listeners.
    #[must_use]
    pub fn listeners(&self) -> ListenerSet {
        self.listeners
    }

    /// Whether the camera is attached to the orbit rig.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The armed animation, if any.
    #[must_use]
    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    /// Whether an animation is armed.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    // -- Event dispatch ---------------------------------------------------

    /// Route an input event to its handler.
    ///
    /// Events whose listener is not installed are ignored. Scene graph
    /// failures inside a handler are logged and reported as
    /// [`Response::IGNORED`]; they never reach the host's event loop. Wheel
    /// events suppress the platform default even when they fail.
    pub fn handle_event(
        &mut self,
        graph: &mut SceneGraph,
        event: InputEvent,
    ) -> Response {
        if !self.listeners.contains(event.listener()) {
            log::trace!("no listener for {event:?}");
            return Response::IGNORED;
        }

        let prevent_default = matches!(event, InputEvent::Wheel { .. });
        let result = match event {
            InputEvent::PointerDown {
                pointer,
                button,
                modifiers,
            } => self.handle_pointer_down(graph, pointer, button, modifiers),
            InputEvent::PointerMove {
                movement,
                modifiers,
            } => self.handle_pointer_move(graph, movement, modifiers),
            InputEvent::PointerUp { .. } => Ok(self.handle_pointer_up()),
            InputEvent::Wheel { delta_y } => self.handle_wheel(graph, delta_y),
            InputEvent::KeyDown { key } => self.handle_key_down(graph, &key),
            InputEvent::KeyUp { key } => Ok(self.handle_key_up(&key)),
            InputEvent::ContextMenu => Ok(Response::PREVENT_DEFAULT),
        };

        result.unwrap_or_else(|e| {
            log::warn!("view controls ignored an input event: {e}");
            Response {
                prevent_default,
                ..Response::IGNORED
            }
        })
    }

    /// Pick under the pointer. Alt + left starts a look session focused
    /// on the hit; plain left and right clicks are reported to the host.
    /// Presses that hit nothing are ignored.
    pub fn handle_pointer_down(
        &mut self,
        graph: &mut SceneGraph,
        pointer: PointerPosition,
        button: MouseButton,
        modifiers: Modifiers,
    ) -> Result<Response, ViewError> {
        let root = graph.root();
        let Some(hit) =
            self.ray
                .pick(pointer, root, graph, &self.camera, PICK_IGNORE)?
        else {
            return Ok(Response::IGNORED);
        };

        match button {
            MouseButton::Left if modifiers.alt => {
                self.listeners.install_transient();
                self.unfocus(graph)?;
                self.start_focus(graph, hit.point)?;
                Ok(Response::lock(PointerLock::Request))
            }
            MouseButton::Left => Ok(Response::emit(ControlEvent::LeftClick(hit))),
            MouseButton::Right => {
                Ok(Response::emit(ControlEvent::RightClick(hit)))
            }
            MouseButton::Middle => Ok(Response::IGNORED),
        }
    }

    /// Horizontal motion orbits; vertical motion dollies, or pitches while
    /// ctrl is held.
    pub fn handle_pointer_move(
        &mut self,
        graph: &mut SceneGraph,
        movement: Vec2,
        modifiers: Modifiers,
    ) -> Result<Response, ViewError> {
        let speed = self.options.controls.rotation_speed;
        if modifiers.ctrl {
            self.rotate(graph, movement.y * speed, movement.x * speed)?;
        } else {
            self.rotate(graph, 0.0, movement.x * speed)?;
            self.dolly(graph, movement.y * speed)?;
        }
        Ok(Response::CONSUMED)
    }

    /// Releasing the button ends the look session.
    pub fn handle_pointer_up(&mut self) -> Response {
        self.exit()
    }

    /// Dolly proportionally to the distance from the pivot. Works whether
    /// or not the camera is focused.
    pub fn handle_wheel(
        &mut self,
        graph: &mut SceneGraph,
        delta_y: f32,
    ) -> Result<Response, ViewError> {
        let distance = self.pivot_distance(graph)?;
        let amount = clamp_symmetric(
            delta_y * distance * self.options.controls.wheel_dolly_speed,
            self.options.controls.max_dolly_speed,
        );
        self.translate_camera(graph, amount)?;
        Ok(Response::PREVENT_DEFAULT)
    }

    /// The release-look key ends the look session.
    pub fn handle_key_up(&mut self, key: &str) -> Response {
        if self.options.keybindings.lookup(key) == Some(KeyAction::ReleaseLook) {
            self.exit()
        } else {
            Response::IGNORED
        }
    }

    /// The reset key drops focus and starts the return home.
    pub fn handle_key_down(
        &mut self,
        graph: &mut SceneGraph,
        key: &str,
    ) -> Result<Response, ViewError> {
        if self.options.keybindings.lookup(key) != Some(KeyAction::ResetView) {
            return Ok(Response::IGNORED);
        }
        self.unfocus(graph)?;
        let home = self.home;
        self.reset_camera(graph, home.translation, home.rotation)?;
        Ok(self.exit())
    }

    // -- Per-frame --------------------------------------------------------

    /// Advance the armed animation by one step.
    pub fn update(&mut self, graph: &mut SceneGraph) -> Result<(), ViewError> {
        match self.animation {
            Some(Animation::Focus { target }) => self.pan_to_object(graph, target),
            Some(Animation::Reset {
                translation,
                rotation,
            }) => self.reset_camera(graph, translation, rotation),
            None => Ok(()),
        }
    }

    // -- Camera operations ------------------------------------------------

    /// Orbit while focused: `y` yaws the pivot, `x` pitches the outer node.
    /// Positive values turn toward negative angles, so dragging right
    /// swings the view right.
    pub fn rotate(
        &mut self,
        graph: &mut SceneGraph,
        x: f32,
        y: f32,
    ) -> Result<(), ViewError> {
        if self.focused {
            graph.rotate_y(self.pivot, -y)?;
            graph.rotate_x(self.outer, -x)?;
        }
        Ok(())
    }

    /// Move toward (negative) or away from (positive) the pivot while
    /// focused, by `y` times the current distance.
    pub fn dolly(&mut self, graph: &mut SceneGraph, y: f32) -> Result<(), ViewError> {
        if self.focused {
            let distance = self.pivot_distance(graph)?;
            let amount =
                clamp_symmetric(y * distance, self.options.controls.max_dolly_speed);
            self.translate_camera(graph, amount)?;
        }
        Ok(())
    }

    /// Begin turning the camera toward a world-space point. The first step
    /// runs immediately; the rest run from [`update`](Self::update).
    pub fn start_focus(
        &mut self,
        graph: &mut SceneGraph,
        point: Vec3,
    ) -> Result<(), ViewError> {
        self.focus_iterations = 0;
        let eye = graph.world_position(self.camera.node)?;
        let world = look_rotation(eye, point, self.camera.up);
        let parent_rotation = match graph.parent(self.camera.node)? {
            Some(parent) => graph.world_rotation(parent)?,
            None => Quat::IDENTITY,
        };
        self.focus_rotation = (parent_rotation.inverse() * world).normalize();
        log::debug!("focusing {point} from {eye}");
        self.pan_to_object(graph, point)
    }

    /// Drop focus and hand the camera back to its home parent, keeping it
    /// where it is on screen.
    pub fn unfocus(&mut self, graph: &mut SceneGraph) -> Result<(), ViewError> {
        self.focus_increment = 0.0;
        self.focused = false;
        if graph.parent(self.camera.node)? != Some(self.home.parent) {
            graph.attach(self.home.parent, self.camera.node)?;
        }
        Ok(())
    }

    /// End the look session: remove the motion/release listeners and ask
    /// the host to release the pointer.
    pub fn exit(&mut self) -> Response {
        self.listeners.remove_transient();
        Response::lock(PointerLock::Exit)
    }

    /// Take the camera's current pose as the new home, expressed in the
    /// home parent's space.
    pub fn save_home(&mut self, graph: &SceneGraph) -> Result<(), ViewError> {
        let camera_world = graph.world_matrix(self.camera.node)?;
        let parent_world = graph.world_matrix(self.home.parent)?;
        let local = Transform::from_matrix(parent_world.inverse() * camera_world);
        self.home.translation = local.translation;
        self.home.rotation = local.rotation;
        Ok(())
    }

    /// Detach the camera from the rig and remove the rig from the scene.
    pub fn dispose(mut self, graph: &mut SceneGraph) -> Result<(), ViewError> {
        self.unfocus(graph)?;
        let _ = self.exit();
        graph.remove(self.pivot)
    }

    // -- Internals --------------------------------------------------------

    /// Distance between the camera's and the outer node's local origins.
    /// While focused both share the pivot frame, so this is the orbit
    /// radius.
    fn pivot_distance(&self, graph: &SceneGraph) -> Result<f32, ViewError> {
        let camera = graph.node(self.camera.node)?.transform.translation;
        let outer = graph.node(self.outer)?.transform.translation;
        Ok(camera.distance(outer))
    }

    /// Move the camera along its own Z axis. The camera's local z never
    /// goes below zero, so while focused it cannot pass through the pivot.
    fn translate_camera(
        &mut self,
        graph: &mut SceneGraph,
        amount: f32,
    ) -> Result<(), ViewError> {
        graph.translate_z(self.camera.node, amount)?;
        let translation = &mut graph.node_mut(self.camera.node)?.transform.translation;
        translation.z = translation.z.max(0.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CameraOptions;
    use crate::scene::Shape;
    use crate::util::NearlyEqual;

    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 600.0;

    struct Fixture {
        graph: SceneGraph,
        controls: ViewControls,
        sphere: NodeId,
    }

    fn fixture_with(options: Options, radius: f32) -> Fixture {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let sphere = graph
            .spawn(root, "sphere", Transform::IDENTITY)
            .unwrap();
        graph.node_mut(sphere).unwrap().shape = Some(Shape::Sphere { radius });
        let mut camera =
            Camera::spawn(&mut graph, root, &CameraOptions::default()).unwrap();
        camera.set_viewport(WIDTH, HEIGHT);
        graph.node_mut(camera.node).unwrap().transform.translation =
            Vec3::new(0.0, 0.0, 10.0);
        let controls = ViewControls::new(&mut graph, camera, options).unwrap();
        Fixture {
            graph,
            controls,
            sphere,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(Options::default(), 1.0)
    }

    fn pointer(x: f32, y: f32) -> PointerPosition {
        PointerPosition {
            x,
            y,
            width: WIDTH,
            height: HEIGHT,
        }
    }

    fn press(button: MouseButton, modifiers: Modifiers) -> InputEvent {
        InputEvent::PointerDown {
            pointer: pointer(WIDTH / 2.0, HEIGHT / 2.0),
            button,
            modifiers,
        }
    }

    fn motion(x: f32, y: f32, modifiers: Modifiers) -> InputEvent {
        InputEvent::PointerMove {
            movement: Vec2::new(x, y),
            modifiers,
        }
    }

    fn key_down(key: &str) -> InputEvent {
        InputEvent::KeyDown { key: key.into() }
    }

    fn key_up(key: &str) -> InputEvent {
        InputEvent::KeyUp { key: key.into() }
    }

    impl Fixture {
        fn send(&mut self, event: InputEvent) -> Response {
            self.controls.handle_event(&mut self.graph, event)
        }

        fn camera_local(&self) -> Transform {
            self.graph
                .node(self.controls.camera().node)
                .unwrap()
                .transform
        }

        fn camera_world(&self) -> Vec3 {
            self.graph
                .world_position(self.controls.camera().node)
                .unwrap()
        }

        fn run_animation(&mut self, max_frames: usize) -> usize {
            let mut frames = 0;
            while self.controls.is_animating() && frames < max_frames {
                self.controls.update(&mut self.graph).unwrap();
                frames += 1;
            }
            frames
        }

        /// Alt-click the sphere at the centre of the view.
        fn focus_centre(&mut self) {
            let response = self.send(press(MouseButton::Left, Modifiers::ALT));
            assert_eq!(response.pointer_lock, Some(PointerLock::Request));
            assert!(self.controls.is_focused());
        }
    }

    #[test]
    fn new_adds_pivot_rig_and_captures_home() {
        let f = fixture();
        let pivot = f.graph.node(f.controls.pivot()).unwrap();
        assert_eq!(pivot.name(), "viewControls");
        assert_eq!(pivot.parent(), Some(f.graph.root()));
        assert_eq!(f.graph.parent(f.controls.outer()).unwrap(), Some(f.controls.pivot()));
        assert_eq!(f.graph.find_by_name(OUTER_NODE_NAME), Some(f.controls.outer()));

        let home = f.controls.home();
        assert_eq!(home.parent, f.graph.root());
        assert_eq!(home.translation, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(home.rotation, Quat::IDENTITY);

        assert!(!f.controls.is_focused());
        assert!(!f.controls.is_animating());
        assert_eq!(f.controls.listeners(), ListenerSet::persistent(true));
    }

    #[test]
    fn pivot_takes_configured_name() {
        let mut options = Options::default();
        options.controls.name = "orbit".into();
        let f = fixture_with(options, 1.0);
        assert_eq!(f.graph.find_by_name("orbit"), Some(f.controls.pivot()));
    }

    #[test]
    fn alt_click_focuses_straight_ahead_in_one_step() {
        let mut f = fixture();
        f.focus_centre();

        assert!(!f.controls.is_animating());
        assert!(f.controls.listeners().is_looking());
        let pivot = f.graph.world_position(f.controls.pivot()).unwrap();
        assert!(pivot.nearly_equal(&Vec3::new(0.0, 0.0, 1.0), 1e-4));
        assert_eq!(
            f.graph.parent(f.controls.camera().node).unwrap(),
            Some(f.controls.outer())
        );
        // Attaching keeps the camera where it was.
        assert!(f.camera_world().nearly_equal(&Vec3::new(0.0, 0.0, 10.0), 1e-4));
        assert!(f.camera_local().translation.nearly_equal(&Vec3::new(0.0, 0.0, 9.0), 1e-4));
    }

    #[test]
    fn off_axis_focus_turns_over_several_frames() {
        let mut f = fixture_with(Options::default(), 4.0);
        let response = f.send(InputEvent::PointerDown {
            pointer: pointer(600.0, HEIGHT / 2.0),
            button: MouseButton::Left,
            modifiers: Modifiers::ALT,
        });
        assert_eq!(response.pointer_lock, Some(PointerLock::Request));
        assert!(!f.controls.is_focused());
        let Some(Animation::Focus { target }) = f.controls.animation().copied() else {
            panic!("expected a focus animation");
        };
        assert!(target.x > 0.0);

        let frames = f.run_animation(100);
        let max = f.controls.options().focus.max_iterations as usize;
        assert!(frames >= 1 && frames <= max);
        assert!(f.controls.is_focused());
        assert!(!f.controls.is_animating());

        let pivot = f.graph.world_position(f.controls.pivot()).unwrap();
        assert!(pivot.nearly_equal(&target, 1e-3));
        assert!(f.camera_world().nearly_equal(&Vec3::new(0.0, 0.0, 10.0), 1e-3));

        // The camera now looks at the focus point.
        let forward = f.graph.world_rotation(f.controls.camera().node).unwrap() * Vec3::NEG_Z;
        let to_target = (target - f.camera_world()).normalize();
        assert!(forward.dot(to_target) > 0.99);
    }

    #[test]
    fn plain_clicks_are_reported() {
        let mut f = fixture();
        let response = f.send(press(MouseButton::Left, Modifiers::default()));
        assert!(response.consumed);
        let Some(ControlEvent::LeftClick(hit)) = response.event else {
            panic!("expected a left click");
        };
        assert_eq!(hit.node, f.sphere);
        assert!((hit.distance - 9.0).abs() < 1e-3);
        assert!(!f.controls.is_focused());
        assert!(!f.controls.listeners().is_looking());

        let response = f.send(press(MouseButton::Right, Modifiers::default()));
        assert!(matches!(response.event, Some(ControlEvent::RightClick(_))));
        assert_eq!(response.event.unwrap().intersection().node, f.sphere);

        let response = f.send(press(MouseButton::Middle, Modifiers::ALT));
        assert_eq!(response, Response::IGNORED);
    }

    #[test]
    fn clicks_on_empty_space_are_ignored() {
        let mut f = fixture();
        let response = f.send(InputEvent::PointerDown {
            pointer: pointer(0.0, 0.0),
            button: MouseButton::Left,
            modifiers: Modifiers::ALT,
        });
        assert_eq!(response, Response::IGNORED);
        assert!(!f.controls.listeners().is_looking());
    }

    #[test]
    fn gizmo_nodes_do_not_block_picking() {
        let mut f = fixture();
        let root = f.graph.root();
        let gizmo = f
            .graph
            .spawn(root, "gizmo", Transform::from_translation(Vec3::new(0.0, 0.0, 5.0)))
            .unwrap();
        let node = f.graph.node_mut(gizmo).unwrap();
        node.shape = Some(Shape::Sphere { radius: 0.5 });
        node.flags.insert(NodeFlags::TRANSFORM_GIZMO);

        let response = f.send(press(MouseButton::Left, Modifiers::default()));
        assert_eq!(response.event.unwrap().intersection().node, f.sphere);
    }

    #[test]
    fn motion_is_ignored_outside_a_look_session() {
        let mut f = fixture();
        let before = f.camera_local();
        assert_eq!(f.send(motion(50.0, 50.0, Modifiers::default())), Response::IGNORED);
        assert_eq!(f.send(InputEvent::PointerUp { button: MouseButton::Left }), Response::IGNORED);
        assert_eq!(f.send(key_up("Alt")), Response::IGNORED);
        assert_eq!(f.camera_local(), before);
    }

    #[test]
    fn horizontal_motion_orbits_the_pivot() {
        let mut f = fixture();
        f.focus_centre();

        let response = f.send(motion(100.0, 0.0, Modifiers::default()));
        assert_eq!(response, Response::CONSUMED);

        let pivot = f.graph.node(f.controls.pivot()).unwrap().transform.rotation;
        assert!(pivot.nearly_equal(&Quat::from_rotation_y(-0.5), 1e-4));

        let centre = f.graph.world_position(f.controls.pivot()).unwrap();
        let eye = f.camera_world();
        assert!((eye.distance(centre) - 9.0).abs() < 1e-3);
        assert!((eye.x - 9.0 * (-0.5f32).sin()).abs() < 1e-3);
    }

    #[test]
    fn ctrl_motion_pitches_the_outer_node() {
        let mut f = fixture();
        f.focus_centre();

        let _ = f.send(motion(0.0, 100.0, Modifiers::CTRL));
        let outer = f.graph.node(f.controls.outer()).unwrap().transform.rotation;
        assert!(outer.nearly_equal(&Quat::from_rotation_x(-0.5), 1e-4));
        // Pitching does not change the orbit radius.
        assert!(f.camera_local().translation.nearly_equal(&Vec3::new(0.0, 0.0, 9.0), 1e-4));
    }

    #[test]
    fn vertical_motion_dollies_relative_to_distance() {
        let mut f = fixture();
        f.focus_centre();

        let _ = f.send(motion(0.0, 100.0, Modifiers::default()));
        // 100 px * 0.005 * 9 units
        assert!((f.camera_local().translation.z - 13.5).abs() < 1e-3);
    }

    #[test]
    fn dolly_cannot_pass_through_the_pivot() {
        let mut f = fixture();
        f.focus_centre();

        f.controls.dolly(&mut f.graph, -5.0).unwrap();
        assert_eq!(f.camera_local().translation.z, 0.0);
    }

    #[test]
    fn rotate_and_dolly_need_focus() {
        let mut f = fixture();
        let before = f.camera_local();
        f.controls.rotate(&mut f.graph, 1.0, 1.0).unwrap();
        f.controls.dolly(&mut f.graph, 1.0).unwrap();
        assert_eq!(f.camera_local(), before);
        let pivot = f.graph.node(f.controls.pivot()).unwrap().transform;
        assert_eq!(pivot, Transform::IDENTITY);
    }

    #[test]
    fn wheel_dollies_without_focus() {
        let mut f = fixture();
        let response = f.send(InputEvent::Wheel { delta_y: 100.0 });
        assert!(response.prevent_default);
        // 100 * 10 units * 0.03
        assert!((f.camera_local().translation.z - 40.0).abs() < 1e-3);
    }

    #[test]
    fn wheel_stops_at_zero_depth_without_focus() {
        let mut f = fixture();
        // -100 * 10 units * 0.03 would carry the camera to z = -20.
        let response = f.send(InputEvent::Wheel { delta_y: -100.0 });
        assert!(response.prevent_default);
        assert!(!f.controls.is_focused());
        assert_eq!(f.camera_local().translation.z, 0.0);
    }

    #[test]
    fn wheel_step_is_clamped() {
        let mut options = Options::default();
        options.controls.max_dolly_speed = Some(5.0);
        let mut f = fixture_with(options, 1.0);

        let _ = f.send(InputEvent::Wheel { delta_y: 100.0 });
        assert!((f.camera_local().translation.z - 15.0).abs() < 1e-4);
        let _ = f.send(InputEvent::Wheel { delta_y: -100.0 });
        assert!((f.camera_local().translation.z - 10.0).abs() < 1e-4);
    }

    #[test]
    fn pointer_up_and_alt_release_end_the_session() {
        let mut f = fixture();
        f.focus_centre();
        let response = f.send(InputEvent::PointerUp { button: MouseButton::Left });
        assert_eq!(response.pointer_lock, Some(PointerLock::Exit));
        assert!(!f.controls.listeners().is_looking());
        // Focus survives the end of the drag.
        assert!(f.controls.is_focused());

        f.focus_centre();
        assert_eq!(f.send(key_up("a")), Response::IGNORED);
        assert!(f.controls.listeners().is_looking());
        let response = f.send(key_up("Alt"));
        assert_eq!(response.pointer_lock, Some(PointerLock::Exit));
        assert!(!f.controls.listeners().is_looking());
    }

    #[test]
    fn escape_returns_home() {
        let mut f = fixture();
        f.focus_centre();
        let _ = f.send(motion(120.0, 60.0, Modifiers::default()));
        assert!(!f.camera_world().nearly_equal(&Vec3::new(0.0, 0.0, 10.0), 0.1));

        let response = f.send(key_down("Escape"));
        assert_eq!(response.pointer_lock, Some(PointerLock::Exit));
        assert!(!f.controls.is_focused());
        assert_eq!(
            f.graph.parent(f.controls.camera().node).unwrap(),
            Some(f.graph.root())
        );
        assert!(matches!(f.controls.animation(), Some(Animation::Reset { .. })));

        let _ = f.run_animation(1000);
        assert!(!f.controls.is_animating());
        let local = f.camera_local();
        assert_eq!(local.translation, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(local.rotation, Quat::IDENTITY);
    }

    #[test]
    fn other_keys_do_not_reset() {
        let mut f = fixture();
        f.focus_centre();
        assert_eq!(f.send(key_down("r")), Response::IGNORED);
        assert!(f.controls.is_focused());
    }

    #[test]
    fn rebound_reset_key_is_honoured() {
        let mut options = Options::default();
        options.keybindings.bind(KeyAction::ResetView, "Home");
        let mut f = fixture_with(options, 1.0);
        f.focus_centre();
        assert_eq!(f.send(key_down("Escape")), Response::IGNORED);
        assert!(f.send(key_down("Home")).consumed);
        assert!(!f.controls.is_focused());
    }

    #[test]
    fn reset_key_needs_auto_return() {
        let mut options = Options::default();
        options.controls.auto_return = false;
        let mut f = fixture_with(options.clone(), 1.0);
        f.focus_centre();
        assert_eq!(f.send(key_down("Escape")), Response::IGNORED);
        assert!(f.controls.is_focused());

        options.controls.auto_return = true;
        f.controls.set_options(options);
        assert!(f.controls.listeners().contains(Listener::KeyDown));
        assert!(f.send(key_down("Escape")).consumed);
    }

    #[test]
    fn save_home_moves_the_reset_target() {
        let mut f = fixture();
        let _ = f.send(InputEvent::Wheel { delta_y: 10.0 });
        f.controls.save_home(&f.graph).unwrap();
        assert!((f.controls.home().translation.z - 13.0).abs() < 1e-4);

        let _ = f.send(InputEvent::Wheel { delta_y: 50.0 });
        let _ = f.send(key_down("Escape"));
        let _ = f.run_animation(1000);
        assert!((f.camera_local().translation.z - 13.0).abs() < 1e-4);
    }

    #[test]
    fn context_menu_is_suppressed() {
        let mut f = fixture();
        let response = f.send(InputEvent::ContextMenu);
        assert!(response.prevent_default);
    }

    #[test]
    fn graph_errors_are_swallowed() {
        let mut f = fixture();
        let camera = f.controls.camera().node;
        f.graph.remove(camera).unwrap();
        assert_eq!(f.send(press(MouseButton::Left, Modifiers::ALT)), Response::IGNORED);

        // The page must not scroll even though the dolly failed.
        let response = f.send(InputEvent::Wheel { delta_y: 10.0 });
        assert!(!response.consumed);
        assert!(response.prevent_default);
        assert_eq!(response.pointer_lock, None);
    }

    #[test]
    fn dispose_removes_the_rig_and_keeps_the_camera() {
        let mut f = fixture();
        f.focus_centre();
        let pivot = f.controls.pivot();
        let outer = f.controls.outer();
        let camera = f.controls.camera().node;

        f.controls.clone().dispose(&mut f.graph).unwrap();
        assert!(!f.graph.contains(pivot));
        assert!(!f.graph.contains(outer));
        assert_eq!(f.graph.parent(camera).unwrap(), Some(f.graph.root()));
        assert!(f.camera_world().nearly_equal(&Vec3::new(0.0, 0.0, 10.0), 1e-4));
    }
}
