//! Standalone demo window backed by winit.
//!
//! The window shows no pixels of its own; it exists to drive the controls
//! with real mouse and keyboard input. The camera pose is printed in the
//! title bar and click events are logged, which is enough to exercise the
//! look, orbit, dolly and reset behaviour against a small demo scene.
//!
//! ```no_run
//! # use view_controls::Viewer;
//! Viewer::builder()
//!     .with_title("Controls demo")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{sync::Arc, time::Duration};

use glam::{Vec2, Vec3};
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::{
    controls::{ControlEvent, PointerLock, Response, Stage},
    error::ViewError,
    input::{InputEvent, Modifiers, MouseButton},
    options::Options,
    picking::PointerPosition,
    scene::{Shape, Transform, TriangleMesh},
};

/// Browsers report roughly this many pixels per wheel notch.
const PIXELS_PER_LINE: f32 = 100.0;

/// How often the title bar is refreshed.
const TITLE_INTERVAL: Duration = Duration::from_millis(100);

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with default options and the title "View Controls".
    fn new() -> Self {
        Self {
            options: None,
            title: "View Controls".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title prefix.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window driving [`Stage`] controls over a demo scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), ViewError> {
        let stage = demo_stage(self.options)?;
        let event_loop =
            EventLoop::new().map_err(|e| ViewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            stage,
            title: self.title,
            cursor: PhysicalPosition::new(0.0, 0.0),
            modifiers: Modifiers::default(),
            last_title_update: Instant::now(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewError::Viewer(e.to_string()))
    }
}

/// A ground plane with a few objects to pick and orbit.
fn demo_stage(options: Options) -> Result<Stage, ViewError> {
    let mut stage =
        Stage::looking_at(Vec3::new(0.0, 4.0, 12.0), Vec3::ZERO, options)?;
    let _ = stage.add_object(
        "ground",
        Shape::Mesh(TriangleMesh::plane(40.0, 40.0)),
        Transform::from_translation(Vec3::new(0.0, -1.0, 0.0)),
    )?;
    let _ = stage.add_object(
        "red ball",
        Shape::Sphere { radius: 1.0 },
        Transform::IDENTITY,
    )?;
    let _ = stage.add_object(
        "green ball",
        Shape::Sphere { radius: 0.6 },
        Transform::from_translation(Vec3::new(-3.5, -0.4, -2.0)),
    )?;
    let _ = stage.add_object(
        "crate",
        Shape::Cuboid {
            half_extents: Vec3::splat(0.8),
        },
        Transform::from_translation(Vec3::new(3.5, -0.2, 1.0)),
    )?;
    Ok(stage)
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    stage: Stage,
    title: String,
    /// Last cursor position in physical pixels.
    cursor: PhysicalPosition<f64>,
    modifiers: Modifiers,
    last_title_update: Instant,
}

impl ViewerApp {
    fn dispatch(&mut self, event: InputEvent) {
        let response = self.stage.handle_event(event);
        self.apply(response);
    }

    fn apply(&self, response: Response) {
        if let (Some(lock), Some(window)) = (response.pointer_lock, &self.window)
        {
            apply_pointer_lock(window, lock);
        }
        if let Some(event) = response.event {
            self.log_click(&event);
        }
    }

    fn log_click(&self, event: &ControlEvent) {
        let hit = event.intersection();
        let name = self
            .stage
            .graph
            .node(hit.node)
            .map(|n| n.name().to_owned())
            .unwrap_or_default();
        match event {
            ControlEvent::LeftClick(_) => {
                log::info!("left click on '{name}' at {:.2}", hit.point);
            }
            ControlEvent::RightClick(_) => {
                log::info!("right click on '{name}' at {:.2}", hit.point);
            }
        }
    }

    fn pointer(&self) -> Option<PointerPosition> {
        let size = self.window.as_ref()?.inner_size();
        Some(PointerPosition {
            x: self.cursor.x as f32,
            y: self.cursor.y as f32,
            width: size.width as f32,
            height: size.height as f32,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.stage.set_viewport(width as f32, height as f32);
    }

    fn refresh_title(&mut self, now: Instant) {
        if now.duration_since(self.last_title_update) < TITLE_INTERVAL {
            return;
        }
        self.last_title_update = now;
        let Some(window) = &self.window else {
            return;
        };
        let camera = self.stage.controls.camera().node;
        let Ok(eye) = self.stage.graph.world_position(camera) else {
            return;
        };
        let state = if self.stage.controls.is_focused() {
            "focused"
        } else if self.stage.controls.is_animating() {
            "moving"
        } else {
            "free"
        };
        window.set_title(&format!(
            "{} | camera ({:.2}, {:.2}, {:.2}) | {state}",
            self.title, eye.x, eye.y, eye.z
        ));
    }
}

fn apply_pointer_lock(window: &Window, lock: PointerLock) {
    match lock {
        PointerLock::Request => {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                log::warn!("pointer lock unavailable: {e}");
            }
            window.set_cursor_visible(false);
        }
        PointerLock::Exit => {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                log::warn!("failed to release pointer: {e}");
            }
            window.set_cursor_visible(true);
        }
    }
}

/// Map a winit logical key to a `KeyboardEvent.key` style name.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Named(NamedKey::Escape) => Some("Escape".into()),
        Key::Named(NamedKey::Alt) => Some("Alt".into()),
        Key::Named(named) => Some(format!("{named:?}")),
        Key::Character(c) => Some(c.to_string()),
        _ => None,
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 768));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        self.resize(inner.width.max(1), inner.height.max(1));
        window.request_redraw();
        self.window = Some(window);
        log::info!("alt-click an object to look around it, Escape to reset");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }
        if self.window.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                self.resize(size.width.max(1), size.height.max(1));
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.stage.update() {
                    log::warn!("controls update failed: {e}");
                }
                self.refresh_title(Instant::now());
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = position;
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let button = MouseButton::from(button);
                let event = match state {
                    ElementState::Pressed => {
                        let Some(pointer) = self.pointer() else {
                            return;
                        };
                        InputEvent::PointerDown {
                            pointer,
                            button,
                            modifiers: self.modifiers,
                        }
                    }
                    ElementState::Released => InputEvent::PointerUp { button },
                };
                self.dispatch(event);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scroll-up as positive; the DOM reports it as
                // negative.
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                self.dispatch(InputEvent::Wheel { delta_y });
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = Modifiers::from(modifiers.state());
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let Some(key) = key_name(&event.logical_key) else {
                    return;
                };
                let event = match event.state {
                    ElementState::Pressed if event.repeat => return,
                    ElementState::Pressed => InputEvent::KeyDown { key },
                    ElementState::Released => InputEvent::KeyUp { key },
                };
                self.dispatch(event);
            }

            WindowEvent::Focused(false) => {
                // Losing focus mid-drag would leave the cursor grabbed.
                if self.stage.controls.listeners().is_looking() {
                    let response = self.stage.controls.exit();
                    self.apply(response);
                }
            }

            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            let movement = Vec2::new(dx as f32, dy as f32);
            self.dispatch(InputEvent::PointerMove {
                movement,
                modifiers: self.modifiers,
            });
        }
    }
}
