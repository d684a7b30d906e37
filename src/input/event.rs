use glam::Vec2;

use crate::picking::PointerPosition;

/// Platform-agnostic input events.
///
/// Hosts translate their native events (winit, DOM) into these and feed
/// them to [`ViewControls::handle_event`](crate::ViewControls::handle_event).
///
/// # Example
///
/// ```ignore
/// let response = controls.handle_event(
///     &mut graph,
///     InputEvent::Wheel { delta_y: 120.0 },
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A mouse button went down over the surface.
    PointerDown {
        /// Pointer location and surface size at the time of the press.
        pointer: PointerPosition,
        /// Which button changed.
        button: MouseButton,
        /// Modifier keys held at the time.
        modifiers: Modifiers,
    },
    /// Relative pointer motion (valid under pointer lock).
    PointerMove {
        /// Movement since the previous event, in pixels.
        movement: Vec2,
        /// Modifier keys held at the time.
        modifiers: Modifiers,
    },
    /// A mouse button was released.
    PointerUp {
        /// Which button changed.
        button: MouseButton,
    },
    /// Scroll wheel; positive moves away from the pivot.
    Wheel {
        /// Vertical scroll amount in pixels.
        delta_y: f32,
    },
    /// A key was pressed. `key` uses `KeyboardEvent.key` names
    /// (`"Escape"`, `"Alt"`, `"a"`).
    KeyDown {
        /// Key name.
        key: String,
    },
    /// A key was released.
    KeyUp {
        /// Key name.
        key: String,
    },
    /// The platform is about to show a context menu.
    ContextMenu,
}

impl InputEvent {
    /// Listener slot that receives this event.
    #[must_use]
    pub fn listener(&self) -> super::Listener {
        use super::Listener;
        match self {
            Self::PointerDown { .. } => Listener::PointerDown,
            Self::PointerMove { .. } => Listener::PointerMove,
            Self::PointerUp { .. } => Listener::PointerUp,
            Self::Wheel { .. } => Listener::Wheel,
            Self::KeyDown { .. } => Listener::KeyDown,
            Self::KeyUp { .. } => Listener::KeyUp,
            Self::ContextMenu => Listener::ContextMenu,
        }
    }
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` index. Back/forward buttons have no
    /// meaning here and map to `None`.
    #[must_use]
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    /// Alt / Option.
    pub alt: bool,
    /// Control.
    pub ctrl: bool,
    /// Shift.
    pub shift: bool,
}

impl Modifiers {
    /// Only alt held.
    pub const ALT: Self = Self {
        alt: true,
        ctrl: false,
        shift: false,
    };
    /// Only ctrl held.
    pub const CTRL: Self = Self {
        alt: false,
        ctrl: true,
        shift: false,
    };
}

#[cfg(feature = "viewer")]
impl From<winit::keyboard::ModifiersState> for Modifiers {
    fn from(state: winit::keyboard::ModifiersState) -> Self {
        Self {
            alt: state.alt_key(),
            ctrl: state.control_key(),
            shift: state.shift_key(),
        }
    }
}
