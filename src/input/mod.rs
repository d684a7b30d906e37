//! Input handling: the platform-agnostic event vocabulary, key actions and
//! the listener lifecycle the controls follow.

/// Platform-agnostic input events.
pub mod event;
/// Bindable key actions.
pub mod keyboard;
/// Installed-listener bookkeeping.
pub mod listeners;

pub use event::{InputEvent, Modifiers, MouseButton};
pub use keyboard::KeyAction;
pub use listeners::{Listener, ListenerSet};
