//! Which input listeners are currently installed.
//!
//! The controls install a few listeners for their whole lifetime and add
//! the motion/release listeners only while an alt-drag look session is
//! running. Events for listeners that are not installed are dropped, so the
//! same behaviour holds whether the host really adds and removes DOM
//! listeners or simply forwards every event.

/// A single listener slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Button presses (always installed).
    PointerDown,
    /// Scroll wheel (always installed).
    Wheel,
    /// Context menu suppression (always installed).
    ContextMenu,
    /// Key presses (installed when auto-return is enabled).
    KeyDown,
    /// Relative motion during a look session.
    PointerMove,
    /// Button release ending a look session.
    PointerUp,
    /// Key release ending a look session.
    KeyUp,
}

impl Listener {
    /// Every slot.
    pub const ALL: [Self; 7] = [
        Self::PointerDown,
        Self::Wheel,
        Self::ContextMenu,
        Self::KeyDown,
        Self::PointerMove,
        Self::PointerUp,
        Self::KeyUp,
    ];

    /// Slots that live only for the duration of a look session.
    pub const TRANSIENT: [Self; 3] =
        [Self::PointerMove, Self::PointerUp, Self::KeyUp];

    /// DOM event type name.
    #[must_use]
    pub fn event_type(self) -> &'static str {
        match self {
            Self::PointerDown => "mousedown",
            Self::Wheel => "wheel",
            Self::ContextMenu => "contextmenu",
            Self::KeyDown => "keydown",
            Self::PointerMove => "mousemove",
            Self::PointerUp => "mouseup",
            Self::KeyUp => "keyup",
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of installed listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerSet(u8);

impl ListenerSet {
    /// No listeners.
    pub const EMPTY: Self = Self(0);

    /// The listeners installed at construction. `KeyDown` is included only
    /// with `auto_return`.
    #[must_use]
    pub fn persistent(auto_return: bool) -> Self {
        let mut set = Self::EMPTY;
        set.insert(Listener::PointerDown);
        set.insert(Listener::Wheel);
        set.insert(Listener::ContextMenu);
        if auto_return {
            set.insert(Listener::KeyDown);
        }
        set
    }

    /// Whether `listener` is installed.
    #[must_use]
    pub fn contains(self, listener: Listener) -> bool {
        self.0 & listener.bit() != 0
    }

    /// Install `listener`.
    pub fn insert(&mut self, listener: Listener) {
        self.0 |= listener.bit();
    }

    /// Remove `listener`.
    pub fn remove(&mut self, listener: Listener) {
        self.0 &= !listener.bit();
    }

    /// Install the look-session listeners.
    pub fn install_transient(&mut self) {
        for listener in Listener::TRANSIENT {
            self.insert(listener);
        }
    }

    /// Remove the look-session listeners.
    pub fn remove_transient(&mut self) {
        for listener in Listener::TRANSIENT {
            self.remove(listener);
        }
    }

    /// Whether a look session is active.
    #[must_use]
    pub fn is_looking(self) -> bool {
        Listener::TRANSIENT.iter().any(|&l| self.contains(l))
    }

    /// Installed listeners in [`Listener::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Listener> {
        Listener::ALL.into_iter().filter(move |&l| self.contains(l))
    }
}
