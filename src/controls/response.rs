use crate::picking::Intersection;

/// Pointer-lock change the host should apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerLock {
    /// Capture the pointer (`requestPointerLock`, `CursorGrabMode::Locked`).
    Request,
    /// Release it.
    Exit,
}

/// Notification for the host about a click on a scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Plain left click on an object.
    LeftClick(Intersection),
    /// Right click on an object.
    RightClick(Intersection),
}

impl ControlEvent {
    /// The hit that triggered the event.
    #[must_use]
    pub fn intersection(&self) -> &Intersection {
        match self {
            Self::LeftClick(hit) | Self::RightClick(hit) => hit,
        }
    }
}

/// What the host should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub struct Response {
    /// The controls acted on the event.
    pub consumed: bool,
    /// The host should suppress the platform default (page scroll,
    /// context menu).
    pub prevent_default: bool,
    /// Pointer-lock change to apply.
    pub pointer_lock: Option<PointerLock>,
    /// Click notification to forward.
    pub event: Option<ControlEvent>,
}

impl Response {
    /// Nothing happened.
    pub const IGNORED: Self = Self {
        consumed: false,
        prevent_default: false,
        pointer_lock: None,
        event: None,
    };

    /// The event was handled with no side effects for the host.
    pub const CONSUMED: Self = Self {
        consumed: true,
        ..Self::IGNORED
    };

    /// Handled, and the platform default must be suppressed.
    pub const PREVENT_DEFAULT: Self = Self {
        prevent_default: true,
        ..Self::CONSUMED
    };

    /// Handled, with a pointer-lock change.
    pub fn lock(lock: PointerLock) -> Self {
        Self {
            pointer_lock: Some(lock),
            ..Self::CONSUMED
        }
    }

    /// Handled, with a click notification.
    pub fn emit(event: ControlEvent) -> Self {
        Self {
            event: Some(event),
            ..Self::CONSUMED
        }
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::IGNORED
    }
}
