use serde::{Deserialize, Serialize};

/// Control actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// reset_view = "Escape"
/// release_look = "Alt"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Drop focus and ease the camera back to its home pose.
    ResetView,
    /// End an alt-drag look session (fires on key release).
    ReleaseLook,
}
