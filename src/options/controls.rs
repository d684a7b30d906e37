use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Name given to the pivot node unless overridden.
pub const DEFAULT_CONTROLS_NAME: &str = "viewControls";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Pointer sensitivity and behaviour switches.
pub struct ControlsOptions {
    /// Name of the pivot node added to the scene.
    #[schemars(skip)]
    pub name: String,
    /// Install the reset key listener (Escape returns the camera home).
    #[schemars(title = "Auto Return")]
    pub auto_return: bool,
    /// Radians of orbit per pixel of pointer motion.
    #[schemars(title = "Rotation Speed", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub rotation_speed: f32,
    /// Wheel dolly per pixel of scroll, as a fraction of the pivot distance.
    #[schemars(title = "Wheel Dolly Speed", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub wheel_dolly_speed: f32,
    /// Upper bound on a single dolly step; `None` is unbounded.
    #[schemars(title = "Max Dolly Speed")]
    pub max_dolly_speed: Option<f32>,
}

impl Default for ControlsOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_CONTROLS_NAME.to_owned(),
            auto_return: true,
            rotation_speed: 0.005,
            wheel_dolly_speed: 0.03,
            max_dolly_speed: None,
        }
    }
}
