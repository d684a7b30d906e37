use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::DEFAULT_TOLERANCE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Focus", inline)]
#[serde(default)]
/// Focus-on-point animation tuning.
pub struct FocusOptions {
    /// Growth of the slerp factor per frame.
    #[schemars(title = "Focus Speed", range(min = 0.005, max = 0.2), extend("step" = 0.005))]
    pub speed: f32,
    /// Frames after which the turn is considered done regardless of
    /// convergence.
    #[schemars(title = "Max Frames", range(min = 1, max = 120))]
    pub max_iterations: u32,
    /// Convergence threshold on the rotation's vector part.
    #[schemars(skip)]
    pub tolerance: f32,
}

impl Default for FocusOptions {
    fn default() -> Self {
        Self {
            speed: 0.03,
            max_iterations: 20,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}
