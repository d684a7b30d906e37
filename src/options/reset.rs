use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::DEFAULT_TOLERANCE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Reset", inline)]
#[serde(default)]
/// Return-to-home animation tuning.
pub struct ResetOptions {
    /// Fraction of the remaining distance covered per frame.
    #[schemars(title = "Return Rate", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub lerp_factor: f32,
    /// Distance below which the camera snaps home.
    #[schemars(skip)]
    pub tolerance: f32,
}

impl Default for ResetOptions {
    fn default() -> Self {
        Self {
            lerp_factor: 0.11,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}
