use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::grid::GridSize;

/// Total downward travel of a 5 ft rig in steps.
const DEFAULT_MAX_DISTANCE: f64 = 95000.0;

/// Physical dimensions and limits of the ball grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Rig", inline)]
#[serde(default)]
pub struct RigOptions {
    /// Number of ball rows.
    #[schemars(title = "Rows")]
    pub rows: usize,
    /// Number of ball columns.
    #[schemars(title = "Columns")]
    pub columns: usize,
    /// Total downward travel in steps (`MAX_DISTANCE`).
    #[schemars(title = "Max Distance")]
    pub max_distance: f64,
    /// Fastest a ball may be commanded to move, in steps per second.
    #[schemars(title = "Max Velocity")]
    pub max_velocity: f64,
    /// Physical length of one step in millimetres.
    #[schemars(title = "Step Size (mm)")]
    pub step_size_mm: f64,
    /// Report positions back as whole steps, as a stepper-driven rig does.
    #[schemars(title = "Quantize To Steps")]
    pub quantize: bool,
}

impl RigOptions {
    /// Grid dimensions of the rig.
    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        GridSize::new(self.rows, self.columns)
    }

    /// Convert a position in steps to millimetres below the top.
    #[must_use]
    pub fn steps_to_mm(&self, steps: f64) -> f64 {
        -steps * self.step_size_mm
    }
}

impl Default for RigOptions {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 8,
            max_distance: DEFAULT_MAX_DISTANCE,
            max_velocity: 4500.0,
            // 5 ft of travel spread over the full step range
            step_size_mm: (5.0 * 12.0 * 25.4) / DEFAULT_MAX_DISTANCE,
            quantize: true,
        }
    }
}
