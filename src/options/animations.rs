use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-strategy animation parameters.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Animations", inline)]
#[serde(default)]
pub struct AnimationOptions {
    /// Diagonal triangle wave.
    pub triangle: TriangleOptions,
    /// Rain drops with per-column fall speed.
    pub rain: RainOptions,
    /// Rain drops that accelerate as they fall.
    pub rain_ramped: RampedRainOptions,
    /// Discrete pattern cycler.
    pub patterns: PatternOptions,
    /// Shared targeted interpolation settings.
    pub targeted: TargetedOptions,
}

/// Triangle wave parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Triangle", inline)]
#[serde(default)]
pub struct TriangleOptions {
    /// Highest point of the wave.
    pub top: f64,
    /// Lowest point of the wave.
    pub bottom: f64,
    /// Seconds per full oscillation.
    pub period: f64,
}

impl Default for TriangleOptions {
    fn default() -> Self {
        Self {
            top: -30000.0,
            bottom: -50000.0,
            period: 20.0,
        }
    }
}

/// Rain drop parameters (constant fall speed per column).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Rain", inline)]
#[serde(default)]
pub struct RainOptions {
    /// Resting position.
    pub top: f64,
    /// Where a drop bounces.
    pub bottom: f64,
    /// Fall speed of the last column, in steps per second.
    pub base_velocity: f64,
    /// Extra speed per column counted back from the last one.
    pub column_velocity_step: f64,
    /// An idle ball starts falling with probability `1 / trigger_odds` per
    /// tick.
    pub trigger_odds: u32,
}

impl Default for RainOptions {
    fn default() -> Self {
        Self {
            top: 0.0,
            bottom: -90000.0,
            base_velocity: 1500.0,
            column_velocity_step: 375.0,
            trigger_odds: 400,
        }
    }
}

/// Rain drop parameters (fall speed ramps up with depth).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Ramped Rain", inline)]
#[serde(default)]
pub struct RampedRainOptions {
    /// Resting position.
    pub top: f64,
    /// Where a drop bounces.
    pub bottom: f64,
    /// Twice the speed a drop starts falling at.
    pub base_velocity: f64,
    /// Fraction of `bottom` by which the drop reaches full speed.
    pub ramp_fraction: f64,
    /// An idle ball starts falling with probability `1 / trigger_odds` per
    /// tick.
    pub trigger_odds: u32,
}

impl Default for RampedRainOptions {
    fn default() -> Self {
        Self {
            top: 0.0,
            bottom: -90000.0,
            base_velocity: 1500.0,
            ramp_fraction: 0.10,
            trigger_odds: 500,
        }
    }
}

/// Pattern cycler parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Patterns", inline)]
#[serde(default)]
pub struct PatternOptions {
    /// Raised position of a pattern cell.
    pub offset: f64,
    /// How far lowered cells sit below `offset`.
    pub distance: f64,
    /// Seconds each pattern is held.
    pub hold_secs: f64,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            offset: -20000.0,
            distance: 2000.0,
            hold_secs: 3.0,
        }
    }
}

/// Settings for the shared targeted interpolation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Targeted", inline)]
#[serde(default)]
pub struct TargetedOptions {
    /// Interpolation speed as a fraction of the rig's max velocity.
    pub velocity_fraction: f64,
}

impl Default for TargetedOptions {
    fn default() -> Self {
        Self {
            velocity_fraction: 0.9,
        }
    }
}
