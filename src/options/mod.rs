//! Centralized rig, scheduler and animation options with TOML support.
//!
//! Every tweakable constant (grid size, travel and velocity limits, tick
//! rate, per-strategy parameters) is consolidated here and built once at
//! startup. Options serialize to/from TOML so a rig can be described in a
//! single file.

mod animations;
mod rig;
mod scheduler;

use std::path::Path;

pub use animations::{
    AnimationOptions, PatternOptions, RainOptions, RampedRainOptions,
    TargetedOptions, TriangleOptions,
};
pub use rig::RigOptions;
pub use scheduler::SchedulerOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::KinesisError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[rig]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Grid dimensions and physical limits.
    pub rig: RigOptions,
    /// Tick loop parameters.
    pub scheduler: SchedulerOptions,
    /// Per-strategy animation parameters.
    pub animations: AnimationOptions,
}

impl Options {
    /// Generate JSON Schema describing the options file.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, KinesisError> {
        let content = std::fs::read_to_string(path).map_err(KinesisError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| KinesisError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), KinesisError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| KinesisError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(KinesisError::Io)?;
        }
        std::fs::write(path, content).map_err(KinesisError::Io)
    }

    /// Reject option values no rig or animation can run with.
    pub fn validate(&self) -> Result<(), KinesisError> {
        let rig = &self.rig;
        require(rig.rows > 0, "rig.rows must be at least 1")?;
        require(rig.columns > 0, "rig.columns must be at least 1")?;
        require(rig.max_distance > 0.0, "rig.max_distance must be positive")?;
        require(rig.max_velocity > 0.0, "rig.max_velocity must be positive")?;
        require(rig.step_size_mm > 0.0, "rig.step_size_mm must be positive")?;

        let scheduler = &self.scheduler;
        require(
            scheduler.frame_rate > 0,
            "scheduler.frame_rate must be at least 1",
        )?;
        require(
            scheduler.report_interval_secs > 0.0,
            "scheduler.report_interval_secs must be positive",
        )?;
        require(
            !matches!(scheduler.max_duration_secs, Some(d) if d < 0.0),
            "scheduler.max_duration_secs must not be negative",
        )?;

        let animations = &self.animations;
        let triangle = &animations.triangle;
        require(
            triangle.period > 0.0,
            "animations.triangle.period must be positive",
        )?;
        require(
            triangle.top > triangle.bottom,
            "animations.triangle.top must be above bottom",
        )?;

        let rain = &animations.rain;
        require(rain.top > rain.bottom, "animations.rain.top must be above bottom")?;
        require(
            rain.base_velocity > 0.0,
            "animations.rain.base_velocity must be positive",
        )?;
        require(
            rain.column_velocity_step >= 0.0,
            "animations.rain.column_velocity_step must not be negative",
        )?;
        require(
            rain.trigger_odds > 0,
            "animations.rain.trigger_odds must be at least 1",
        )?;

        let ramped = &animations.rain_ramped;
        require(
            ramped.top > ramped.bottom,
            "animations.rain_ramped.top must be above bottom",
        )?;
        require(
            ramped.base_velocity > 0.0,
            "animations.rain_ramped.base_velocity must be positive",
        )?;
        require(
            ramped.ramp_fraction > 0.0 && ramped.ramp_fraction <= 1.0,
            "animations.rain_ramped.ramp_fraction must be in (0, 1]",
        )?;
        require(
            ramped.trigger_odds > 0,
            "animations.rain_ramped.trigger_odds must be at least 1",
        )?;

        require(
            animations.patterns.distance > 0.0,
            "animations.patterns.distance must be positive",
        )?;
        require(
            animations.patterns.hold_secs > 0.0,
            "animations.patterns.hold_secs must be positive",
        )?;
        require(
            animations.targeted.velocity_fraction > 0.0,
            "animations.targeted.velocity_fraction must be positive",
        )
    }
}

fn require(condition: bool, message: &str) -> Result<(), KinesisError> {
    if condition {
        Ok(())
    } else {
        Err(KinesisError::InvalidOptions(message.to_owned()))
    }
}
