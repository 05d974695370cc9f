use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tick loop parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scheduler", inline)]
#[serde(default)]
pub struct SchedulerOptions {
    /// Ticks per second.
    #[schemars(title = "Frame Rate")]
    pub frame_rate: u32,
    /// Stop after this many seconds of animation time. Runs until the
    /// animation ends when unset.
    #[schemars(title = "Max Duration (s)")]
    pub max_duration_secs: Option<f64>,
    /// Seconds between rig status reports in the log.
    #[schemars(title = "Report Interval (s)")]
    pub report_interval_secs: f64,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            frame_rate: 20,
            max_duration_secs: None,
            report_interval_secs: 5.0,
        }
    }
}
