//! Core traits for the three animation shapes.

use crate::grid::Grid;

use super::FrameOutcome;

/// Full control over every ball each tick.
///
/// Implementations receive the rig's current positions and must return a
/// complete frame of the rig's dimensions, or [`FrameOutcome::Terminal`] to
/// end the run. See [`TriangleWave`](super::strategies::TriangleWave).
pub trait FrameAnimation: Send {
    /// Compute the frame for `timestamp` seconds into the run.
    ///
    /// `dt` is the measured time since the previous tick, not a nominal
    /// frame period; it is `0.0` on the first tick.
    fn next_frame(
        &mut self,
        timestamp: f64,
        dt: f64,
        last_frame: &Grid,
    ) -> FrameOutcome;

    /// Whether the scheduler should issue a `timestamp == 0` call before
    /// the timed loop starts.
    fn requires_priming(&self) -> bool {
        false
    }

    /// Optional name for debugging/logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}

/// Computes one ball at a time, "shader style".
///
/// A cell's position may only depend on its own row, column, the time and
/// its own previous position, never on neighbouring cells, so cells can be
/// evaluated in any order. Returning `None` for any cell ends the run: the
/// whole frame resolves to [`FrameOutcome::Terminal`].
pub trait ShaderAnimation: Send {
    /// Next position of the ball at `(row, column)`.
    fn ball_position(
        &mut self,
        row: usize,
        column: usize,
        timestamp: f64,
        dt: f64,
        last_position: f64,
    ) -> Option<f64>;

    /// Whether the scheduler should issue a `timestamp == 0` call before
    /// the timed loop starts.
    fn requires_priming(&self) -> bool {
        false
    }

    /// Optional name for debugging/logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}

/// Emits discrete target positions; the shared
/// [`Targeted`](super::Targeted) base moves the balls toward them at a
/// bounded velocity.
pub trait TargetSource: Send {
    /// Full grid of targets for this tick, or `None` to end the run.
    ///
    /// `current_targets` is the grid returned by the previous call (all
    /// zeros before the first).
    fn next_targets(
        &mut self,
        timestamp: f64,
        dt: f64,
        current_targets: &Grid,
    ) -> Option<Grid>;

    /// Optional name for debugging/logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}
