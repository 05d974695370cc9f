//! Shared interpolation for targeted animations.
//!
//! A [`TargetSource`] decides *where* balls should be; [`Targeted`] decides
//! how they get there: at most `velocity × dt` per tick, never overshooting.

use super::{traits::TargetSource, FrameOutcome};
use crate::error::KinesisError;
use crate::grid::{Grid, GridSize};

/// Interpolates the rig toward the targets of a [`TargetSource`].
pub struct Targeted {
    size: GridSize,
    source: Box<dyn TargetSource>,
    targets: Grid,
    velocity: f64,
}

impl Targeted {
    /// Interpolator over `source` moving balls at `velocity` steps per
    /// second. Targets start at zero until the source seeds them.
    #[must_use]
    pub fn new(
        size: GridSize,
        source: Box<dyn TargetSource>,
        velocity: f64,
    ) -> Self {
        Self {
            size,
            source,
            targets: Grid::filled(size, 0.0),
            velocity,
        }
    }

    /// Grid dimensions.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Targets currently being approached.
    #[must_use]
    pub fn targets(&self) -> &Grid {
        &self.targets
    }

    /// Interpolation speed in steps per second.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Name of the underlying target source.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.source.name()
    }

    /// Compute the next frame.
    ///
    /// At `timestamp == 0` the source's targets are adopted and returned
    /// verbatim, since nothing is known about where the balls start. Later
    /// ticks move each ball from `last_frame` toward its target.
    pub fn next_frame(
        &mut self,
        timestamp: f64,
        dt: f64,
        last_frame: &Grid,
    ) -> Result<FrameOutcome, KinesisError> {
        let Some(next_targets) =
            self.source.next_targets(timestamp, dt, &self.targets)
        else {
            return Ok(FrameOutcome::Terminal);
        };
        next_targets.ensure_size(self.size, self.source.name())?;
        self.targets = next_targets;

        if timestamp == 0.0 {
            return Ok(FrameOutcome::Frame(self.targets.clone()));
        }

        let max_step = self.velocity * dt;
        let targets = &self.targets;
        Ok(FrameOutcome::Frame(Grid::from_fn(self.size, |row, column| {
            approach(last_frame.get(row, column), targets.get(row, column), max_step)
        })))
    }
}

impl std::fmt::Debug for Targeted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Targeted")
            .field("source", &self.source.name())
            .field("size", &self.size)
            .field("velocity", &self.velocity)
            .finish_non_exhaustive()
    }
}

/// Move `position` toward `target` by at most `max_step`, landing exactly on
/// the target when it is within reach.
#[must_use]
pub fn approach(position: f64, target: f64, max_step: f64) -> f64 {
    if (target - position).abs() > max_step {
        if position > target {
            position - max_step
        } else {
            position + max_step
        }
    } else {
        target
    }
}
