//! Fixed-rate tick loop driving one animation against the rig.
//!
//! The scheduler reads the rig's positions, asks the animation for the next
//! frame, applies it, and waits for the next tick. Animations receive the
//! *measured* time since the previous tick, so a late tick shows up as a
//! larger `dt` rather than a slower animation.

use web_time::{Duration, Instant};

use crate::animation::{Animation, FrameOutcome};
use crate::error::KinesisError;
use crate::options::SchedulerOptions;
use crate::rig::RigState;
use crate::util::frame_timing::FrameTiming;

/// Lifecycle of a [`Scheduler`]. `Stopped` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Constructed; [`Scheduler::start`] not yet called.
    NotStarted,
    /// Ticking.
    Running,
    /// Finished; further ticks are ignored.
    Stopped,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The animation returned a terminal frame.
    AnimationEnded,
    /// `max_duration_secs` elapsed.
    DurationElapsed,
    /// [`Scheduler::request_stop`] was called.
    Requested,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was applied to the rig.
    Applied,
    /// The scheduler is stopped; nothing was applied.
    Stopped,
}

/// Totals reported when a run ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Frames applied to the rig, priming included.
    pub frames_applied: u64,
    /// Limit violations the rig reported.
    pub violations: u64,
    /// Timestamp of the last applied tick, in seconds.
    pub final_timestamp: f64,
    /// Smoothed measured tick rate.
    pub tick_rate: f32,
    /// Why the run ended, if it has.
    pub stop_reason: Option<StopReason>,
}

/// Drives an [`Animation`] against a [`RigState`].
pub struct Scheduler {
    rig: RigState,
    animation: Animation,
    options: SchedulerOptions,
    timing: FrameTiming,
    state: SchedulerState,
    stop_reason: Option<StopReason>,
    started_at: Option<Instant>,
    last_timestamp: Option<f64>,
}

impl Scheduler {
    /// Pair `animation` with `rig`. Both must have the same grid size.
    pub fn new(
        rig: RigState,
        animation: Animation,
        options: SchedulerOptions,
    ) -> Result<Self, KinesisError> {
        let rig_size = rig.options().grid_size();
        if animation.size() != rig_size {
            return Err(KinesisError::DimensionMismatch {
                origin: animation.name().to_owned(),
                expected: rig_size,
                found: animation.size(),
            });
        }

        Ok(Self {
            rig,
            animation,
            timing: FrameTiming::new(options.frame_rate),
            options,
            state: SchedulerState::NotStarted,
            stop_reason: None,
            started_at: None,
            last_timestamp: None,
        })
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Why the scheduler stopped, once it has.
    #[must_use]
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// The rig being driven.
    #[must_use]
    pub fn rig(&self) -> &RigState {
        &self.rig
    }

    /// Leave `NotStarted`, priming the animation if it asks for it.
    ///
    /// Priming calls the animation once with `timestamp = 0, dt = 0` and
    /// applies the result, so seeded strategies begin from a known frame.
    /// A terminal priming result stops the scheduler immediately. Calling
    /// `start` again is a no-op.
    pub fn start(&mut self) -> Result<SchedulerState, KinesisError> {
        if self.state != SchedulerState::NotStarted {
            return Ok(self.state);
        }
        let now = Instant::now();
        self.started_at = Some(now);
        log::info!(
            "Starting {} animation '{}' at {} Hz",
            self.animation.kind(),
            self.animation.name(),
            self.options.frame_rate
        );

        if self.animation.requires_priming() {
            log::debug!("Priming '{}'", self.animation.name());
            let positions = self.rig.positions();
            match self.animation.next_frame(0.0, 0.0, &positions)? {
                FrameOutcome::Frame(frame) => {
                    self.rig.set_positions_at(frame, now)?;
                }
                FrameOutcome::Terminal => {
                    self.stop(StopReason::AnimationEnded);
                    return Ok(self.state);
                }
            }
        }

        self.state = SchedulerState::Running;
        Ok(self.state)
    }

    /// Run one tick at `timestamp` seconds since [`Scheduler::start`].
    ///
    /// `dt` handed to the animation is the difference from the previous
    /// tick's timestamp, `0` on the first tick. The frame is applied to the
    /// rig as of `start + timestamp`, so the rig's velocity check sees the
    /// same `dt`.
    pub fn tick(&mut self, timestamp: f64) -> Result<TickOutcome, KinesisError> {
        let Some(started_at) = self.started_at else {
            return Ok(TickOutcome::Stopped);
        };
        if self.state != SchedulerState::Running {
            return Ok(TickOutcome::Stopped);
        }

        let dt = self
            .last_timestamp
            .map_or(0.0, |last| (timestamp - last).max(0.0));
        let positions = self.rig.positions();
        log::trace!("tick t={timestamp:.3} dt={dt:.4}");

        match self.animation.next_frame(timestamp, dt, &positions)? {
            FrameOutcome::Frame(frame) => {
                let at = started_at + Duration::from_secs_f64(timestamp.max(0.0));
                self.rig.set_positions_at(frame, at)?;
                self.last_timestamp = Some(timestamp);
                Ok(TickOutcome::Applied)
            }
            FrameOutcome::Terminal => {
                self.stop(StopReason::AnimationEnded);
                Ok(TickOutcome::Stopped)
            }
        }
    }

    /// Stop ticking. Has no effect once stopped.
    pub fn request_stop(&mut self) {
        self.stop(StopReason::Requested);
    }

    fn stop(&mut self, reason: StopReason) {
        if self.state == SchedulerState::Stopped {
            return;
        }
        log::info!("Stopping '{}': {reason:?}", self.animation.name());
        self.state = SchedulerState::Stopped;
        self.stop_reason = Some(reason);
    }

    /// Start (if needed) and tick at the configured rate until the
    /// animation ends or `max_duration_secs` elapses, then flush the rig's
    /// sinks.
    ///
    /// The sinks are flushed even when a tick fails; the tick's error takes
    /// precedence over a flush error.
    pub fn run(&mut self) -> Result<RunSummary, KinesisError> {
        let ticked = self.tick_until_stopped();
        let flushed = self.rig.finish();
        ticked?;
        flushed?;

        let summary = self.summary();
        log::info!(
            "Run finished: {} frames, {} limit violations, t={:.2}s, {:.1} ticks/s",
            summary.frames_applied,
            summary.violations,
            summary.final_timestamp,
            summary.tick_rate
        );
        Ok(summary)
    }

    fn tick_until_stopped(&mut self) -> Result<(), KinesisError> {
        let _ = self.start()?;
        let started_at = self.started_at.unwrap_or_else(Instant::now);

        while self.state == SchedulerState::Running {
            self.timing.wait_for_next_frame();
            let timestamp = started_at.elapsed().as_secs_f64();

            if self
                .options
                .max_duration_secs
                .is_some_and(|max| timestamp >= max)
            {
                self.stop(StopReason::DurationElapsed);
                break;
            }
            let _ = self.tick(timestamp)?;
        }
        Ok(())
    }

    /// Totals so far.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames_applied: self.rig.frames_applied(),
            violations: self.rig.total_violations(),
            final_timestamp: self.last_timestamp.unwrap_or(0.0),
            tick_rate: self.timing.fps(),
            stop_reason: self.stop_reason,
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("animation", &self.animation)
            .field("state", &self.state)
            .field("last_timestamp", &self.last_timestamp)
            .finish_non_exhaustive()
    }
}
