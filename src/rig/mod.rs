//! Authoritative ball positions and limit diagnostics.
//!
//! [`RigState`] stands in for the physical sculpture: it holds the
//! commanded position of every ball, checks each new frame against the
//! travel and velocity limits, and forwards applied frames to any attached
//! [`FrameSink`]s. Limit violations are reported, never enforced: the
//! commanded frame is always applied.

mod sink;

use std::fmt;

use web_time::Instant;

pub use sink::{FrameSink, RecordingSink, ReportSink, RigReport};

use crate::error::KinesisError;
use crate::grid::Grid;
use crate::options::RigOptions;

/// A commanded ball position or movement the hardware could not honour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimitViolation {
    /// Position above the top of travel (`> 0`).
    AboveTop {
        /// Row of the ball.
        row: usize,
        /// Column of the ball.
        column: usize,
        /// Commanded position.
        position: f64,
    },
    /// Position below the bottom of travel (`< -max_distance`).
    BelowBottom {
        /// Row of the ball.
        row: usize,
        /// Column of the ball.
        column: usize,
        /// Commanded position.
        position: f64,
        /// Lowest reachable position.
        limit: f64,
    },
    /// Implied speed above `max_velocity`.
    TooFast {
        /// Row of the ball.
        row: usize,
        /// Column of the ball.
        column: usize,
        /// Implied speed in steps per second (signed).
        velocity: f64,
        /// Highest reachable speed.
        limit: f64,
    },
}

impl fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AboveTop {
                row,
                column,
                position,
            } => write!(f, "ball ({row}, {column}) above top: {position:.1}"),
            Self::BelowBottom {
                row,
                column,
                position,
                limit,
            } => write!(
                f,
                "ball ({row}, {column}) below bottom: {position:.1} < {limit:.1}"
            ),
            Self::TooFast {
                row,
                column,
                velocity,
                limit,
            } => write!(
                f,
                "ball ({row}, {column}) too fast: {:.1} > {limit:.1} steps/s",
                velocity.abs()
            ),
        }
    }
}

/// Current ball positions of the sculpture.
pub struct RigState {
    options: RigOptions,
    current: Grid,
    started: Option<Instant>,
    last_update: Option<Instant>,
    last_violations: Vec<LimitViolation>,
    total_violations: u64,
    frames_applied: u64,
    sinks: Vec<Box<dyn FrameSink>>,
}

impl RigState {
    /// Rig with every ball at the top.
    #[must_use]
    pub fn new(options: RigOptions) -> Self {
        let current = Grid::filled(options.grid_size(), 0.0);
        Self {
            options,
            current,
            started: None,
            last_update: None,
            last_violations: Vec::new(),
            total_violations: 0,
            frames_applied: 0,
            sinks: Vec::new(),
        }
    }

    /// Forward every applied frame to `sink` as well.
    pub fn add_sink(&mut self, sink: impl FrameSink + 'static) {
        log::debug!("Rig: attached {} sink", sink.name());
        self.sinks.push(Box::new(sink));
    }

    /// Rig dimensions and limits.
    #[must_use]
    pub fn options(&self) -> &RigOptions {
        &self.options
    }

    /// Where every ball is. With `quantize` enabled, positions are reported
    /// as whole steps, as a stepper-driven rig would read them back.
    #[must_use]
    pub fn positions(&self) -> Grid {
        let mut positions = self.current.clone();
        if self.options.quantize {
            for value in positions.as_mut_slice() {
                *value = value.round();
            }
        }
        positions
    }

    /// Apply `frame` now. See [`RigState::set_positions_at`].
    pub fn set_positions(&mut self, frame: Grid) -> Result<(), KinesisError> {
        self.set_positions_at(frame, Instant::now())
    }

    /// Apply `frame` as of `at`.
    ///
    /// Positions outside `[-max_distance, 0]` and moves implying more than
    /// `max_velocity` are logged as warnings and counted; the frame is
    /// applied regardless. The velocity check is skipped on the first
    /// frame and when no time has passed since the previous one.
    ///
    /// Errors only on a frame of the wrong dimensions or a failing sink.
    pub fn set_positions_at(
        &mut self,
        frame: Grid,
        at: Instant,
    ) -> Result<(), KinesisError> {
        frame.ensure_size(self.options.grid_size(), "frame")?;

        let dt = self
            .last_update
            .map(|last| at.saturating_duration_since(last).as_secs_f64());
        self.last_violations = self.diagnose(&frame, dt);
        for violation in &self.last_violations {
            log::warn!("Rig limit: {violation}");
        }
        self.total_violations += self.last_violations.len() as u64;

        self.current = frame;
        self.last_update = Some(at);
        let started = *self.started.get_or_insert(at);
        self.frames_applied += 1;

        let elapsed = at.saturating_duration_since(started).as_secs_f64();
        let positions = self.positions();
        for sink in &mut self.sinks {
            sink.on_frame(elapsed, &positions, &self.options)?;
        }
        Ok(())
    }

    fn diagnose(&self, frame: &Grid, dt: Option<f64>) -> Vec<LimitViolation> {
        let bottom = -self.options.max_distance;
        let max_velocity = self.options.max_velocity;
        // Speed is measured from where the rig reports the balls to be
        let previous = self.positions();
        let mut violations = Vec::new();

        for (row, column, position) in frame.cells() {
            if position > 0.0 {
                violations.push(LimitViolation::AboveTop {
                    row,
                    column,
                    position,
                });
            } else if position < bottom {
                violations.push(LimitViolation::BelowBottom {
                    row,
                    column,
                    position,
                    limit: bottom,
                });
            }

            if let Some(dt) = dt.filter(|&dt| dt > 0.0) {
                let velocity = (position - previous.get(row, column)) / dt;
                if velocity.abs() > max_velocity {
                    violations.push(LimitViolation::TooFast {
                        row,
                        column,
                        velocity,
                        limit: max_velocity,
                    });
                }
            }
        }
        violations
    }

    /// Violations found in the most recently applied frame.
    #[must_use]
    pub fn last_violations(&self) -> &[LimitViolation] {
        &self.last_violations
    }

    /// Violations found since the rig was created.
    #[must_use]
    pub fn total_violations(&self) -> u64 {
        self.total_violations
    }

    /// Frames applied since the rig was created.
    #[must_use]
    pub fn frames_applied(&self) -> u64 {
        self.frames_applied
    }

    /// Flush every sink.
    pub fn finish(&mut self) -> Result<(), KinesisError> {
        for sink in &mut self.sinks {
            sink.finish()?;
        }
        Ok(())
    }
}

impl fmt::Debug for RigState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RigState")
            .field("size", &self.current.size())
            .field("frames_applied", &self.frames_applied)
            .field("total_violations", &self.total_violations)
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::grid::GridSize;

    fn small_rig() -> RigState {
        RigState::new(RigOptions {
            rows: 2,
            columns: 2,
            max_distance: 1000.0,
            max_velocity: 100.0,
            ..RigOptions::default()
        })
    }

    fn size() -> GridSize {
        GridSize::new(2, 2)
    }

    /// Collects every frame it sees.
    struct Collect(Arc<Mutex<Vec<(f64, Grid)>>>);

    impl FrameSink for Collect {
        fn on_frame(
            &mut self,
            elapsed: f64,
            positions: &Grid,
            _rig: &RigOptions,
        ) -> Result<(), KinesisError> {
            self.0.lock().unwrap().push((elapsed, positions.clone()));
            Ok(())
        }
    }

    #[test]
    fn test_starts_at_top() {
        let rig = small_rig();
        assert_eq!(rig.positions(), Grid::filled(size(), 0.0));
        assert_eq!(rig.frames_applied(), 0);
    }

    #[test]
    fn test_out_of_range_positions_are_applied_anyway() {
        let mut rig = small_rig();
        let frame =
            Grid::from_rows(vec![vec![5.0, -10.0], vec![-1500.0, -1000.0]])
                .unwrap();
        rig.set_positions_at(frame.clone(), Instant::now()).unwrap();

        assert_eq!(rig.positions(), frame);
        assert_eq!(rig.last_violations().len(), 2);
        assert!(matches!(
            rig.last_violations()[0],
            LimitViolation::AboveTop { row: 0, column: 0, .. }
        ));
        assert!(matches!(
            rig.last_violations()[1],
            LimitViolation::BelowBottom { row: 1, column: 0, .. }
        ));
    }

    #[test]
    fn test_first_frame_skips_velocity_check() {
        let mut rig = small_rig();
        // A huge jump from the top, but there is no previous time
        rig.set_positions_at(Grid::filled(size(), -900.0), Instant::now())
            .unwrap();
        assert!(rig.last_violations().is_empty());
    }

    #[test]
    fn test_velocity_uses_elapsed_time() {
        let mut rig = small_rig();
        let start = Instant::now();
        rig.set_positions_at(Grid::filled(size(), -100.0), start).unwrap();

        // 50 steps in 1 s is fine
        let t1 = start + Duration::from_secs(1);
        rig.set_positions_at(Grid::filled(size(), -150.0), t1).unwrap();
        assert!(rig.last_violations().is_empty());

        // 50 steps in 0.1 s is 500 steps/s
        let t2 = t1 + Duration::from_millis(100);
        rig.set_positions_at(Grid::filled(size(), -200.0), t2).unwrap();
        assert_eq!(rig.last_violations().len(), 4);
        match rig.last_violations()[0] {
            LimitViolation::TooFast { velocity, limit, .. } => {
                assert!((velocity + 500.0).abs() < 1e-6);
                assert_eq!(limit, 100.0);
            }
            other => panic!("expected velocity violation, got {other:?}"),
        }
        assert_eq!(rig.total_violations(), 4);
        assert_eq!(rig.positions(), Grid::filled(size(), -200.0));
    }

    #[test]
    fn test_zero_dt_skips_velocity_check() {
        let mut rig = small_rig();
        let at = Instant::now();
        rig.set_positions_at(Grid::filled(size(), -100.0), at).unwrap();
        rig.set_positions_at(Grid::filled(size(), -900.0), at).unwrap();
        assert!(rig.last_violations().is_empty());
    }

    #[test]
    fn test_quantized_read_back() {
        let mut rig = small_rig();
        rig.set_positions_at(Grid::filled(size(), -10.6), Instant::now())
            .unwrap();
        assert_eq!(rig.positions(), Grid::filled(size(), -11.0));

        let mut exact = RigState::new(RigOptions {
            rows: 2,
            columns: 2,
            quantize: false,
            ..RigOptions::default()
        });
        exact
            .set_positions_at(Grid::filled(size(), -10.6), Instant::now())
            .unwrap();
        assert_eq!(exact.positions(), Grid::filled(size(), -10.6));
    }

    #[test]
    fn test_velocity_measured_from_read_back_positions() {
        let start = Instant::now();
        let later = start + Duration::from_millis(100);

        // -10.4 reads back as -10, so reaching -20.2 is 10.2 steps in 0.1 s
        let mut rig = small_rig();
        rig.set_positions_at(Grid::filled(size(), -10.4), start).unwrap();
        rig.set_positions_at(Grid::filled(size(), -20.2), later).unwrap();
        assert_eq!(rig.last_violations().len(), 4);
        match rig.last_violations()[0] {
            LimitViolation::TooFast { velocity, .. } => {
                assert!((velocity + 102.0).abs() < 1e-6);
            }
            other => panic!("expected velocity violation, got {other:?}"),
        }

        // Unquantized, the same move is only 9.8 steps
        let mut exact = RigState::new(RigOptions {
            quantize: false,
            ..small_rig().options().clone()
        });
        exact.set_positions_at(Grid::filled(size(), -10.4), start).unwrap();
        exact.set_positions_at(Grid::filled(size(), -20.2), later).unwrap();
        assert!(exact.last_violations().is_empty());
    }

    #[test]
    fn test_wrong_sized_frame_is_rejected() {
        let mut rig = small_rig();
        let frame = Grid::filled(GridSize::new(3, 2), 0.0);
        assert!(matches!(
            rig.set_positions(frame),
            Err(KinesisError::DimensionMismatch { .. })
        ));
        assert_eq!(rig.frames_applied(), 0);
    }

    #[test]
    fn test_sinks_see_applied_frames() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut rig = small_rig();
        rig.add_sink(Collect(Arc::clone(&seen)));

        let start = Instant::now();
        rig.set_positions_at(Grid::filled(size(), -1.0), start).unwrap();
        rig.set_positions_at(
            Grid::filled(size(), -2.0),
            start + Duration::from_millis(500),
        )
        .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, 0.0);
        assert!((seen[1].0 - 0.5).abs() < 1e-9);
        assert_eq!(seen[1].1, Grid::filled(size(), -2.0));
    }
}
