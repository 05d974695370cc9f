use std::thread;

use web_time::{Duration, Instant};

/// Frame pacing with a fixed tick rate and smoothed rate measurement.
///
/// The scheduler calls [`FrameTiming::wait_for_next_frame`] once per tick;
/// it blocks until at least `1 / target_fps` has passed since the previous
/// tick was released, so ticks never run faster than the target but may run
/// slower.
pub struct FrameTiming {
    /// Target ticks per second (0 = unlimited)
    target_fps: u32,
    /// Minimum tick duration based on target FPS
    min_frame_duration: Duration,
    /// When the previous tick was released
    last_frame: Option<Instant>,
    /// Smoothed tick rate using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given tick target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: None,
            smoothed_fps: target_fps as f32,
            smoothing: 0.05,
        }
    }

    /// Target tick rate.
    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Minimum time between two released ticks.
    #[must_use]
    pub fn min_frame_duration(&self) -> Duration {
        self.min_frame_duration
    }

    /// How long the caller would have to wait at `now` before the next tick
    /// may start.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_frame {
            Some(last) if self.target_fps > 0 => self
                .min_frame_duration
                .saturating_sub(now.saturating_duration_since(last)),
            _ => Duration::ZERO,
        }
    }

    /// Block until the minimum tick interval has elapsed, then mark the
    /// start of a new tick.
    pub fn wait_for_next_frame(&mut self) {
        let wait = self.remaining(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        self.end_frame(Instant::now());
    }

    /// Record that a tick was released at `now`.
    pub fn end_frame(&mut self, now: Instant) {
        if let Some(last) = self.last_frame {
            let frame_time = now.saturating_duration_since(last).as_secs_f32();
            if frame_time > 0.0 {
                let instant_fps = 1.0 / frame_time;
                self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                    + instant_fps * self.smoothing;
            }
        }
        self.last_frame = Some(now);
    }

    /// Get the current tick rate (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_never_waits() {
        let timing = FrameTiming::new(20);
        assert_eq!(timing.remaining(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn remaining_counts_down_from_interval() {
        let mut timing = FrameTiming::new(20);
        let start = Instant::now();
        timing.end_frame(start);

        assert_eq!(timing.min_frame_duration(), Duration::from_millis(50));
        assert_eq!(
            timing.remaining(start + Duration::from_millis(20)),
            Duration::from_millis(30)
        );
        assert_eq!(
            timing.remaining(start + Duration::from_millis(80)),
            Duration::ZERO
        );
    }

    #[test]
    fn unlimited_rate_never_waits() {
        let mut timing = FrameTiming::new(0);
        let start = Instant::now();
        timing.end_frame(start);
        assert_eq!(timing.remaining(start), Duration::ZERO);
    }

    #[test]
    fn wait_enforces_minimum_interval() {
        let mut timing = FrameTiming::new(100);
        timing.wait_for_next_frame();
        let before = Instant::now();
        timing.wait_for_next_frame();
        assert!(before.elapsed() >= Duration::from_millis(9));
    }

    #[test]
    fn smoothed_rate_tracks_measured_ticks() {
        let mut timing = FrameTiming::new(20);
        let start = Instant::now();
        for i in 0..200 {
            timing.end_frame(start + Duration::from_millis(100 * i));
        }
        // Ticks arrive at 10 Hz, below the 20 Hz target
        assert!((timing.fps() - 10.0).abs() < 0.5);
    }
}
