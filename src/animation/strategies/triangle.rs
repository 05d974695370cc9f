//! Diagonal triangle wave (whole-frame).

use crate::animation::{Animation, AnimationEntry, FrameAnimation, FrameOutcome};
use crate::grid::{Grid, GridSize};
use crate::options::{Options, TriangleOptions};
use crate::util::range::map_range;

/// Registry entry.
pub(crate) const ENTRY: AnimationEntry = AnimationEntry {
    name: "triangle",
    aliases: &["sample", "sample_animation"],
    description: "rows oscillate between two depths, phase-shifted into a diagonal wave",
    build,
};

fn build(size: GridSize, options: &Options) -> Animation {
    Animation::raw(size, TriangleWave::new(size, &options.animations.triangle))
}

/// Every ball in a row follows the same triangle wave; each row lags the
/// previous one by `period / rows / 2` seconds.
#[derive(Debug, Clone)]
pub struct TriangleWave {
    size: GridSize,
    top: f64,
    bottom: f64,
    period: f64,
}

impl TriangleWave {
    /// Wave over a `size` grid.
    #[must_use]
    pub fn new(size: GridSize, options: &TriangleOptions) -> Self {
        Self {
            size,
            top: options.top,
            bottom: options.bottom,
            period: options.period,
        }
    }

    /// Position of every ball in `row` at `timestamp`.
    #[must_use]
    pub fn row_position(&self, row: usize, timestamp: f64) -> f64 {
        let offset_per_row = self.period / self.size.rows as f64 / 2.0;
        let row_time = timestamp + offset_per_row * row as f64;
        triangle(self.top, self.bottom, self.period, row_time)
    }
}

impl FrameAnimation for TriangleWave {
    fn next_frame(
        &mut self,
        timestamp: f64,
        _dt: f64,
        _last_frame: &Grid,
    ) -> FrameOutcome {
        FrameOutcome::Frame(Grid::from_fn(self.size, |row, _| {
            self.row_position(row, timestamp)
        }))
    }

    fn name(&self) -> &'static str {
        "triangle"
    }
}

/// Triangle wave: `top` at phase 0, `bottom` at phase 0.5, back to `top` at
/// phase 1.
#[must_use]
pub fn triangle(top: f64, bottom: f64, period: f64, t: f64) -> f64 {
    let cycles = t / period;
    let progress = cycles - cycles.floor();

    if progress < 0.5 {
        map_range(0.0, 0.5, top, bottom, progress)
    } else {
        map_range(0.5, 1.0, bottom, top, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave_2x2() -> TriangleWave {
        TriangleWave::new(GridSize::new(2, 2), &TriangleOptions::default())
    }

    fn frame_at(wave: &mut TriangleWave, timestamp: f64) -> Grid {
        let last = Grid::filled(GridSize::new(2, 2), 0.0);
        wave.next_frame(timestamp, 0.0, &last).into_frame().unwrap()
    }

    #[test]
    fn test_triangle_shape() {
        assert_eq!(triangle(-30000.0, -50000.0, 20.0, 0.0), -30000.0);
        assert_eq!(triangle(-30000.0, -50000.0, 20.0, 5.0), -40000.0);
        assert_eq!(triangle(-30000.0, -50000.0, 20.0, 10.0), -50000.0);
        assert_eq!(triangle(-30000.0, -50000.0, 20.0, 15.0), -40000.0);
        // Periodic
        assert_eq!(triangle(-30000.0, -50000.0, 20.0, 25.0), -40000.0);
    }

    #[test]
    fn test_start_of_run_is_top() {
        let mut wave = wave_2x2();
        let frame = frame_at(&mut wave, 0.0);
        assert_eq!(frame.get(0, 0), -30000.0);
        assert_eq!(frame.get(0, 1), -30000.0);
    }

    #[test]
    fn test_quarter_period_is_midpoint() {
        let mut wave = wave_2x2();
        let frame = frame_at(&mut wave, 5.0);
        assert_eq!(frame.get(0, 0), -40000.0);
        assert_eq!(frame.get(0, 1), -40000.0);
    }

    #[test]
    fn test_rows_are_phase_shifted() {
        let mut wave = wave_2x2();
        // Row 1 leads row 0 by 20 / 2 / 2 = 5 seconds
        let frame = frame_at(&mut wave, 0.0);
        assert_eq!(frame.get(1, 0), -40000.0);
        assert_eq!(frame.get(1, 1), -40000.0);
        let frame = frame_at(&mut wave, 5.0);
        assert_eq!(frame.get(1, 0), -50000.0);
    }

    #[test]
    fn test_wave_stays_between_top_and_bottom() {
        let mut wave = wave_2x2();
        for i in 0..400 {
            let frame = frame_at(&mut wave, f64::from(i) * 0.137);
            for (_, _, position) in frame.cells() {
                assert!((-50000.0..=-30000.0).contains(&position));
            }
        }
    }
}
