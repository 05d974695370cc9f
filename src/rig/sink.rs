//! Consumers of applied frames.
//!
//! A sink sees every frame the rig applies: it is where a visualizer, a
//! motor driver or a recorder plugs in.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::KinesisError;
use crate::grid::Grid;
use crate::options::RigOptions;

/// Receives each frame after the rig applies it.
pub trait FrameSink: Send {
    /// Called with the (read-back) positions and the seconds elapsed since
    /// the rig applied its first frame.
    fn on_frame(
        &mut self,
        elapsed: f64,
        positions: &Grid,
        rig: &RigOptions,
    ) -> Result<(), KinesisError>;

    /// Flush any buffered output. Called once when the run ends.
    fn finish(&mut self) -> Result<(), KinesisError> {
        Ok(())
    }

    /// Optional name for debugging/logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}

#[derive(Serialize)]
struct RecordedFrame<'a> {
    t: f64,
    positions: &'a [Vec<f64>],
}

/// Writes every frame as one JSON object per line:
/// `{"t": <seconds>, "positions": [[row 0...], [row 1...], ...]}`.
pub struct RecordingSink<W: Write + Send = BufWriter<File>> {
    writer: W,
    frames: u64,
}

impl RecordingSink {
    /// Record to a newly created (or truncated) file at `path`.
    pub fn create(path: &Path) -> Result<Self, KinesisError> {
        let file = File::create(path)?;
        log::info!("Recording frames to {}", path.display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> RecordingSink<W> {
    /// Record to any writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer, frames: 0 }
    }

    /// Frames written so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Give back the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> FrameSink for RecordingSink<W> {
    fn on_frame(
        &mut self,
        elapsed: f64,
        positions: &Grid,
        _rig: &RigOptions,
    ) -> Result<(), KinesisError> {
        let rows = positions.to_rows();
        let record = RecordedFrame {
            t: elapsed,
            positions: &rows,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.frames += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), KinesisError> {
        self.writer.flush()?;
        log::info!("Recorded {} frames", self.frames);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

impl<W: Write + Send> std::fmt::Debug for RecordingSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingSink")
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

/// Snapshot of the rig used by [`ReportSink`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigReport {
    /// Row of the deepest ball.
    pub deepest_row: usize,
    /// Column of the deepest ball.
    pub deepest_column: usize,
    /// Depth of the deepest ball in steps below the top.
    pub deepest_steps: f64,
    /// The same depth in millimetres.
    pub deepest_mm: f64,
    /// Mean depth in steps below the top.
    pub mean_steps: f64,
}

impl RigReport {
    /// Summarize `positions`.
    #[must_use]
    pub fn from_positions(positions: &Grid, rig: &RigOptions) -> Self {
        let mut deepest = (0, 0, 0.0_f64);
        let mut sum = 0.0;
        for (row, column, position) in positions.cells() {
            if position < deepest.2 {
                deepest = (row, column, position);
            }
            sum += position;
        }
        let count = positions.size().cell_count().max(1) as f64;

        Self {
            deepest_row: deepest.0,
            deepest_column: deepest.1,
            deepest_steps: -deepest.2,
            deepest_mm: rig.steps_to_mm(deepest.2),
            mean_steps: -sum / count,
        }
    }
}

/// Logs a short summary of the rig every `interval_secs`.
#[derive(Debug, Clone)]
pub struct ReportSink {
    interval_secs: f64,
    next_report: f64,
    frames: u64,
}

impl ReportSink {
    /// Report every `interval_secs` seconds of rig time.
    #[must_use]
    pub fn new(interval_secs: f64) -> Self {
        Self {
            interval_secs,
            next_report: 0.0,
            frames: 0,
        }
    }
}

impl FrameSink for ReportSink {
    fn on_frame(
        &mut self,
        elapsed: f64,
        positions: &Grid,
        rig: &RigOptions,
    ) -> Result<(), KinesisError> {
        self.frames += 1;
        if elapsed < self.next_report {
            return Ok(());
        }
        self.next_report = elapsed + self.interval_secs;

        let report = RigReport::from_positions(positions, rig);
        log::info!(
            "t={elapsed:.1}s frames={} deepest=({}, {}) {:.0} steps / {:.1} mm, mean depth {:.0} steps",
            self.frames,
            report.deepest_row,
            report.deepest_column,
            report.deepest_steps,
            report.deepest_mm,
            report.mean_steps,
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "report"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSize;

    #[test]
    fn test_recording_writes_json_lines() {
        let rig = RigOptions::default();
        let mut sink = RecordingSink::new(Vec::new());
        let frame =
            Grid::from_rows(vec![vec![-1.0, -2.0], vec![-3.0, -4.0]]).unwrap();
        sink.on_frame(0.0, &frame, &rig).unwrap();
        sink.on_frame(0.05, &frame, &rig).unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.frames(), 2);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(value["t"], 0.05);
        assert_eq!(value["positions"][1][0], -3.0);
    }

    #[test]
    fn test_recording_to_file() {
        let path = std::env::temp_dir().join("kinesis_recording_test.jsonl");
        let rig = RigOptions::default();
        let mut sink = RecordingSink::create(&path).unwrap();
        sink.on_frame(0.0, &Grid::filled(GridSize::new(1, 2), -5.0), &rig)
            .unwrap();
        sink.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\"t\":0.0,\"positions\":[[-5.0,-5.0]]}\n");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_report_finds_deepest_ball() {
        let rig = RigOptions::default();
        let frame =
            Grid::from_rows(vec![vec![0.0, -95000.0], vec![-5000.0, 0.0]])
                .unwrap();
        let report = RigReport::from_positions(&frame, &rig);
        assert_eq!((report.deepest_row, report.deepest_column), (0, 1));
        assert_eq!(report.deepest_steps, 95000.0);
        assert!((report.deepest_mm - 1524.0).abs() < 1e-6);
        assert_eq!(report.mean_steps, 25000.0);
    }

    #[test]
    fn test_report_sink_throttles() {
        let rig = RigOptions::default();
        let mut sink = ReportSink::new(5.0);
        let frame = Grid::filled(GridSize::new(1, 1), -10.0);
        for i in 0..200 {
            sink.on_frame(f64::from(i) * 0.05, &frame, &rig).unwrap();
        }
        assert_eq!(sink.frames, 200);
        // Reports at t=0, 5 and the next one is due at 10
        assert!((sink.next_report - 10.0).abs() < 1e-6);
    }
}
