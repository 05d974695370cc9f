//! Frame resolution for shader-style animations.

use super::{traits::ShaderAnimation, FrameOutcome};
use crate::grid::{Grid, GridSize};

/// Evaluate `shader` for every cell of a `size` grid.
///
/// Every cell is evaluated even after one comes back undefined, so
/// per-cell state machines advance uniformly; the frame is then discarded
/// as [`FrameOutcome::Terminal`].
pub(crate) fn resolve_frame(
    shader: &mut dyn ShaderAnimation,
    size: GridSize,
    timestamp: f64,
    dt: f64,
    last_frame: &Grid,
) -> FrameOutcome {
    let mut undefined = 0usize;
    let frame = Grid::from_fn(size, |row, column| {
        shader
            .ball_position(row, column, timestamp, dt, last_frame.get(row, column))
            .unwrap_or_else(|| {
                undefined += 1;
                f64::NAN
            })
    });

    if undefined > 0 {
        log::debug!(
            "{}: {undefined} undefined cell(s) at t={timestamp:.3}, ending",
            shader.name()
        );
        FrameOutcome::Terminal
    } else {
        FrameOutcome::Frame(frame)
    }
}
