//! Bundled animation strategies.
//!
//! Each strategy module exposes an `ENTRY` describing how to build it from
//! [`Options`](crate::options::Options); [`builtin_entries`] lists them in
//! registry order.

mod patterns;
mod rain;
mod triangle;

pub use patterns::PatternCycler;
pub use rain::{CellState, FallProfile, RainDrops};
pub use triangle::{triangle, TriangleWave};

use super::AnimationEntry;

/// Every bundled strategy, in the order `--list` shows them.
#[must_use]
pub fn builtin_entries() -> Vec<AnimationEntry> {
    vec![
        triangle::ENTRY,
        rain::ENTRY,
        rain::RAMPED_ENTRY,
        patterns::ENTRY,
    ]
}
