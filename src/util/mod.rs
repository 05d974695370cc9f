//! Shared utilities.
//!
//! Range mapping helpers used by the animation strategies and fixed-rate
//! frame pacing used by the scheduler.

/// Fixed-rate frame pacing.
pub mod frame_timing;
pub mod range;
