// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Frame scheduler and animation strategies for a kinetic ball-grid
//! sculpture.
//!
//! A grid of balls hangs from motor-driven cables; each ball's vertical
//! position is `0.0` at the top of travel and `-max_distance` at the
//! bottom. Kinesis produces a frame of positions per tick and applies it to
//! a simulated rig that reports any position or speed the hardware could not
//! honour.
//!
//! # Key entry points
//!
//! - [`animation::AnimationRegistry`] - builds a strategy by name
//! - [`animation::Animation`] - the three animation shapes (whole-frame,
//!   per-cell, targeted)
//! - [`rig::RigState`] - authoritative positions with limit diagnostics
//! - [`scheduler::Scheduler`] - the fixed-rate tick loop
//! - [`options::Options`] - rig, scheduler and per-strategy configuration
//!
//! # Example
//!
//! ```no_run
//! use kinesis::animation::AnimationRegistry;
//! use kinesis::options::Options;
//! use kinesis::rig::RigState;
//! use kinesis::scheduler::Scheduler;
//!
//! # fn main() -> Result<(), kinesis::error::KinesisError> {
//! let options = Options::default();
//! let animation = AnimationRegistry::builtin().create("rain", &options)?;
//! let rig = RigState::new(options.rig.clone());
//! let mut scheduler = Scheduler::new(rig, animation, options.scheduler)?;
//! let summary = scheduler.run()?;
//! println!("{} frames", summary.frames_applied);
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod error;
pub mod grid;
pub mod options;
pub mod rig;
pub mod scheduler;
pub mod util;
