//! Animation contract and bundled strategies.
//!
//! An animation comes in one of three shapes:
//!
//! - [`FrameAnimation`] - computes whole frames itself
//! - [`ShaderAnimation`] - computes one independent ball at a time
//! - [`TargetSource`] - emits discrete targets that the shared [`Targeted`]
//!   base approaches at a bounded velocity
//!
//! [`Animation`] wraps whichever shape a strategy implements and is what the
//! scheduler drives. Strategies are looked up by name through the
//! [`AnimationRegistry`].

mod registry;
mod shader;
pub mod strategies;
mod targeted;
mod traits;

pub use registry::{AnimationEntry, AnimationRegistry, BuildFn};
pub use targeted::{approach, Targeted};
pub use traits::{FrameAnimation, ShaderAnimation, TargetSource};

use crate::error::KinesisError;
use crate::grid::{Grid, GridSize};

/// Result of asking an animation for its next frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Positions to apply this tick.
    Frame(Grid),
    /// The animation is finished; the scheduler stops.
    Terminal,
}

impl FrameOutcome {
    /// Whether this outcome ends the run.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }

    /// The frame, if there is one.
    #[must_use]
    pub fn into_frame(self) -> Option<Grid> {
        match self {
            Self::Frame(frame) => Some(frame),
            Self::Terminal => None,
        }
    }
}

/// A constructed animation of one of the three shapes.
pub enum Animation {
    /// Whole-frame animation.
    Raw {
        /// Grid dimensions the animation was built for.
        size: GridSize,
        /// The strategy.
        animation: Box<dyn FrameAnimation>,
    },
    /// Per-cell animation.
    Shader {
        /// Grid dimensions the animation was built for.
        size: GridSize,
        /// The strategy.
        shader: Box<dyn ShaderAnimation>,
    },
    /// Target-driven animation with shared interpolation.
    Targeted(Targeted),
}

impl Animation {
    /// Wrap a whole-frame strategy.
    #[must_use]
    pub fn raw(size: GridSize, animation: impl FrameAnimation + 'static) -> Self {
        Self::Raw {
            size,
            animation: Box::new(animation),
        }
    }

    /// Wrap a per-cell strategy.
    #[must_use]
    pub fn shader(size: GridSize, shader: impl ShaderAnimation + 'static) -> Self {
        Self::Shader {
            size,
            shader: Box::new(shader),
        }
    }

    /// Wrap a target source in the shared interpolator.
    #[must_use]
    pub fn targeted(
        size: GridSize,
        source: impl TargetSource + 'static,
        velocity: f64,
    ) -> Self {
        Self::Targeted(Targeted::new(size, Box::new(source), velocity))
    }

    /// Grid dimensions the animation produces.
    #[must_use]
    pub fn size(&self) -> GridSize {
        match self {
            Self::Raw { size, .. } | Self::Shader { size, .. } => *size,
            Self::Targeted(targeted) => targeted.size(),
        }
    }

    /// Strategy name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Raw { animation, .. } => animation.name(),
            Self::Shader { shader, .. } => shader.name(),
            Self::Targeted(targeted) => targeted.name(),
        }
    }

    /// Short label for the animation's shape.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Raw { .. } => "raw",
            Self::Shader { .. } => "shader",
            Self::Targeted(_) => "targeted",
        }
    }

    /// Whether the scheduler should issue a `timestamp == 0` call before the
    /// timed loop. Targeted animations always need it to seed their targets.
    #[must_use]
    pub fn requires_priming(&self) -> bool {
        match self {
            Self::Raw { animation, .. } => animation.requires_priming(),
            Self::Shader { shader, .. } => shader.requires_priming(),
            Self::Targeted(_) => true,
        }
    }

    /// Compute the next frame.
    ///
    /// Both `last_frame` and any produced frame must match the animation's
    /// dimensions; a mismatch is a [`KinesisError::DimensionMismatch`].
    pub fn next_frame(
        &mut self,
        timestamp: f64,
        dt: f64,
        last_frame: &Grid,
    ) -> Result<FrameOutcome, KinesisError> {
        let size = self.size();
        let name = self.name();
        last_frame.ensure_size(size, "rig")?;

        let outcome = match self {
            Self::Raw { animation, .. } => {
                animation.next_frame(timestamp, dt, last_frame)
            }
            Self::Shader { shader: cells, .. } => shader::resolve_frame(
                cells.as_mut(),
                size,
                timestamp,
                dt,
                last_frame,
            ),
            Self::Targeted(targeted) => {
                targeted.next_frame(timestamp, dt, last_frame)?
            }
        };

        if let FrameOutcome::Frame(frame) = &outcome {
            frame.ensure_size(size, name)?;
        }
        Ok(outcome)
    }
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .field("size", &self.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a fixed-size frame regardless of the rig.
    struct WrongSize;

    impl FrameAnimation for WrongSize {
        fn next_frame(&mut self, _: f64, _: f64, _: &Grid) -> FrameOutcome {
            FrameOutcome::Frame(Grid::filled(GridSize::new(1, 1), 0.0))
        }

        fn name(&self) -> &'static str {
            "wrong-size"
        }
    }

    /// Ends immediately.
    struct Done;

    impl FrameAnimation for Done {
        fn next_frame(&mut self, _: f64, _: f64, _: &Grid) -> FrameOutcome {
            FrameOutcome::Terminal
        }
    }

    #[test]
    fn raw_frame_of_wrong_size_is_rejected() {
        let size = GridSize::new(2, 2);
        let mut animation = Animation::raw(size, WrongSize);
        let last = Grid::filled(size, 0.0);
        match animation.next_frame(0.0, 0.0, &last) {
            Err(KinesisError::DimensionMismatch { origin, .. }) => {
                assert_eq!(origin, "wrong-size");
            }
            other => panic!("expected dimension mismatch, got {other:?}"),
        }
    }

    #[test]
    fn last_frame_of_wrong_size_is_rejected() {
        let mut animation = Animation::raw(GridSize::new(2, 2), Done);
        let last = Grid::filled(GridSize::new(2, 3), 0.0);
        assert!(animation.next_frame(1.0, 0.05, &last).is_err());
    }

    #[test]
    fn terminal_passes_through() {
        let size = GridSize::new(2, 2);
        let mut animation = Animation::raw(size, Done);
        let last = Grid::filled(size, 0.0);
        assert_eq!(
            animation.next_frame(1.0, 0.05, &last).unwrap(),
            FrameOutcome::Terminal
        );
        assert_eq!(animation.name(), "unnamed");
        assert_eq!(animation.kind(), "raw");
        assert!(!animation.requires_priming());
    }
}
