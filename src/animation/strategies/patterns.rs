//! Discrete pattern cycler (targeted).

use crate::animation::{Animation, AnimationEntry, TargetSource};
use crate::grid::{Grid, GridSize};
use crate::options::{Options, PatternOptions};

/// Registry entry.
pub(crate) const ENTRY: AnimationEntry = AnimationEntry {
    name: "patterns",
    aliases: &["targeted", "sample_targeted_animation"],
    description: "cycles through row, checkerboard and column patterns",
    build,
};

fn build(size: GridSize, options: &Options) -> Animation {
    let velocity =
        options.rig.max_velocity * options.animations.targeted.velocity_fraction;
    Animation::targeted(
        size,
        PatternCycler::new(size, &options.animations.patterns),
        velocity,
    )
}

/// Which balls are raised in a pattern; everything else is lowered.
type Raised = fn(usize, usize) -> bool;

const PATTERNS: [(&str, Raised); 6] = [
    ("even rows", |row, _| row % 2 == 0),
    ("odd rows", |row, _| row % 2 == 1),
    ("checkerboard", |row, column| (row + column) % 2 == 0),
    ("inverse checkerboard", |row, column| (row + column) % 2 == 1),
    ("even columns", |_, column| column % 2 == 0),
    ("odd columns", |_, column| column % 2 == 1),
];

/// Steps through a fixed sequence of two-level patterns, holding each for
/// `hold_secs` before moving on, and wraps forever.
#[derive(Debug, Clone)]
pub struct PatternCycler {
    patterns: Vec<Grid>,
    hold_secs: f64,
}

impl PatternCycler {
    /// Pre-compute every pattern for a `size` grid.
    #[must_use]
    pub fn new(size: GridSize, options: &PatternOptions) -> Self {
        let raised = options.offset;
        let lowered = options.offset - options.distance;
        let patterns = PATTERNS
            .iter()
            .map(|(_, is_raised)| {
                Grid::from_fn(size, |row, column| {
                    if is_raised(row, column) {
                        raised
                    } else {
                        lowered
                    }
                })
            })
            .collect();

        Self {
            patterns,
            hold_secs: options.hold_secs,
        }
    }

    /// Number of patterns in the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the cycle has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Index of the pattern shown at `timestamp`.
    #[must_use]
    pub fn pattern_index(&self, timestamp: f64) -> usize {
        let slot = (timestamp / self.hold_secs).floor().max(0.0);
        slot as usize % self.patterns.len()
    }

    /// The pattern at `index`, with its name.
    #[must_use]
    pub fn pattern(&self, index: usize) -> (&'static str, &Grid) {
        (PATTERNS[index].0, &self.patterns[index])
    }
}

impl TargetSource for PatternCycler {
    fn next_targets(
        &mut self,
        timestamp: f64,
        _dt: f64,
        current_targets: &Grid,
    ) -> Option<Grid> {
        let index = self.pattern_index(timestamp);
        let next = &self.patterns[index];
        if next != current_targets {
            log::debug!("patterns: switching to {} at t={timestamp:.2}", PATTERNS[index].0);
        }
        Some(next.clone())
    }

    fn name(&self) -> &'static str {
        "patterns"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::FrameOutcome;

    fn cycler(size: GridSize) -> PatternCycler {
        PatternCycler::new(size, &PatternOptions::default())
    }

    #[test]
    fn test_index_advances_every_hold_period() {
        let cycler = cycler(GridSize::new(2, 2));
        let indices: Vec<usize> = [0.0, 2.9, 3.0, 6.5, 9.0, 12.0, 15.0, 17.9, 18.0, 21.0]
            .iter()
            .map(|&t| cycler.pattern_index(t))
            .collect();
        assert_eq!(indices, vec![0, 0, 1, 2, 3, 4, 5, 5, 0, 1]);
    }

    #[test]
    fn test_patterns_are_two_level() {
        let cycler = cycler(GridSize::new(10, 8));
        assert_eq!(cycler.len(), 6);
        for index in 0..cycler.len() {
            let (name, grid) = cycler.pattern(index);
            for (_, _, value) in grid.cells() {
                assert!(
                    value == -20000.0 || value == -22000.0,
                    "{name}: unexpected level {value}"
                );
            }
        }
    }

    #[test]
    fn test_checkerboards_are_inverse() {
        let cycler = cycler(GridSize::new(3, 3));
        let (_, a) = cycler.pattern(2);
        let (_, b) = cycler.pattern(3);
        for (row, column, value) in a.cells() {
            assert_ne!(value, b.get(row, column));
        }
        assert_eq!(a.get(0, 0), -20000.0);
        assert_eq!(a.get(0, 1), -22000.0);
        assert_eq!(a.get(1, 0), -22000.0);
    }

    #[test]
    fn test_first_tick_jumps_to_first_pattern() {
        let size = GridSize::new(2, 2);
        let mut animation = Animation::targeted(size, cycler(size), 4050.0);
        let last = Grid::filled(size, 0.0);

        let frame = animation.next_frame(0.0, 0.0, &last).unwrap();
        let expected =
            Grid::from_rows(vec![vec![-20000.0, -20000.0], vec![-22000.0, -22000.0]])
                .unwrap();
        assert_eq!(frame, FrameOutcome::Frame(expected));
    }

    #[test]
    fn test_pattern_switch_moves_at_bounded_speed() {
        let size = GridSize::new(2, 2);
        let mut animation = Animation::targeted(size, cycler(size), 4000.0);
        let mut frame = animation
            .next_frame(0.0, 0.0, &Grid::filled(size, 0.0))
            .unwrap()
            .into_frame()
            .unwrap();

        // Pattern 1 swaps the rows; 0.1 s at 4000 steps/s moves 400 steps
        frame = animation
            .next_frame(3.0, 0.1, &frame)
            .unwrap()
            .into_frame()
            .unwrap();
        assert_eq!(frame.get(0, 0), -20400.0);
        assert_eq!(frame.get(1, 0), -21600.0);
    }

    #[test]
    fn test_build_moves_at_fraction_of_max_velocity() {
        let options = Options::default();
        match (ENTRY.build)(GridSize::new(2, 2), &options) {
            Animation::Targeted(targeted) => {
                assert!((targeted.velocity() - 4050.0).abs() < 1e-9);
                assert_eq!(targeted.name(), "patterns");
            }
            other => panic!("expected a targeted animation, got {other:?}"),
        }
    }
}
