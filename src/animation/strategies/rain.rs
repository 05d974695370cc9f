//! Rain drops (shader-style, stateful).
//!
//! Each ball idles at the top until it randomly "drops", falls to the
//! bottom, then climbs back up and idles again. Two fall profiles are
//! provided: a constant per-column speed, and a speed that ramps up with
//! depth.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::{Animation, AnimationEntry, ShaderAnimation};
use crate::grid::GridSize;
use crate::options::{Options, RainOptions, RampedRainOptions};
use crate::util::range::map_range_clamp;

/// Registry entry for constant-speed rain.
pub(crate) const ENTRY: AnimationEntry = AnimationEntry {
    name: "rain",
    aliases: &["rain_animation"],
    description: "balls drop at random and bounce back, later columns fall faster",
    build,
};

/// Registry entry for accelerating rain.
pub(crate) const RAMPED_ENTRY: AnimationEntry = AnimationEntry {
    name: "rain_ramped",
    aliases: &[],
    description: "balls drop at random, accelerating as they fall",
    build: build_ramped,
};

fn build(size: GridSize, options: &Options) -> Animation {
    Animation::shader(size, RainDrops::new(size, &options.animations.rain))
}

fn build_ramped(size: GridSize, options: &Options) -> Animation {
    Animation::shader(
        size,
        RainDrops::ramped(
            size,
            &options.animations.rain_ramped,
            options.rig.max_velocity,
        ),
    )
}

/// Motion state of a single ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    /// Resting; may start falling on any tick.
    #[default]
    Idle,
    /// Moving down toward the bottom.
    Falling,
    /// Moving back up toward the top.
    Rising,
}

/// How fast a falling ball moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FallProfile {
    /// Fixed speed per column: `base + step × (columns − column − 1)`.
    /// Rising uses the same speed.
    Constant {
        /// Speed of the last column.
        base_velocity: f64,
        /// Extra speed per column counted back from the last one.
        column_velocity_step: f64,
    },
    /// Speed ramps from `base_velocity / 2` at the top to `max_velocity`
    /// at `bottom × ramp_fraction`. Rising uses `max_velocity`.
    Ramped {
        /// Twice the starting speed.
        base_velocity: f64,
        /// Full speed, reached early in the fall.
        max_velocity: f64,
        /// Fraction of `bottom` where full speed is reached.
        ramp_fraction: f64,
    },
}

/// Per-ball drop/bounce state machine.
#[derive(Debug)]
pub struct RainDrops {
    size: GridSize,
    top: f64,
    bottom: f64,
    trigger_odds: u32,
    profile: FallProfile,
    states: Vec<CellState>,
    rng: StdRng,
    name: &'static str,
}

impl RainDrops {
    /// Constant-speed rain.
    #[must_use]
    pub fn new(size: GridSize, options: &RainOptions) -> Self {
        Self::with_profile(
            size,
            options.top,
            options.bottom,
            options.trigger_odds,
            FallProfile::Constant {
                base_velocity: options.base_velocity,
                column_velocity_step: options.column_velocity_step,
            },
            "rain",
        )
    }

    /// Rain that accelerates with depth, capped at `max_velocity`.
    #[must_use]
    pub fn ramped(
        size: GridSize,
        options: &RampedRainOptions,
        max_velocity: f64,
    ) -> Self {
        Self::with_profile(
            size,
            options.top,
            options.bottom,
            options.trigger_odds,
            FallProfile::Ramped {
                base_velocity: options.base_velocity,
                max_velocity,
                ramp_fraction: options.ramp_fraction,
            },
            "rain_ramped",
        )
    }

    fn with_profile(
        size: GridSize,
        top: f64,
        bottom: f64,
        trigger_odds: u32,
        profile: FallProfile,
        name: &'static str,
    ) -> Self {
        Self {
            size,
            top,
            bottom,
            trigger_odds: trigger_odds.max(1),
            profile,
            states: vec![CellState::Idle; size.cell_count()],
            rng: StdRng::from_os_rng(),
            name,
        }
    }

    /// Replace the random source with a seeded one for reproducible runs.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Current motion state of the ball at `(row, column)`.
    #[must_use]
    pub fn state(&self, row: usize, column: usize) -> CellState {
        self.states[self.index(row, column)]
    }

    fn index(&self, row: usize, column: usize) -> usize {
        debug_assert!(
            row < self.size.rows && column < self.size.columns,
            "cell ({row}, {column}) outside {} grid",
            self.size
        );
        row * self.size.columns + column
    }

    /// Fall speed of a ball in `column` currently at `position`.
    #[must_use]
    pub fn fall_velocity(&self, column: usize, position: f64) -> f64 {
        match self.profile {
            FallProfile::Constant {
                base_velocity,
                column_velocity_step,
            } => {
                debug_assert!(
                    column < self.size.columns,
                    "column {column} outside {} grid",
                    self.size
                );
                let columns_behind =
                    self.size.columns.saturating_sub(column + 1);
                base_velocity + column_velocity_step * columns_behind as f64
            }
            FallProfile::Ramped {
                base_velocity,
                max_velocity,
                ramp_fraction,
            } => map_range_clamp(
                self.top,
                self.bottom * ramp_fraction,
                base_velocity * 0.5,
                max_velocity,
                position,
            ),
        }
    }

    /// Climb speed of a ball in `column`.
    #[must_use]
    pub fn rise_velocity(&self, column: usize) -> f64 {
        match self.profile {
            FallProfile::Constant { .. } => self.fall_velocity(column, self.top),
            FallProfile::Ramped { max_velocity, .. } => max_velocity,
        }
    }
}

impl ShaderAnimation for RainDrops {
    fn ball_position(
        &mut self,
        row: usize,
        column: usize,
        timestamp: f64,
        dt: f64,
        last_position: f64,
    ) -> Option<f64> {
        // Reset tick: everything starts at the top, whatever the state
        if timestamp == 0.0 {
            return Some(self.top);
        }

        let idx = self.index(row, column);
        let mut position = last_position;

        let next_state = match self.states[idx] {
            CellState::Idle => {
                if self.rng.random_range(0..self.trigger_odds) == 0 {
                    CellState::Falling
                } else {
                    CellState::Idle
                }
            }
            CellState::Falling => {
                position -= self.fall_velocity(column, position) * dt;
                if position <= self.bottom {
                    position = self.bottom;
                    CellState::Rising
                } else {
                    CellState::Falling
                }
            }
            CellState::Rising => {
                position += self.rise_velocity(column) * dt;
                if position >= self.top {
                    position = self.top;
                    CellState::Idle
                } else {
                    CellState::Rising
                }
            }
        };

        self.states[idx] = next_state;
        Some(position)
    }

    fn requires_priming(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
