//! Name-based lookup of animation strategies.
//!
//! The CLI selects an animation by name; the registry maps names (and
//! aliases) to constructors that build the strategy from [`Options`].

use super::{strategies, Animation};
use crate::error::KinesisError;
use crate::grid::GridSize;
use crate::options::Options;

/// Builds an animation for a grid of the given size.
pub type BuildFn = fn(GridSize, &Options) -> Animation;

/// A registered strategy.
#[derive(Clone, Copy)]
pub struct AnimationEntry {
    /// Primary name, shown by `--list`.
    pub name: &'static str,
    /// Alternative names that resolve to the same strategy.
    pub aliases: &'static [&'static str],
    /// One-line description.
    pub description: &'static str,
    /// Constructor.
    pub build: BuildFn,
}

impl AnimationEntry {
    /// Whether `name` is this entry's name or one of its aliases.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

impl std::fmt::Debug for AnimationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationEntry")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

/// Registered strategies, in registration order.
#[derive(Debug, Clone, Default)]
pub struct AnimationRegistry {
    entries: Vec<AnimationEntry>,
}

impl AnimationRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every bundled strategy.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: strategies::builtin_entries(),
        }
    }

    /// Add `entry`, replacing any entry with the same primary name.
    /// Returns the replaced entry.
    pub fn register(&mut self, entry: AnimationEntry) -> Option<AnimationEntry> {
        if let Some(existing) =
            self.entries.iter_mut().find(|e| e.name == entry.name)
        {
            return Some(std::mem::replace(existing, entry));
        }
        self.entries.push(entry);
        None
    }

    /// Entry registered under `name` or an alias of it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnimationEntry> {
        self.entries.iter().find(|e| e.matches(name))
    }

    /// Primary names, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    /// All entries, in registration order.
    #[must_use]
    pub fn entries(&self) -> &[AnimationEntry] {
        &self.entries
    }

    /// Build the animation registered under `name` for the rig described
    /// by `options`.
    pub fn create(
        &self,
        name: &str,
        options: &Options,
    ) -> Result<Animation, KinesisError> {
        let entry =
            self.get(name)
                .ok_or_else(|| KinesisError::UnknownAnimation {
                    name: name.to_owned(),
                    available: self.names(),
                })?;
        let animation = (entry.build)(options.rig.grid_size(), options);
        log::info!(
            "Created {} animation '{}' for a {} grid",
            animation.kind(),
            animation.name(),
            animation.size()
        );
        Ok(animation)
    }
}
