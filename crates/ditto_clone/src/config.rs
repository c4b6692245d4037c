//! Cloner configuration.
//!
//! Settings can be supplied in code through the builder methods on
//! [`CloneConfig`] or read from the environment:
//!
//! - `DITTO_CLONE_MODE`: `tree` (default) or `graph`
//! - `DITTO_CLONE_MAX_DEPTH`: maximum object nesting depth
//!
//! Example: `DITTO_CLONE_MODE=graph DITTO_CLONE_MAX_DEPTH=10000 cargo test`

use std::str::FromStr;

/// Environment variable selecting the [`CloneMode`].
pub const MODE_VAR: &str = "DITTO_CLONE_MODE";
/// Environment variable setting [`CloneConfig::max_depth`].
pub const MAX_DEPTH_VAR: &str = "DITTO_CLONE_MAX_DEPTH";

/// How object identity inside one clone call is treated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum CloneMode {
    /// Every reference is cloned independently. An object reachable twice is
    /// copied twice, and instance cycles recurse until `max_depth` (if set)
    /// stops them.
    #[default]
    Tree,
    /// Objects are tracked by identity for the duration of one call: an
    /// object reachable twice is copied once, and cycles are reproduced in
    /// the copy.
    Graph,
}

impl FromStr for CloneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(CloneMode::Tree),
            "graph" => Ok(CloneMode::Graph),
            other => Err(format!("unknown clone mode `{other}` (expected `tree` or `graph`)")),
        }
    }
}

/// Configuration of a [`Cloner`](crate::Cloner).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct CloneConfig {
    pub mode: CloneMode,
    /// Maximum nesting depth of objects in one clone call. `None` is
    /// unbounded.
    pub max_depth: Option<usize>,
}

impl CloneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mode(mut self, mode: CloneMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Read `DITTO_CLONE_MODE` and `DITTO_CLONE_MAX_DEPTH`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(MODE_VAR).ok().as_deref(),
            std::env::var(MAX_DEPTH_VAR).ok().as_deref(),
        )
    }

    /// Build a configuration from raw variable values.
    pub fn from_vars(mode: Option<&str>, max_depth: Option<&str>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = mode {
            match raw.parse() {
                Ok(mode) => config.mode = mode,
                Err(msg) => tracing::warn!(var = MODE_VAR, %msg, "ignoring clone mode"),
            }
        }

        if let Some(raw) = max_depth {
            match raw.trim().parse::<usize>() {
                Ok(depth) => config.max_depth = Some(depth),
                Err(err) => tracing::warn!(var = MAX_DEPTH_VAR, %err, "ignoring depth limit"),
            }
        }

        config
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
