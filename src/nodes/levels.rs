//! Per-level expansion state.
//!
//! The same node definition can be reached at several nesting levels of a
//! recursive structure, and each occurrence is opened and closed on its own.
//! State is therefore keyed by level, with a default for levels never touched.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelsOpen {
    levels: BTreeMap<usize, bool>,
    default: bool,
}

impl LevelsOpen {
    /// State where every level starts as `default`.
    pub fn new(default: bool) -> Self {
        Self {
            levels: BTreeMap::new(),
            default,
        }
    }

    pub fn is_open(&self, level: usize) -> bool {
        self.levels.get(&level).copied().unwrap_or(self.default)
    }

    pub fn set(&mut self, level: usize, open: bool) {
        self.levels.insert(level, open);
    }

    /// Flip the state at `level` and return the new state.
    pub fn toggle(&mut self, level: usize) -> bool {
        let open = !self.is_open(level);
        self.set(level, open);
        open
    }

    /// Set every level, including ones not yet visited.
    pub fn set_all(&mut self, open: bool) {
        self.levels.clear();
        self.default = open;
    }
}
