//! Optional name → sequence-position index.

use std::collections::HashMap;

use crate::domain::StationName;

/// Station position index.
///
/// Disabled by default. Once enabled, the owning railway rebuilds it after
/// every topology mutation, so a lookup never sees a stale position.
#[derive(Debug, Clone, Default)]
pub(crate) struct NumberMap {
    map: Option<HashMap<StationName, usize>>,
}

impl NumberMap {
    /// Whether the index is built.
    pub fn is_enabled(&self) -> bool {
        self.map.is_some()
    }

    /// Turn the index on, building it from `names` in sequence order.
    pub fn enable<'a>(&mut self, names: impl Iterator<Item = &'a StationName>) {
        if self.map.is_none() {
            self.map = Some(build(names));
        }
    }

    /// Drop the index.
    pub fn disable(&mut self) {
        self.map = None;
    }

    /// Rebuild after a mutation; a no-op while disabled.
    pub fn invalidate<'a>(&mut self, names: impl Iterator<Item = &'a StationName>) {
        if let Some(map) = self.map.as_mut() {
            *map = build(names);
        }
    }

    /// Position of exactly `name`; `None` while disabled.
    pub fn get(&self, name: &StationName) -> Option<usize> {
        self.map.as_ref()?.get(name).copied()
    }
}

fn build<'a>(names: impl Iterator<Item = &'a StationName>) -> HashMap<StationName, usize> {
    names.enumerate().map(|(i, n)| (n.clone(), i)).collect()
}
