// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction state tracking, independent of rendering.
//!
//! UI events (hover, search keystrokes, legend toggles) mutate this state;
//! a renderer reads it back to style marks. The tracker never touches
//! geometry, so the "interaction state to visual style" mapping stays a pure
//! function in the rendering layer.

extern crate alloc;

use alloc::string::String;

use hashbrown::HashMap;

/// One boolean interaction flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// User-toggled inclusion (legend filtering). Persists across searches
    /// and hovers.
    Active,
    /// Matched by the current search query. Fully recomputed per query.
    Matched,
    /// Currently hovered.
    Hovered,
}

/// The flags tracked per entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagSet {
    /// See [`Flag::Active`].
    pub active: bool,
    /// See [`Flag::Matched`].
    pub matched: bool,
    /// See [`Flag::Hovered`].
    pub hovered: bool,
}

impl FlagSet {
    fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Active => self.active,
            Flag::Matched => self.matched,
            Flag::Hovered => self.hovered,
        }
    }

    fn set(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::Active => self.active = value,
            Flag::Matched => self.matched = value,
            Flag::Hovered => self.hovered = value,
        }
    }
}

/// Per-entity interaction state for one chart session.
///
/// Entities are keyed by a stable string identity (a node name, a series
/// label). Unknown entities read as all-false.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    flags: HashMap<String, FlagSet>,
}

impl InteractionState {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one flag for one entity.
    pub fn set(&mut self, id: &str, flag: Flag, value: bool) {
        self.entry(id).set(flag, value);
    }

    /// Reads an entity's flags (all false if never touched).
    pub fn flags(&self, id: &str) -> FlagSet {
        self.flags.get(id).copied().unwrap_or_default()
    }

    /// Flips one flag and returns the new value.
    pub fn toggle(&mut self, id: &str, flag: Flag) -> bool {
        let entry = self.entry(id);
        let value = !entry.get(flag);
        entry.set(flag, value);
        value
    }

    /// Clears one flag on every tracked entity.
    pub fn reset_all(&mut self, flag: Flag) {
        for set in self.flags.values_mut() {
            set.set(flag, false);
        }
    }

    /// Replaces the matched set with exactly `ids`.
    ///
    /// Matches are recomputed from scratch on every query so stale matches
    /// from earlier keystrokes never accumulate.
    pub fn set_matches<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.reset_all(Flag::Matched);
        for id in ids {
            self.entry(id).matched = true;
        }
    }

    /// Recomputes matches with a case-insensitive substring search over
    /// `(id, label)` pairs. An empty query clears all matches.
    pub fn search<'a>(&mut self, query: &str, entities: impl IntoIterator<Item = (&'a str, &'a str)>) {
        self.reset_all(Flag::Matched);
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return;
        }
        for (id, label) in entities {
            if label.to_lowercase().contains(needle.as_str()) {
                self.entry(id).matched = true;
            }
        }
    }

    fn entry(&mut self, id: &str) -> &mut FlagSet {
        self.flags.entry_ref(id).or_default()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn unknown_entities_read_all_false() {
        let state = InteractionState::new();
        assert_eq!(state.flags("nobody"), FlagSet::default());
    }

    #[test]
    fn matches_do_not_accumulate_across_queries() {
        let mut state = InteractionState::new();
        let entities = [("Mining", "Mining"), ("Retail", "Retail")];

        state.search("min", entities);
        assert!(state.flags("Mining").matched);
        assert!(!state.flags("Retail").matched);

        state.search("ret", entities);
        assert!(!state.flags("Mining").matched);
        assert!(state.flags("Retail").matched);

        state.search("", entities);
        assert!(!state.flags("Retail").matched);
    }

    #[test]
    fn active_survives_search_and_hover_resets() {
        let mut state = InteractionState::new();
        state.set("Mining", Flag::Active, true);
        state.set("Mining", Flag::Hovered, true);

        state.search("xyz", [("Mining", "Mining")]);
        state.reset_all(Flag::Hovered);

        let flags = state.flags("Mining");
        assert!(flags.active);
        assert!(!flags.hovered);
        assert!(!flags.matched);
    }

    #[test]
    fn toggle_flips_and_reports() {
        let mut state = InteractionState::new();
        assert!(state.toggle("s1", Flag::Active));
        assert!(!state.toggle("s1", Flag::Active));
    }
}
