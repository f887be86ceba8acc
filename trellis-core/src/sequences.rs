//! Memoized snapshots of composed registration values.
//!
//! Every node visited during a registration walk records one entry here,
//! keyed by its composed route name. The table lets the rest of an
//! application ask "what name / view / URL prefix did blueprint X end up
//! with" without re-walking the tree.
//!
//! A blueprint nested under several groups registers once per group, each
//! time under a different composed name. The `group` field disambiguates:
//! under [`GroupNameMode::OnlyBase`] every entry of a tree carries the
//! outermost blueprint's key, under [`GroupNameMode::EveryGroup`] each
//! group scopes its own subtree.
//!
//! [`GroupNameMode::OnlyBase`]: crate::config::GroupNameMode::OnlyBase
//! [`GroupNameMode::EveryGroup`]: crate::config::GroupNameMode::EveryGroup

use std::collections::HashMap;

use crate::context::TraceFrame;

/// One memoized registration of a blueprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceEntry {
    /// Key of the blueprint that registered.
    pub key: String,
    /// Key of the group blueprint that pulled it in, if any.
    pub called_by: Option<String>,
    /// Resolved sequence-group key.
    pub group: String,
    /// Composed route name, also the table key.
    pub name: String,
    /// Composed view name.
    pub view: String,
    /// Composed URL prefix.
    pub prefix: String,
    /// Frames of the walk that produced this entry, root first.
    pub trace: Vec<TraceFrame>,
}

/// Insertion-ordered table of [`SequenceEntry`] values, keyed by composed
/// route name. Recording is first-write-wins: once a composed name is
/// present, later recordings of the same name are ignored.
#[derive(Debug, Default)]
pub struct Sequences {
    entries: Vec<SequenceEntry>,
    index: HashMap<String, usize>,
}

impl Sequences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an entry unless its composed name is already present.
    /// Returns whether the entry was stored.
    pub fn record(&mut self, entry: SequenceEntry) -> bool {
        if self.index.contains_key(&entry.name) {
            return false;
        }
        self.index.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Looks up the entry registered under the given composed route name.
    pub fn get(&self, name: &str) -> Option<&SequenceEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Finds the first entry (in registration order) recorded by the
    /// blueprint with the given key, optionally pinned to one group.
    pub fn lookup(&self, key: &str, group: Option<&str>) -> Option<&SequenceEntry> {
        self.entries.iter().find(|entry| {
            entry.key == key && group.map_or(true, |g| entry.group == g)
        })
    }

    /// Composed route name of the given blueprint within a group.
    pub fn route_name(&self, key: &str, group: Option<&str>) -> Option<&str> {
        self.lookup(key, group).map(|entry| entry.name.as_str())
    }

    /// Composed view name of the given blueprint within a group.
    pub fn view_name(&self, key: &str, group: Option<&str>) -> Option<&str> {
        self.lookup(key, group).map(|entry| entry.view.as_str())
    }

    /// Composed URL prefix of the given blueprint within a group.
    pub fn url_prefix(&self, key: &str, group: Option<&str>) -> Option<&str> {
        self.lookup(key, group).map(|entry| entry.prefix.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SequenceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
