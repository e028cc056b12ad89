//! People known to the department: keys, records, and the roster.
//!
//! The roster is built once per run by the directory adapter and is
//! read-only afterwards; the matching core only ever iterates it.

use serde::{Deserialize, Serialize};

/// Identity of a roster entry: normalized (last name, first names).
///
/// Field order matters: deriving `Ord` gives the lexicographic
/// (last name, then first names) order used to sort aggregated output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonKey {
    /// Normalized last name
    pub last: String,
    /// Normalized first-names span (may contain initials)
    pub firsts: String,
}

impl PersonKey {
    pub fn new(last: impl Into<String>, firsts: impl Into<String>) -> Self {
        Self {
            last: last.into(),
            firsts: firsts.into(),
        }
    }
}

/// Department role of a roster entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Faculty,
    Postdoc,
    Student,
}

/// Metadata attached to one person in the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Department role
    pub role: Role,

    /// Position title as shown on the people page (may be empty)
    pub position: String,

    /// Portrait URL with any cache-busting query string removed
    pub image_url: String,
}

/// Insertion-ordered directory of known people.
///
/// Iteration order is insertion order, which makes the matcher's
/// "first candidate wins" tie-break deterministic across runs.
/// Inserting an existing key overwrites its record in place
/// (last write wins, e.g. a postdoc also listed as faculty).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    entries: Vec<(PersonKey, PersonRecord)>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a person, overwriting the record if the key already exists.
    pub fn insert(&mut self, key: PersonKey, record: PersonRecord) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = record;
        } else {
            self.entries.push((key, record));
        }
    }

    /// Look up the record for a key.
    pub fn get(&self, key: &PersonKey) -> Option<&PersonRecord> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, r)| r)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PersonKey, &PersonRecord)> {
        self.entries.iter().map(|(k, r)| (k, r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PersonKey, PersonRecord)> for Roster {
    fn from_iter<I: IntoIterator<Item = (PersonKey, PersonRecord)>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for (key, record) in iter {
            roster.insert(key, record);
        }
        roster
    }
}
