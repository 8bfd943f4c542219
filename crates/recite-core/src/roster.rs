//! In-memory roster of students and their scores.
//!
//! The roster is the single source of truth during a session. It enforces
//! unique, single-line names and non-negative scores; persistence is handled
//! separately by [`crate::storage::RosterFile`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// Mapping of student name to score.
///
/// Names are compared exactly (case-sensitive). Iteration is in name order,
/// which keeps saved files and listings stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    students: BTreeMap<String, u32>,
}

/// Normalize and validate a student name.
///
/// Surrounding whitespace is trimmed. The result must be non-empty and must
/// not contain a line break, since records are stored one per line.
pub fn validate_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() || name.contains(['\n', '\r']) {
        return Err(RosterError::InvalidName(raw.to_string()));
    }
    Ok(name.to_string())
}

/// Convert a caller-supplied score into the stored representation.
pub fn validate_score(score: i64) -> Result<u32> {
    u32::try_from(score).map_err(|_| RosterError::InvalidScore(score))
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.students.contains_key(name)
    }

    /// Add a new student with a score of 0.
    ///
    /// Returns the normalized name that was stored.
    pub fn add(&mut self, name: &str) -> Result<String> {
        self.insert(name, 0)
    }

    /// Add a new student with an initial score.
    ///
    /// Fails with [`RosterError::DuplicateName`] if the name is taken; the
    /// existing score is never overwritten.
    pub fn insert(&mut self, name: &str, score: u32) -> Result<String> {
        let name = validate_name(name)?;
        if self.students.contains_key(&name) {
            return Err(RosterError::DuplicateName(name));
        }
        self.students.insert(name.clone(), score);
        Ok(name)
    }

    /// Remove a student entirely. Returns the score they had.
    pub fn remove(&mut self, name: &str) -> Result<u32> {
        self.students
            .remove(name)
            .ok_or_else(|| RosterError::NotFound(name.to_string()))
    }

    /// Current score of a student, if present.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.students.get(name).copied()
    }

    /// Snapshot iterator over `(name, score)` pairs in name order.
    ///
    /// Each call starts a fresh pass over the current contents.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.students.iter().map(|(name, score)| (name.as_str(), *score))
    }

    /// Iterate over names only.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.students.keys().map(String::as_str)
    }

    /// Overwrite a student's score. Returns the previous score.
    pub fn set_score(&mut self, name: &str, score: i64) -> Result<u32> {
        let score = validate_score(score)?;
        let slot = self
            .students
            .get_mut(name)
            .ok_or_else(|| RosterError::NotFound(name.to_string()))?;
        Ok(std::mem::replace(slot, score))
    }

    /// Add one point to a student's score. Returns the new score.
    pub fn increment(&mut self, name: &str) -> Result<u32> {
        let slot = self
            .students
            .get_mut(name)
            .ok_or_else(|| RosterError::NotFound(name.to_string()))?;
        *slot = slot
            .checked_add(1)
            .ok_or(RosterError::InvalidScore(i64::from(u32::MAX) + 1))?;
        Ok(*slot)
    }

    /// Remove every student.
    pub fn clear(&mut self) {
        self.students.clear();
    }

    /// Insert or replace a record while hydrating from disk.
    ///
    /// Returns `true` if an earlier record with the same name was replaced.
    pub(crate) fn upsert(&mut self, name: String, score: u32) -> bool {
        self.students.insert(name, score).is_some()
    }
}

impl<'a> FromIterator<(&'a str, u32)> for Roster {
    fn from_iter<I: IntoIterator<Item = (&'a str, u32)>>(iter: I) -> Self {
        Self {
            students: iter
                .into_iter()
                .map(|(name, score)| (name.to_string(), score))
                .collect(),
        }
    }
}
