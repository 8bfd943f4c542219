//! Weighted cold-call selection.
//!
//! Each student is weighted `1 / (1 + score)`, so students with fewer points
//! are more likely to be called on, but nobody is ever excluded. A pick is a
//! single weighted draw; any "rolling" names a presentation layer shows
//! beforehand are its own business and never reach this module.
//!
//! The selector is a small state machine: `Idle -> AwaitingGrade -> Idle`.
//! A grade is only accepted for the name returned by the last pick.

use std::fmt;
use std::str::FromStr;

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};
use crate::roster::Roster;

/// Selection weight for a score.
pub fn weight(score: u32) -> f64 {
    1.0 / (1.0 + f64::from(score))
}

/// Probability of each student being picked, in roster order.
pub fn probabilities(roster: &Roster) -> Vec<(&str, f64)> {
    let total: f64 = roster.iter().map(|(_, s)| weight(s)).sum();
    roster
        .iter()
        .map(|(name, s)| (name, weight(s) / total))
        .collect()
}

/// One weighted draw over the whole roster.
pub fn draw<'r, R: Rng + ?Sized>(roster: &'r Roster, rng: &mut R) -> Result<&'r str> {
    if roster.is_empty() {
        return Err(RosterError::EmptyRoster);
    }
    let names: Vec<&str> = roster.names().collect();
    let dist = WeightedIndex::new(roster.iter().map(|(_, s)| weight(s)))
        .map_err(|_| RosterError::EmptyRoster)?;
    Ok(names[dist.sample(rng)])
}

/// Outcome of answering a cold call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    /// Answered correctly: one point.
    Correct,
    /// Incorrect or passed: no change.
    Pass,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Correct => write!(f, "Correct"),
            Grade::Pass => write!(f, "Pass"),
        }
    }
}

impl Grade {
    /// Interpret an answer to the interactive grade prompt.
    ///
    /// Only `1` counts as correct; anything else is a pass.
    pub fn from_prompt(answer: &str) -> Self {
        if answer.trim() == "1" {
            Grade::Correct
        } else {
            Grade::Pass
        }
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "correct" => Ok(Grade::Correct),
            "pass" | "incorrect" => Ok(Grade::Pass),
            other => Err(format!("unknown grade: {other} (expected correct or pass)")),
        }
    }
}

/// Where the selector is in the pick/grade cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectorState {
    #[default]
    Idle,
    AwaitingGrade {
        name: String,
    },
}

/// Picks students and tracks which pick is waiting for a grade.
#[derive(Debug, Default)]
pub struct WeightedSelector {
    state: SelectorState,
}

impl WeightedSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    /// Name waiting for a grade, if any.
    pub fn pending(&self) -> Option<&str> {
        match &self.state {
            SelectorState::AwaitingGrade { name } => Some(name.as_str()),
            SelectorState::Idle => None,
        }
    }

    /// Pick a student and wait for their grade.
    ///
    /// Picking again before grading abandons the earlier pick.
    pub fn select<R: Rng + ?Sized>(&mut self, roster: &Roster, rng: &mut R) -> Result<String> {
        let name = draw(roster, rng)?.to_string();
        if let Some(previous) = self.pending() {
            tracing::debug!("abandoning ungraded pick of {previous}");
        }
        self.state = SelectorState::AwaitingGrade { name: name.clone() };
        Ok(name)
    }

    /// Check that `name` is the pick awaiting a grade.
    pub fn expect_pending(&self, name: &str) -> Result<()> {
        match &self.state {
            SelectorState::AwaitingGrade { name: pending } if pending == name => Ok(()),
            SelectorState::AwaitingGrade { name: pending } => Err(RosterError::InvalidState {
                name: name.to_string(),
                reason: format!("the pending pick is {pending}"),
            }),
            SelectorState::Idle => Err(RosterError::InvalidState {
                name: name.to_string(),
                reason: "no pick is awaiting a grade".into(),
            }),
        }
    }

    /// Return to `Idle` after a grade has been recorded.
    pub fn finish(&mut self) {
        self.state = SelectorState::Idle;
    }
}
