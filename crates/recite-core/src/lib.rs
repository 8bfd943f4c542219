//! recite-core — Roster store, persistence, and weighted cold-call selection.
//!
//! This crate holds everything a classroom picker needs besides its user
//! interface: the roster of students and scores, the on-disk roster file, the
//! audit log, list import, score-sheet export, and the weighted selector that
//! favors students with fewer points.

pub mod audit;
pub mod classroom;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod roster;
pub mod selector;
pub mod storage;

pub use classroom::Classroom;
pub use config::{load_config, load_config_from, ReciteConfig};
pub use error::RosterError;
pub use roster::Roster;
pub use selector::{Grade, WeightedSelector};
