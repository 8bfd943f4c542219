//! Classroom session: roster, storage, audit log and selector in one place.
//!
//! Every mutating operation runs through [`Classroom::mutate_and_persist`]:
//! the change is applied to a draft copy, the draft is saved, and only then
//! does it replace the in-memory roster. A failed save therefore leaves both
//! memory and disk as they were and reports [`RosterError::Storage`]. Audit
//! entries are written after the save and never fail the operation.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rand::Rng;

use crate::audit::AuditLog;
use crate::config::ReciteConfig;
use crate::error::{Result, RosterError};
use crate::export::export_score_sheet;
use crate::import::{merge_file, MergeReport};
use crate::roster::Roster;
use crate::selector::{Grade, WeightedSelector};
use crate::storage::RosterFile;

/// A loaded roster bound to its files.
#[derive(Debug)]
pub struct Classroom {
    roster: Roster,
    store: RosterFile,
    audit: AuditLog,
    export_dir: PathBuf,
    selector: WeightedSelector,
}

impl Classroom {
    /// Load the roster named by `config`.
    pub fn open(config: &ReciteConfig) -> Result<Self> {
        Self::open_with(
            RosterFile::new(&config.data_file),
            AuditLog::new(&config.audit_log),
            &config.export_dir,
        )
    }

    /// Load the roster from explicit storage handles.
    pub fn open_with(store: RosterFile, audit: AuditLog, export_dir: &Path) -> Result<Self> {
        let roster = store.load()?;
        Ok(Self {
            roster,
            store,
            audit,
            export_dir: export_dir.to_path_buf(),
            selector: WeightedSelector::new(),
        })
    }

    /// Read-only view of the current roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn store(&self) -> &RosterFile {
        &self.store
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    pub fn selector(&self) -> &WeightedSelector {
        &self.selector
    }

    /// Apply `f` to a draft, save it, then commit it.
    pub fn mutate_and_persist<T>(
        &mut self,
        f: impl FnOnce(&mut Roster) -> Result<T>,
    ) -> Result<T> {
        self.mutate_and_persist_if(f, |_| true)
    }

    /// Like [`Classroom::mutate_and_persist`], but the draft is only saved
    /// and committed when `changed` says the outcome modified it.
    pub fn mutate_and_persist_if<T>(
        &mut self,
        f: impl FnOnce(&mut Roster) -> Result<T>,
        changed: impl FnOnce(&T) -> bool,
    ) -> Result<T> {
        let mut draft = self.roster.clone();
        let out = f(&mut draft)?;
        if changed(&out) {
            self.store.save(&draft)?;
            self.roster = draft;
        }
        Ok(out)
    }

    /// Rewrite the roster file from memory.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.roster)
    }

    /// Record an arbitrary audit entry.
    pub fn append_audit(&self, message: &str) {
        self.audit.record(message);
    }

    /// Add a student with a score of 0. Returns the stored name.
    pub fn add(&mut self, name: &str) -> Result<String> {
        let name = self.mutate_and_persist(|r| r.add(name))?;
        tracing::info!("added {name}");
        self.audit.record(&format!("Added student: {name}"));
        Ok(name)
    }

    /// Remove a student. Returns the score they had.
    pub fn remove(&mut self, name: &str) -> Result<u32> {
        let score = self.mutate_and_persist(|r| r.remove(name))?;
        tracing::info!("removed {name}");
        self.audit.record(&format!("Removed student: {name}"));
        Ok(score)
    }

    /// Overwrite a student's score. Returns the previous score.
    pub fn set_score(&mut self, name: &str, score: i64) -> Result<u32> {
        let old = self.mutate_and_persist(|r| r.set_score(name, score))?;
        self.audit
            .record(&format!("Set score for {name}: {old} -> {score}"));
        Ok(old)
    }

    /// Remove every student, keeping the audit history.
    pub fn clear(&mut self) -> Result<()> {
        self.mutate_and_persist(|r| {
            r.clear();
            Ok(())
        })?;
        self.selector.finish();
        tracing::info!("cleared roster");
        self.audit.record("Cleared all student data");
        Ok(())
    }

    /// Remove every student and wipe the audit history.
    pub fn reset(&mut self) -> Result<()> {
        self.mutate_and_persist(|r| {
            r.clear();
            Ok(())
        })?;
        self.selector.finish();
        if let Err(e) = self.audit.truncate() {
            tracing::warn!(
                "failed to truncate audit log {}: {e}",
                self.audit.path().display()
            );
        }
        tracing::info!("reset class");
        self.audit.record("Reset class: wiped all student data");
        Ok(())
    }

    /// Import new students from a file.
    ///
    /// The roster is saved once, and only if something was added.
    pub fn import_file(&mut self, path: &Path) -> Result<MergeReport> {
        let report =
            self.mutate_and_persist_if(|r| merge_file(r, path), |report| report.added() > 0)?;
        let added = report.added();
        if added > 0 {
            tracing::info!("imported {added} students from {}", path.display());
            self.audit.record(&format!(
                "Imported {added} students from {}",
                path.display()
            ));
        }
        Ok(report)
    }

    /// Pick a student using the thread-local RNG.
    pub fn pick(&mut self) -> Result<String> {
        self.pick_with(&mut rand::rng())
    }

    /// Pick a student using the given RNG.
    pub fn pick_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String> {
        let name = self.selector.select(&self.roster, rng)?;
        self.audit.record(&format!("Picked: {name}"));
        Ok(name)
    }

    /// Grade the pending pick. Returns the student's score afterwards.
    pub fn grade(&mut self, name: &str, grade: Grade) -> Result<u32> {
        self.selector.expect_pending(name)?;
        let score = match grade {
            Grade::Correct => self.mutate_and_persist(|r| r.increment(name))?,
            Grade::Pass => self
                .roster
                .get(name)
                .ok_or_else(|| RosterError::NotFound(name.to_string()))?,
        };
        self.selector.finish();
        self.audit.record(&format!("Graded {name}: {grade}"));
        Ok(score)
    }

    /// Write today's score sheet into the export directory.
    pub fn export(&self, date: NaiveDate) -> Result<PathBuf> {
        let path = export_score_sheet(&self.roster, &self.export_dir, date)?;
        self.audit
            .record(&format!("Exported data to {}", path.display()));
        Ok(path)
    }
}
