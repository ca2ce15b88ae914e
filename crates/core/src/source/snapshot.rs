//! Immutable view of the ledger for the duration of a query.

use std::hash::{DefaultHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{EntryLineSource, SourceError};
use crate::fiscal::Exercise;
use crate::ledger::{Account, AccountCatalog, EntryLine, LineError, Normalized, normalize_all, normalize_lines};

/// Kind of stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Entry line.
    EntryLine,
    /// Chart-of-accounts entry.
    Account,
    /// Exercise.
    Exercise,
}

/// A stored record that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRejection {
    /// Kind of record.
    pub kind: RecordKind,
    /// Zero-based position in what the source returned.
    pub position: usize,
    /// Reason.
    pub error: LineError,
}

/// Entry lines, accounts and exercises read at one point in time.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    /// Entry lines, in source order.
    pub lines: Vec<EntryLine>,
    /// Chart of accounts.
    pub catalog: AccountCatalog,
    /// Exercises.
    pub exercises: Vec<Exercise>,
    /// Records left out because they could not be normalized.
    pub rejected: Vec<SourceRejection>,
    version: u64,
}

impl LedgerSnapshot {
    /// Creates a snapshot from canonical values.
    #[must_use]
    pub fn new(lines: Vec<EntryLine>, catalog: AccountCatalog, exercises: Vec<Exercise>) -> Self {
        let mut hasher = DefaultHasher::new();
        lines.hash(&mut hasher);
        catalog.hash(&mut hasher);
        exercises.hash(&mut hasher);

        Self {
            lines,
            catalog,
            exercises,
            rejected: Vec::new(),
            version: hasher.finish(),
        }
    }

    /// Reads and normalizes every record of `source`.
    ///
    /// # Errors
    ///
    /// Propagates the first [`SourceError`] raised by the source.
    pub async fn load<S: EntryLineSource + ?Sized>(source: &S) -> Result<Self, SourceError> {
        let raw_lines = source.get_all_entry_lines().await?;
        let raw_accounts = source.get_all_accounts().await?;
        let raw_exercises = source.get_all_exercises().await?;

        let lines = normalize_lines(raw_lines);
        let accounts: Normalized<Account> = normalize_all(raw_accounts);
        let exercises: Normalized<Exercise> = normalize_all(raw_exercises);

        let rejected: Vec<SourceRejection> = [
            (RecordKind::EntryLine, lines.rejected),
            (RecordKind::Account, accounts.rejected),
            (RecordKind::Exercise, exercises.rejected),
        ]
        .into_iter()
        .flat_map(|(kind, rejected)| {
            rejected
                .into_iter()
                .map(move |(position, error)| SourceRejection { kind, position, error })
        })
        .collect();

        if !rejected.is_empty() {
            warn!(rejected = rejected.len(), "Source records left out of snapshot");
        }

        let mut snapshot = Self::new(
            lines.accepted,
            accounts.accepted.into_iter().collect(),
            exercises.accepted,
        );
        snapshot.rejected = rejected;

        debug!(
            lines = snapshot.lines.len(),
            accounts = snapshot.catalog.len(),
            version = snapshot.version,
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Content fingerprint: equal snapshots have equal versions.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }
}
