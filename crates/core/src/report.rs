use std::fmt::Write as _;

use serde::Serialize;

use crate::model::DiffStatus;

/// Observational summary of one diff run. Never affects the encoded bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiffReport {
    pub pairs: Vec<PairReport>,
}

impl DiffReport {
    pub fn has_differences(&self) -> bool {
        self.pairs
            .iter()
            .any(|p| p.summary.added + p.summary.removed + p.summary.modified > 0)
    }

    /// Human-readable rendering, one block per sheet pair.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for pair in &self.pairs {
            let _ = writeln!(
                out,
                "'{}' -> '{}': {} added, {} removed, {} modified, {} unchanged",
                pair.previous,
                pair.next,
                pair.summary.added,
                pair.summary.removed,
                pair.summary.modified,
                pair.summary.unchanged,
            );
            for note in &pair.notes {
                let _ = writeln!(out, "  {note}");
            }
        }
        out
    }
}

/// Diff outcome for one adjacent sheet pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairReport {
    /// Name of the previous sheet in the pair.
    pub previous: String,
    /// Name of the next sheet in the pair.
    pub next: String,
    /// One entry per key of the pair's key union, in classification order.
    pub entries: Vec<DiffEntry>,
    pub notes: Vec<String>,
    pub summary: PairSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffEntry {
    pub key: String,
    pub status: DiffStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PairSummary {
    pub keys: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
}

impl PairSummary {
    pub fn from_entries(entries: &[DiffEntry]) -> Self {
        let mut summary = Self {
            keys: entries.len(),
            ..Self::default()
        };
        for entry in entries {
            match entry.status {
                DiffStatus::Added => summary.added += 1,
                DiffStatus::Removed => summary.removed += 1,
                DiffStatus::Unchanged => summary.unchanged += 1,
                DiffStatus::ModifiedAt(_) => summary.modified += 1,
            }
        }
        summary
    }
}
