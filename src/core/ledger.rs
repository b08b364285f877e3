use serde::Serialize;

use crate::models::{DetectionEvent, Denomination};

/// Count and subtotal for one denomination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    denomination: Denomination,
    count: u64,
    subtotal: u64,
}

impl LedgerEntry {
    fn first(denomination: Denomination) -> Self {
        Self {
            denomination,
            count: 1,
            subtotal: denomination.value(),
        }
    }

    fn increment(&mut self) {
        self.count += 1;
        self.subtotal = self.count * self.denomination.value();
    }

    pub fn denomination(&self) -> Denomination {
        self.denomination
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn subtotal(&self) -> u64 {
        self.subtotal
    }
}

/// Owned, read-only copy of the ledger handed to exporters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    pub entries: Vec<LedgerEntry>,
    pub total: u64,
}

/// Aggregated notes per denomination, kept sorted by descending face value.
///
/// Entries are only created or bumped through [`Ledger::apply`]; subtotals
/// are recomputed from the count on every change.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one accepted note and return its updated entry
    pub fn apply(&mut self, event: &DetectionEvent) -> LedgerEntry {
        let denomination = event.denomination;
        let updated = match self
            .entries
            .iter_mut()
            .find(|e| e.denomination == denomination)
        {
            Some(entry) => {
                entry.increment();
                *entry
            }
            None => {
                let entry = LedgerEntry::first(denomination);
                self.entries.push(entry);
                entry
            }
        };

        self.entries
            .sort_by(|a, b| b.denomination.cmp(&a.denomination));
        updated
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn entry(&self, denomination: Denomination) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| e.denomination == denomination)
    }

    /// Sum of all subtotals, recomputed on every call
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.subtotal).sum()
    }

    /// Number of notes counted across all denominations
    pub fn note_count(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            entries: self.entries.clone(),
            total: self.total(),
        }
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
