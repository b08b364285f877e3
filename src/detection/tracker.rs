use std::time::Duration;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::DetectionEvent;

/// An accepted detection as it was written to the history
#[derive(Debug, Clone)]
pub struct TrackedDetection {
    pub id: Uuid,
    pub event: DetectionEvent,
    pub accepted_at: OffsetDateTime,
}

/// Append-only record of every detection that made it past the gates.
/// Diagnostics only; the ledger never reads from it.
#[derive(Debug, Default, Clone)]
pub struct DetectionTracker {
    history: Vec<TrackedDetection>,
}

impl DetectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &DetectionEvent) -> &TrackedDetection {
        self.history.push(TrackedDetection {
            id: Uuid::new_v4(),
            event: *event,
            accepted_at: OffsetDateTime::now_utc(),
        });
        &self.history[self.history.len() - 1]
    }

    pub fn history(&self) -> &[TrackedDetection] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Time between the first and the last recorded event
    pub fn span(&self) -> Option<Duration> {
        let first = self.history.first()?;
        let last = self.history.last()?;
        Some(
            last.event
                .timestamp
                .saturating_duration_since(first.event.timestamp),
        )
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}
