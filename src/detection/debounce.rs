use std::time::{Duration, Instant};

use crate::error::RejectReason;
use crate::models::{DetectionEvent, Denomination};
use crate::pipeline::Gate;

pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(2000);

/// Suppresses the same note being counted again on consecutive frames.
///
/// Only repeats of the *last accepted* denomination are held back; any other
/// denomination passes immediately, however soon it arrives.
#[derive(Debug, Clone)]
pub struct Debouncer {
    // Denomination and timestamp are always set and cleared together
    last: Option<(Denomination, Instant)>,
    cooldown: Duration,
}

impl Debouncer {
    pub fn new(cooldown: Duration) -> Self {
        Self { last: None, cooldown }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn last_denomination(&self) -> Option<Denomination> {
        self.last.map(|(d, _)| d)
    }

    pub fn last_timestamp(&self) -> Option<Instant> {
        self.last.map(|(_, t)| t)
    }

    /// Decide whether the event counts, recording it as the latest accepted
    /// event when it does.
    pub fn should_count(&mut self, event: &DetectionEvent) -> bool {
        self.evaluate(event).is_ok()
    }

    /// Clear the remembered event so the next one is always accepted
    pub fn reset(&mut self) {
        self.last = None;
    }

    fn evaluate(&mut self, event: &DetectionEvent) -> Result<(), RejectReason> {
        if let Some((denomination, at)) = self.last {
            // An event stamped before the last one counts as zero elapsed time
            let elapsed = event.timestamp.saturating_duration_since(at);
            if denomination == event.denomination && elapsed < self.cooldown {
                return Err(RejectReason::DuplicateWithinCooldown {
                    denomination,
                    elapsed,
                    cooldown: self.cooldown,
                });
            }
        }

        self.last = Some((event.denomination, event.timestamp));
        Ok(())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl Gate for Debouncer {
    fn check(&mut self, event: &DetectionEvent) -> Result<(), RejectReason> {
        self.evaluate(event)
    }

    fn reset(&mut self) {
        Debouncer::reset(self);
    }

    fn name(&self) -> &str {
        "Debouncer"
    }
}
