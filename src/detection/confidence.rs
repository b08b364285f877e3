use crate::error::RejectReason;
use crate::models::DetectionEvent;
use crate::pipeline::Gate;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Stateless gate rejecting detections the recognizer is unsure about
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceFilter {
    threshold: f32,
}

impl ConfidenceFilter {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// True iff the event's confidence reaches the threshold.
    /// A NaN confidence never does.
    pub fn accepts(&self, event: &DetectionEvent) -> bool {
        event.confidence >= self.threshold
    }
}

impl Default for ConfidenceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

impl Gate for ConfidenceFilter {
    fn check(&mut self, event: &DetectionEvent) -> Result<(), RejectReason> {
        if self.accepts(event) {
            Ok(())
        } else {
            Err(RejectReason::LowConfidence {
                confidence: event.confidence,
                threshold: self.threshold,
            })
        }
    }

    fn name(&self) -> &str {
        "Confidence Filter"
    }
}
