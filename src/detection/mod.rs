pub mod confidence;
pub mod debounce;
pub mod performance;
pub mod preprocessing;
pub mod summary;
pub mod tracker;

pub use confidence::{ConfidenceFilter, DEFAULT_CONFIDENCE_THRESHOLD};
pub use debounce::{DEFAULT_COOLDOWN, Debouncer};
pub use performance::{LatencyReport, PerformanceMonitor};
pub use summary::{format_rupiah, summarize};
pub use tracker::{DetectionTracker, TrackedDetection};

use crate::config::CounterConfig;
use crate::pipeline::GateChain;

/// Build the standard gate chain: confidence first, then the debouncer.
///
/// The order matters: a low-confidence frame must not refresh the
/// debouncer's cooldown.
pub fn build_standard_gates(config: &CounterConfig) -> GateChain {
    GateChain::new()
        .add_gate(Box::new(ConfidenceFilter::new(config.confidence_threshold)))
        .add_gate(Box::new(Debouncer::new(config.cooldown)))
}
