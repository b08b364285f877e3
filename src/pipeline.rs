use crate::error::RejectReason;
use crate::models::DetectionEvent;

/// Result of running an event through the gate chain
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    Accepted(DetectionEvent),
    Rejected(RejectReason),
}

impl GateOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, GateOutcome::Accepted(_))
    }
}

/// Trait that all gates must implement
pub trait Gate: Send {
    /// Inspect an event and either let it through or say why not.
    /// Stateful gates update their state only on the accepting path.
    fn check(&mut self, event: &DetectionEvent) -> Result<(), RejectReason>;

    /// Forget any state accumulated from earlier events
    fn reset(&mut self) {}

    /// Human-readable name for this gate (used in log output)
    fn name(&self) -> &str;
}

/// Ordered chain of gates evaluated with short-circuit semantics
#[derive(Default)]
pub struct GateChain {
    gates: Vec<Box<dyn Gate>>,
}

impl GateChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self { gates: Vec::new() }
    }

    /// Append a gate; gates run in the order they were added
    pub fn add_gate(mut self, gate: Box<dyn Gate>) -> Self {
        self.gates.push(gate);
        self
    }

    /// Run the event through every gate, stopping at the first rejection.
    /// Gates after the rejecting one never see the event.
    pub fn evaluate(&mut self, event: DetectionEvent) -> GateOutcome {
        for gate in self.gates.iter_mut() {
            if let Err(reason) = gate.check(&event) {
                tracing::debug!(
                    gate = gate.name(),
                    code = reason.code(),
                    "detection rejected: {}",
                    reason
                );
                return GateOutcome::Rejected(reason);
            }
        }
        GateOutcome::Accepted(event)
    }

    pub fn reset(&mut self) {
        for gate in self.gates.iter_mut() {
            gate.reset();
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.gates.iter().map(|g| g.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

impl std::fmt::Debug for GateChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateChain")
            .field("gates", &self.names())
            .finish()
    }
}
