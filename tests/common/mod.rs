#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from notecounter for tests
pub use notecounter::{
    CounterConfig, CycleError, CycleOutcome, CycleState, DetectionEvent, Denomination, Gate,
    GateChain, GateOutcome, Ledger, Prediction, RecognizerError, RejectReason, Session,
};
