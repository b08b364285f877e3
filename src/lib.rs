pub mod capture;
pub mod config;
pub mod core;
pub mod detection;
pub mod error;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod recognizer;

pub use config::CounterConfig;
pub use crate::core::{CycleOutcome, CycleState, Ledger, LedgerEntry, LedgerSnapshot, Session};
pub use error::{CycleError, RecognizerError, RejectReason};
pub use models::{DetectionEvent, Denomination, Prediction, Region, ScriptedDetection};
pub use pipeline::{Gate, GateChain, GateOutcome};
pub use recognizer::{HttpRecognizer, Recognizer};
