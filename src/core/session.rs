use std::time::Instant;

use image::DynamicImage;
use uuid::Uuid;

use crate::config::CounterConfig;
use crate::core::ledger::Ledger;
use crate::detection::{self, DetectionTracker, PerformanceMonitor, preprocessing, summarize};
use crate::error::{CycleError, RecognizerError, RejectReason};
use crate::models::{DetectionEvent, Prediction};
use crate::pipeline::{GateChain, GateOutcome};
use crate::recognizer::Recognizer;

/// Whether a detection cycle is currently running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    InFlight,
}

/// How a completed cycle ended
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Accepted {
        event: DetectionEvent,
        summary: String,
    },
    Rejected(RejectReason),
}

impl CycleOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CycleOutcome::Accepted { .. })
    }
}

/// A counting session.
///
/// Owns the gates, the ledger, the history and the latency samples. Only
/// an accepted event reaches the tracker and the ledger, so the ledger never
/// holds a partially applied cycle.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    config: CounterConfig,
    gates: GateChain,
    tracker: DetectionTracker,
    ledger: Ledger,
    monitor: PerformanceMonitor,
    state: CycleState,
}

impl Session {
    /// Create a session with the standard confidence + debounce gates
    pub fn new(config: CounterConfig) -> Self {
        let gates = detection::build_standard_gates(&config);
        Self::with_gates(config, gates)
    }

    /// Create a session with a custom gate chain
    pub fn with_gates(config: CounterConfig, gates: GateChain) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, gates = ?gates.names(), "session created");
        Self {
            id,
            config,
            gates,
            tracker: DetectionTracker::new(),
            ledger: Ledger::new(),
            monitor: PerformanceMonitor::new(),
            state: CycleState::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn tracker(&self) -> &DetectionTracker {
        &self.tracker
    }

    pub fn performance(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    /// Mark a cycle as started. Fails if one is already in flight.
    pub fn begin_cycle(&mut self) -> Result<(), CycleError> {
        if self.state == CycleState::InFlight {
            return Err(CycleError::CycleInFlight);
        }
        self.state = CycleState::InFlight;
        Ok(())
    }

    /// Finish the in-flight cycle with the recognizer's answer.
    /// The session is back to `Idle` whatever the result.
    pub fn complete_cycle(
        &mut self,
        recognition: Result<Vec<Prediction>, RecognizerError>,
        observed_at: Instant,
    ) -> Result<CycleOutcome, CycleError> {
        self.state = CycleState::Idle;

        let predictions = recognition.map_err(|e| {
            tracing::warn!(session = %self.id, "recognition failed: {}", e);
            CycleError::RecognitionUnavailable(e)
        })?;

        match DetectionEvent::from_predictions(&predictions, observed_at) {
            Some(event) => Ok(self.process(event)),
            None => {
                tracing::debug!(
                    session = %self.id,
                    predictions = predictions.len(),
                    "no usable prediction in frame"
                );
                Ok(CycleOutcome::Rejected(RejectReason::NoDetectionFound))
            }
        }
    }

    /// Run an event through the gates and, if it passes, count it
    pub fn process(&mut self, event: DetectionEvent) -> CycleOutcome {
        match self.gates.evaluate(event) {
            GateOutcome::Accepted(event) => {
                self.tracker.record(&event);
                let entry = self.ledger.apply(&event);
                let summary = summarize(&event);
                tracing::info!(
                    session = %self.id,
                    count = entry.count(),
                    total = self.ledger.total(),
                    "{}",
                    summary
                );
                CycleOutcome::Accepted { event, summary }
            }
            GateOutcome::Rejected(reason) => CycleOutcome::Rejected(reason),
        }
    }

    /// Run one full cycle on a captured frame: encode it, ask the recognizer,
    /// then gate and count the result.
    ///
    /// Dropping the returned future mid-recognition abandons the cycle and
    /// leaves the session `Idle` with nothing counted.
    pub async fn run_cycle<R: Recognizer>(
        &mut self,
        recognizer: &R,
        frame: &DynamicImage,
    ) -> Result<CycleOutcome, CycleError> {
        self.begin_cycle()?;
        let mut cycle = InFlightGuard { session: self };

        let recognition = match preprocessing::prepare_frame(
            frame,
            cycle.session.config.frame_width,
            cycle.session.config.frame_height,
            cycle.session.config.jpeg_quality,
        ) {
            Ok(encoded) => {
                let start = Instant::now();
                let result = recognizer.recognize(encoded).await;
                cycle.session.monitor.record(start, Instant::now());
                result
            }
            Err(e) => Err(RecognizerError::Encoding(e.to_string())),
        };

        cycle.session.complete_cycle(recognition, Instant::now())
    }

    /// Clear the ledger, debounce state, history and latency samples
    pub fn reset(&mut self) {
        self.ledger.reset();
        self.gates.reset();
        self.tracker.reset();
        self.monitor.reset();
        self.state = CycleState::Idle;
        tracing::info!(session = %self.id, "session reset");
    }
}

/// Puts the session back to `Idle` if a cycle is abandoned before
/// `complete_cycle` runs
struct InFlightGuard<'a> {
    session: &'a mut Session,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.session.state == CycleState::InFlight {
            self.session.state = CycleState::Idle;
            tracing::warn!(session = %self.session.id, "cycle abandoned before completion");
        }
    }
}
