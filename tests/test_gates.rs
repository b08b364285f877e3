//! Tests for the confidence filter, the debouncer and the gate chain.

mod common;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use notecounter::detection::{ConfidenceFilter, Debouncer, build_standard_gates};

use common::*;

#[test]
fn test_confidence_filter_threshold_is_inclusive() {
    let origin = Instant::now();
    let filter = ConfidenceFilter::new(0.7);

    assert!(filter.accepts(&event_at(origin, Denomination::Rp5000, 0.7, 0)));
    assert!(filter.accepts(&event_at(origin, Denomination::Rp5000, 0.99, 0)));
    assert!(!filter.accepts(&event_at(origin, Denomination::Rp5000, 0.69, 0)));
    assert!(!filter.accepts(&event_at(origin, Denomination::Rp5000, f32::NAN, 0)));
}

#[test]
fn test_confidence_filter_ignores_denomination_and_time() {
    let origin = Instant::now();
    let filter = ConfidenceFilter::default();

    for (i, denomination) in Denomination::ALL.into_iter().enumerate() {
        let at = i as u64 * 10;
        assert!(filter.accepts(&event_at(origin, denomination, 0.8, at)));
        assert!(!filter.accepts(&event_at(origin, denomination, 0.5, at)));
    }
}

#[test]
fn test_confidence_gate_reports_low_confidence() {
    let origin = Instant::now();
    let mut filter = ConfidenceFilter::new(0.7);

    let result = filter.check(&event_at(origin, Denomination::Rp10000, 0.5, 0));
    assert_eq!(
        result,
        Err(RejectReason::LowConfidence {
            confidence: 0.5,
            threshold: 0.7
        })
    );
}

#[test]
fn test_debouncer_accepts_first_event() {
    let origin = Instant::now();
    let mut debouncer = Debouncer::new(Duration::from_millis(2000));

    assert_eq!(debouncer.last_denomination(), None);
    assert!(debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 0)));
    assert_eq!(debouncer.last_denomination(), Some(Denomination::Rp5000));
    assert_eq!(debouncer.last_timestamp(), Some(origin));
}

#[test]
fn test_debouncer_cooldown_boundary() {
    let origin = Instant::now();

    let mut debouncer = Debouncer::new(Duration::from_millis(2000));
    assert!(debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 0)));
    assert!(!debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 1999)));

    let mut debouncer = Debouncer::new(Duration::from_millis(2000));
    assert!(debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 0)));
    assert!(debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 2000)));
}

#[test]
fn test_debouncer_rejection_keeps_original_timestamp() {
    let origin = Instant::now();
    let mut debouncer = Debouncer::new(Duration::from_millis(2000));

    assert!(debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 0)));
    assert!(!debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 1500)));
    // Measured from the accepted event at 0, not the rejected one at 1500
    assert!(debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 2000)));
    assert_eq!(
        debouncer.last_timestamp(),
        Some(origin + Duration::from_millis(2000))
    );
}

#[test]
fn test_debouncer_other_denomination_always_counts() {
    let origin = Instant::now();
    let mut debouncer = Debouncer::new(Duration::from_millis(2000));

    assert!(debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 0)));
    assert!(debouncer.should_count(&event_at(origin, Denomination::Rp10000, 0.9, 1)));
    // Switching back is also a different denomination from the last one
    assert!(debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 2)));
    assert!(!debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 3)));
}

#[test]
fn test_debouncer_reset_unsets_state() {
    let origin = Instant::now();
    let mut debouncer = Debouncer::new(Duration::from_millis(2000));

    assert!(debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 0)));
    debouncer.reset();
    assert_eq!(debouncer.last_denomination(), None);
    assert_eq!(debouncer.last_timestamp(), None);
    assert!(debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 1)));
}

#[test]
fn test_debouncer_gate_reports_duplicate() {
    let origin = Instant::now();
    let mut debouncer = Debouncer::new(Duration::from_millis(2000));

    assert!(debouncer.check(&event_at(origin, Denomination::Rp2000, 0.9, 0)).is_ok());
    let result = debouncer.check(&event_at(origin, Denomination::Rp2000, 0.9, 500));
    assert_eq!(
        result,
        Err(RejectReason::DuplicateWithinCooldown {
            denomination: Denomination::Rp2000,
            elapsed: Duration::from_millis(500),
            cooldown: Duration::from_millis(2000),
        })
    );
}

#[test]
fn test_debouncer_earlier_timestamp_counts_as_no_time() {
    let origin = Instant::now();
    let mut debouncer = Debouncer::new(Duration::from_millis(2000));

    assert!(debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 5000)));
    assert!(!debouncer.should_count(&event_at(origin, Denomination::Rp5000, 0.9, 0)));
}

#[test]
fn test_standard_chain_order() {
    let config = CounterConfig::default();
    let chain = build_standard_gates(&config);
    assert_eq!(chain.names(), vec!["Confidence Filter", "Debouncer"]);
}

#[test]
fn test_low_confidence_does_not_refresh_cooldown() {
    let origin = Instant::now();
    let mut chain = build_standard_gates(&CounterConfig::default());

    assert!(chain.evaluate(event_at(origin, Denomination::Rp5000, 0.9, 0)).is_accepted());
    let outcome = chain.evaluate(event_at(origin, Denomination::Rp5000, 0.5, 1900));
    assert_eq!(outcome, GateOutcome::Rejected(RejectReason::LowConfidence {
        confidence: 0.5,
        threshold: 0.7,
    }));
    // Cooldown still runs from 0, so 2000 is far enough
    assert!(chain.evaluate(event_at(origin, Denomination::Rp5000, 0.9, 2000)).is_accepted());
}

/// Gate that records every event it is asked about
struct Recording(Arc<Mutex<Vec<Denomination>>>);

impl Gate for Recording {
    fn check(&mut self, event: &DetectionEvent) -> Result<(), RejectReason> {
        self.0.lock().unwrap().push(event.denomination);
        Ok(())
    }

    fn name(&self) -> &str {
        "Recording"
    }
}

#[test]
fn test_chain_short_circuits() {
    let origin = Instant::now();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut chain = GateChain::new()
        .add_gate(Box::new(ConfidenceFilter::new(0.7)))
        .add_gate(Box::new(Recording(seen.clone())));

    chain.evaluate(event_at(origin, Denomination::Rp1000, 0.2, 0));
    chain.evaluate(event_at(origin, Denomination::Rp2000, 0.9, 10));

    assert_eq!(*seen.lock().unwrap(), vec![Denomination::Rp2000]);
    assert_eq!(chain.len(), 2);
}

#[test]
fn test_chain_reset_clears_debouncer() {
    let origin = Instant::now();
    let mut chain = build_standard_gates(&CounterConfig::default());

    assert!(chain.evaluate(event_at(origin, Denomination::Rp5000, 0.9, 0)).is_accepted());
    assert!(!chain.evaluate(event_at(origin, Denomination::Rp5000, 0.9, 10)).is_accepted());
    chain.reset();
    assert!(chain.evaluate(event_at(origin, Denomination::Rp5000, 0.9, 20)).is_accepted());
}
