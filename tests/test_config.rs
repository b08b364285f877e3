//! Tests for session configuration defaults and validation.

mod common;

use std::time::Duration;

use notecounter::config::{DEFAULT_ENDPOINT, DEFAULT_UPLOAD_NAME};

use common::*;

#[test]
fn test_defaults() {
    let config = CounterConfig::default();

    assert!((config.confidence_threshold - 0.7).abs() < f32::EPSILON);
    assert_eq!(config.cooldown, Duration::from_millis(2000));
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.upload_name, DEFAULT_UPLOAD_NAME);
    assert_eq!((config.frame_width, config.frame_height), (640, 480));
    assert_eq!(config.jpeg_quality, 92);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builders_override_defaults() -> anyhow::Result<()> {
    let config = CounterConfig::new()
        .with_confidence_threshold(0.5)
        .with_cooldown(Duration::from_millis(500))
        .with_endpoint("http://10.0.0.2:9000/detect")
        .with_request_timeout(Duration::from_secs(3))
        .with_frame_size(320, 240)
        .with_upload_name("20k_frame.jpg");

    config.validate()?;
    assert_eq!(config.cooldown, Duration::from_millis(500));
    assert_eq!(config.endpoint, "http://10.0.0.2:9000/detect");
    assert_eq!(config.request_timeout, Duration::from_secs(3));
    assert_eq!((config.frame_width, config.frame_height), (320, 240));
    Ok(())
}

#[test]
fn test_threshold_bounds_are_inclusive() {
    assert!(CounterConfig::new().with_confidence_threshold(0.0).validate().is_ok());
    assert!(CounterConfig::new().with_confidence_threshold(1.0).validate().is_ok());
}

#[test]
fn test_rejects_out_of_range_threshold() {
    for threshold in [-0.1, 1.5, f32::NAN] {
        let result = CounterConfig::new().with_confidence_threshold(threshold).validate();
        let error_msg = result.unwrap_err().to_string();
        assert!(
            error_msg.contains("Confidence threshold"),
            "Unexpected error for {}: {}",
            threshold,
            error_msg
        );
    }
}

#[test]
fn test_rejects_bad_jpeg_quality() {
    let mut config = CounterConfig::new();
    config.jpeg_quality = 0;
    assert!(config.validate().is_err());

    config.jpeg_quality = 101;
    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_zero_frame_size() {
    let result = CounterConfig::new().with_frame_size(0, 480).validate();
    assert!(result.unwrap_err().to_string().contains("Frame size"));
}

#[test]
fn test_rejects_blank_endpoint() {
    let result = CounterConfig::new().with_endpoint("   ").validate();
    assert!(result.unwrap_err().to_string().contains("endpoint"));
}
