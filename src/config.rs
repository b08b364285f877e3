use std::time::Duration;

use crate::detection::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_COOLDOWN};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/detect";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_UPLOAD_NAME: &str = "frame.jpg";

/// Settings for a counting session
#[derive(Debug, Clone, PartialEq)]
pub struct CounterConfig {
    /// Minimum recognizer confidence for a detection to count
    pub confidence_threshold: f32,
    /// How long the same denomination is ignored after being counted
    pub cooldown: Duration,
    /// URL of the recognizer's detect endpoint
    pub endpoint: String,
    pub request_timeout: Duration,
    /// Frames larger than this are downscaled before upload
    pub frame_width: u32,
    pub frame_height: u32,
    pub jpeg_quality: u8,
    /// File name sent with each multipart upload
    pub upload_name: String,
}

impl CounterConfig {
    pub fn new() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            cooldown: DEFAULT_COOLDOWN,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            frame_width: 640,
            frame_height: 480,
            jpeg_quality: 92,
            upload_name: DEFAULT_UPLOAD_NAME.to_string(),
        }
    }

    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_width = width;
        self.frame_height = height;
        self
    }

    pub fn with_upload_name(mut self, name: impl Into<String>) -> Self {
        self.upload_name = name.into();
        self
    }

    /// Reject settings no session could run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            anyhow::bail!(
                "Confidence threshold must be within [0, 1], got {}",
                self.confidence_threshold
            );
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            anyhow::bail!("JPEG quality must be within 1..=100, got {}", self.jpeg_quality);
        }
        if self.frame_width == 0 || self.frame_height == 0 {
            anyhow::bail!(
                "Frame size must be non-zero, got {}x{}",
                self.frame_width,
                self.frame_height
            );
        }
        if self.endpoint.trim().is_empty() {
            anyhow::bail!("Recognizer endpoint must not be empty");
        }
        Ok(())
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::new()
    }
}
