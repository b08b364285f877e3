use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use image::{DynamicImage, ImageBuffer, Rgb};
use notecounter::capture::FrameSource;
use notecounter::{DetectionEvent, Denomination, Prediction, RecognizerError, Recognizer, Region};
use tempfile::NamedTempFile;

/// Event `at_ms` milliseconds after `origin`
pub fn event_at(origin: Instant, denomination: Denomination, confidence: f32, at_ms: u64) -> DetectionEvent {
    DetectionEvent::new(denomination, confidence, origin + Duration::from_millis(at_ms))
}

/// A recognizer prediction for the given class id
pub fn prediction(class_id: i64, confidence: f32) -> Prediction {
    Prediction {
        class_id,
        confidence,
        region: Some(Region(10.0, 10.0, 200.0, 100.0)),
    }
}

/// Creates a solid-color test frame of the given size.
pub fn create_test_frame(width: u32, height: u32) -> DynamicImage {
    let img = ImageBuffer::from_fn(width, height, |_, _| Rgb([0u8, 128u8, 64u8]));
    DynamicImage::ImageRgb8(img)
}

/// Creates a 100x100 PNG frame on disk.
/// The file will be automatically cleaned up when dropped.
pub fn create_test_frame_file() -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp frame file");
    create_test_frame(100, 100)
        .save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test frame");
    file
}

/// Recognizer answering from a fixed script, one response per call.
/// Records the frames it was sent.
pub struct ScriptedRecognizer {
    responses: RefCell<VecDeque<Result<Vec<Prediction>, RecognizerError>>>,
    received: RefCell<Vec<Vec<u8>>>,
}

impl ScriptedRecognizer {
    pub fn new(responses: Vec<Result<Vec<Prediction>, RecognizerError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            received: RefCell::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.borrow().clone()
    }
}

impl Recognizer for ScriptedRecognizer {
    async fn recognize(&self, frame: Vec<u8>) -> Result<Vec<Prediction>, RecognizerError> {
        self.received.borrow_mut().push(frame);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// In-memory frame source
pub struct VecFrameSource {
    frames: VecDeque<DynamicImage>,
}

impl VecFrameSource {
    pub fn new(count: usize) -> Self {
        Self {
            frames: (0..count).map(|_| create_test_frame(100, 100)).collect(),
        }
    }
}

impl FrameSource for VecFrameSource {
    fn next_frame(&mut self) -> anyhow::Result<Option<DynamicImage>> {
        Ok(self.frames.pop_front())
    }
}

/// Recognizer whose response never arrives
pub struct StalledRecognizer;

impl Recognizer for StalledRecognizer {
    async fn recognize(&self, _frame: Vec<u8>) -> Result<Vec<Prediction>, RecognizerError> {
        std::future::pending().await
    }
}
