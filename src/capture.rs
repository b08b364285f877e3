use std::collections::VecDeque;
use std::path::PathBuf;

use image::{DynamicImage, ImageReader};

use crate::core::{CycleOutcome, Session};
use crate::error::RejectReason;
use crate::recognizer::Recognizer;

/// Source of captured frames, acquired before the first cycle.
///
/// Implementations release their device when dropped, so a loop that bails
/// out early through `?` still gives the device back.
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted
    fn next_frame(&mut self) -> anyhow::Result<Option<DynamicImage>>;
}

/// Frames read from image files on disk, in order
#[derive(Debug)]
pub struct ImageFileSource {
    pending: VecDeque<PathBuf>,
    open: bool,
}

impl ImageFileSource {
    /// Acquire the source. Every path is checked up front so a bad
    /// argument fails before any cycle runs.
    pub fn open(paths: Vec<PathBuf>) -> anyhow::Result<Self> {
        if paths.is_empty() {
            anyhow::bail!("No frames given");
        }
        if let Some(missing) = paths.iter().find(|p| !p.is_file()) {
            anyhow::bail!("Frame not found: {}", missing.display());
        }

        tracing::debug!(frames = paths.len(), "frame source acquired");
        Ok(Self {
            pending: paths.into(),
            open: true,
        })
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Release the source; further reads yield nothing
    pub fn release(&mut self) {
        if self.open {
            self.open = false;
            self.pending.clear();
            tracing::debug!("frame source released");
        }
    }
}

impl FrameSource for ImageFileSource {
    fn next_frame(&mut self) -> anyhow::Result<Option<DynamicImage>> {
        if !self.open {
            return Ok(None);
        }
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };

        tracing::debug!(path = %path.display(), "loading frame");
        let img = ImageReader::open(&path)?
            .decode()
            .map_err(|e| anyhow::anyhow!("Failed to decode frame {}: {}", path.display(), e))?;
        Ok(Some(img))
    }
}

impl Drop for ImageFileSource {
    fn drop(&mut self) {
        self.release();
    }
}

/// Tally of how the cycles of a capture run ended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureReport {
    pub accepted: usize,
    pub low_confidence: usize,
    pub duplicates: usize,
    pub no_detection: usize,
    pub failed: usize,
}

impl CaptureReport {
    pub fn cycles(&self) -> usize {
        self.accepted + self.low_confidence + self.duplicates + self.no_detection + self.failed
    }

    fn tally(&mut self, outcome: &CycleOutcome) {
        match outcome {
            CycleOutcome::Accepted { .. } => self.accepted += 1,
            CycleOutcome::Rejected(RejectReason::LowConfidence { .. }) => self.low_confidence += 1,
            CycleOutcome::Rejected(RejectReason::DuplicateWithinCooldown { .. }) => {
                self.duplicates += 1
            }
            CycleOutcome::Rejected(RejectReason::NoDetectionFound) => self.no_detection += 1,
        }
    }
}

/// Capture loop: one cycle per frame until the source runs dry.
///
/// Recognizer failures are logged and counted; they never end the loop.
/// Failing to read a frame does, since the device is then unusable.
pub async fn drive<S, R>(
    session: &mut Session,
    source: &mut S,
    recognizer: &R,
) -> anyhow::Result<CaptureReport>
where
    S: FrameSource,
    R: Recognizer,
{
    let mut report = CaptureReport::default();

    while let Some(frame) = source.next_frame()? {
        match session.run_cycle(recognizer, &frame).await {
            Ok(outcome) => {
                if let CycleOutcome::Rejected(reason) = &outcome {
                    tracing::info!(code = reason.code(), "cycle rejected: {}", reason);
                }
                report.tally(&outcome);
            }
            Err(e) => {
                tracing::warn!(code = e.code(), "cycle failed: {}", e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
