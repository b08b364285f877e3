use std::time::{Duration, Instant};

/// Latency figures over all recorded recognition calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyReport {
    pub count: usize,
    pub mean: Duration,
    pub p50: Duration,
    pub p95: Duration,
    pub max: Duration,
}

/// Collects how long each recognition call took.
/// Nothing in the gate chain consumes these numbers.
#[derive(Debug, Default, Clone)]
pub struct PerformanceMonitor {
    samples: Vec<Duration>,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, start: Instant, end: Instant) {
        self.samples.push(end.saturating_duration_since(start));
    }

    pub fn samples(&self) -> &[Duration] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn mean(&self) -> Option<Duration> {
        if self.samples.is_empty() {
            return None;
        }
        let total: u128 = self.samples.iter().map(Duration::as_nanos).sum();
        let mean = total / self.samples.len() as u128;
        Some(Duration::from_nanos(u64::try_from(mean).unwrap_or(u64::MAX)))
    }

    /// Nearest-rank percentile, `p` in `[0, 100]`
    pub fn percentile(&self, p: f64) -> Option<Duration> {
        if self.samples.is_empty() {
            return None;
        }
        let mut sorted = self.samples.clone();
        sorted.sort_unstable();

        let n = sorted.len();
        // Multiply before dividing so whole ranks stay exact
        let rank = ((p.clamp(0.0, 100.0) * n as f64) / 100.0).ceil() as usize;
        Some(sorted[rank.clamp(1, n) - 1])
    }

    pub fn report(&self) -> Option<LatencyReport> {
        Some(LatencyReport {
            count: self.samples.len(),
            mean: self.mean()?,
            p50: self.percentile(50.0)?,
            p95: self.percentile(95.0)?,
            max: self.samples.iter().max().copied()?,
        })
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }
}
