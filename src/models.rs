use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Deserializer, Serialize};

use crate::detection::summary::format_rupiah;

/// Banknote face values the recognizer is trained on.
///
/// Variants are declared in ascending face value, so the derived ordering
/// matches the numeric one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum Denomination {
    Rp1000,
    Rp2000,
    Rp5000,
    Rp10000,
    Rp20000,
    Rp50000,
    Rp100000,
}

impl Denomination {
    pub const ALL: [Denomination; 7] = [
        Denomination::Rp1000,
        Denomination::Rp2000,
        Denomination::Rp5000,
        Denomination::Rp10000,
        Denomination::Rp20000,
        Denomination::Rp50000,
        Denomination::Rp100000,
    ];

    /// Face value in Rupiah
    pub fn value(self) -> u64 {
        match self {
            Denomination::Rp1000 => 1_000,
            Denomination::Rp2000 => 2_000,
            Denomination::Rp5000 => 5_000,
            Denomination::Rp10000 => 10_000,
            Denomination::Rp20000 => 20_000,
            Denomination::Rp50000 => 50_000,
            Denomination::Rp100000 => 100_000,
        }
    }

    /// Map a recognizer class id to a denomination.
    /// Ids outside the trained label table have no denomination.
    pub fn from_class_id(class_id: i64) -> Option<Self> {
        match class_id {
            0 => Some(Denomination::Rp1000),
            1 => Some(Denomination::Rp2000),
            2 => Some(Denomination::Rp5000),
            3 => Some(Denomination::Rp10000),
            4 => Some(Denomination::Rp20000),
            5 => Some(Denomination::Rp50000),
            6 => Some(Denomination::Rp100000),
            _ => None,
        }
    }

    pub fn class_id(self) -> i64 {
        match self {
            Denomination::Rp1000 => 0,
            Denomination::Rp2000 => 1,
            Denomination::Rp5000 => 2,
            Denomination::Rp10000 => 3,
            Denomination::Rp20000 => 4,
            Denomination::Rp50000 => 5,
            Denomination::Rp100000 => 6,
        }
    }
}

impl TryFrom<u64> for Denomination {
    type Error = anyhow::Error;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Denomination::ALL
            .into_iter()
            .find(|d| d.value() == value)
            .ok_or_else(|| anyhow::anyhow!("{} is not a valid denomination", value))
    }
}

impl From<Denomination> for u64 {
    fn from(denomination: Denomination) -> Self {
        denomination.value()
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_rupiah(self.value()))
    }
}

/// A single candidate note produced by one recognition cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionEvent {
    pub denomination: Denomination,
    pub confidence: f32,
    pub timestamp: Instant,
}

impl DetectionEvent {
    pub fn new(denomination: Denomination, confidence: f32, timestamp: Instant) -> Self {
        Self {
            denomination,
            confidence,
            timestamp,
        }
    }

    /// Pick the cycle's candidate note from a recognizer response.
    ///
    /// Predictions whose class id has no denomination are dropped first; the
    /// most confident of the rest wins. Returns `None` when nothing usable
    /// is left.
    pub fn from_predictions(predictions: &[Prediction], observed_at: Instant) -> Option<Self> {
        predictions
            .iter()
            .filter_map(|p| p.denomination().map(|d| (d, p.confidence)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(denomination, confidence)| Self::new(denomination, confidence, observed_at))
    }
}

/// Region of the frame a prediction covers, as `[x1, y1, x2, y2]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Region(pub f32, pub f32, pub f32, pub f32);

impl Region {
    /// Build from `[x1, y1, x2, y2]`; any other length has no usable region
    pub fn from_coords(coords: &[f32]) -> Option<Self> {
        match *coords {
            [x1, y1, x2, y2] => Some(Self(x1, y1, x2, y2)),
            _ => None,
        }
    }

    pub fn width(&self) -> f32 {
        (self.2 - self.0).abs()
    }

    pub fn height(&self) -> f32 {
        (self.3 - self.1).abs()
    }
}

/// One prediction as returned by the recognition service
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Prediction {
    #[serde(rename = "class_")]
    pub class_id: i64,
    pub confidence: f32,
    /// Absent when the service sent no box or one without four coordinates
    #[serde(
        rename = "box",
        default,
        deserialize_with = "region_from_coords",
        skip_serializing_if = "Option::is_none"
    )]
    pub region: Option<Region>,
}

fn region_from_coords<'de, D>(deserializer: D) -> Result<Option<Region>, D::Error>
where
    D: Deserializer<'de>,
{
    let coords = Option::<Vec<f32>>::deserialize(deserializer)?;
    Ok(coords.as_deref().and_then(Region::from_coords))
}

impl Prediction {
    pub fn denomination(&self) -> Option<Denomination> {
        Denomination::from_class_id(self.class_id)
    }
}

/// A detection described by its offset from the start of a replay, used to
/// feed recorded sessions back through the gates without a recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScriptedDetection {
    pub denomination: Denomination,
    pub confidence: f32,
    pub at_ms: u64,
}

impl ScriptedDetection {
    pub fn into_event(self, origin: Instant) -> DetectionEvent {
        DetectionEvent::new(
            self.denomination,
            self.confidence,
            origin + Duration::from_millis(self.at_ms),
        )
    }
}
