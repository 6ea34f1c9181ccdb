use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Well-known metric names from the clinical-trial dataset.
pub mod metric {
    /// Primary metric: the reading the classifier runs on.
    pub const HEART_RATE: &str = "heart_rate";
    pub const CHOLESTEROL: &str = "cholesterol";
    pub const MAX_HEART_RATE: &str = "max_heart_rate";
    pub const FASTING_BLOOD_SUGAR: &str = "fasting_blood_sugar";
}

/// One reading at one tick. `timestamp_index` is a monotonic tick
/// counter, not wall-clock time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp_index: u64,
    pub value: f64,
    /// Secondary metrics kept for charting. Entries the source lacks
    /// default to 0.0 rather than being absent.
    pub auxiliary: BTreeMap<String, f64>,
}

impl Sample {
    pub fn new(timestamp_index: u64, value: f64) -> Self {
        Self {
            timestamp_index,
            value,
            auxiliary: BTreeMap::new(),
        }
    }

    pub fn with_auxiliary(mut self, name: impl Into<String>, value: f64) -> Self {
        self.auxiliary.insert(name.into(), value);
        self
    }
}

/// Discrete classification of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Normal,
    Elevated,
    Critical,
}

impl Severity {
    /// Map a model vote to a severity. Anything outside 0..=2 is not a
    /// valid vote.
    pub fn from_vote(vote: i64) -> Option<Self> {
        match vote {
            0 => Some(Severity::Normal),
            1 => Some(Severity::Elevated),
            2 => Some(Severity::Critical),
            _ => None,
        }
    }

    pub fn as_vote(self) -> i64 {
        match self {
            Severity::Normal => 0,
            Severity::Elevated => 1,
            Severity::Critical => 2,
        }
    }

    /// Whether a spoken/audible channel should fire for this level.
    pub fn is_alarming(self) -> bool {
        matches!(self, Severity::Elevated | Severity::Critical)
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Normal => "NORMAL",
            Severity::Elevated => "ELEVATED",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Emitted once per held-severity change and fanned out to every sink.
/// `from` is `None` only for the first classification of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Option<Severity>,
    pub to: Severity,
    pub sample: Sample,
    pub tick: u64,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            Some(from) => write!(
                f,
                "tick {}: {} -> {} ({:.0})",
                self.tick, from, self.to, self.sample.value
            ),
            None => write!(f, "tick {}: {} ({:.0})", self.tick, self.to, self.sample.value),
        }
    }
}
