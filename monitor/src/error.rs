//! Error taxonomy for the monitoring pipeline.
//!
//! Only the complete absence of input data is fatal; classifier and
//! sink faults degrade locally and never abort the tick loop.

/// Sample source errors.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source produced zero samples. Fatal at startup.
    #[error("dataset contains no samples")]
    EmptyDataset,

    /// Dataset file could not be read.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset row could not be decoded.
    #[error("failed to decode dataset row: {0}")]
    Decode(#[from] csv::Error),
}

/// Predictive model errors. All of these are recovered by falling back
/// to threshold-only classification.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model prediction failed: {0}")]
    PredictionFailed(String),

    #[error("model file could not be loaded: {0}")]
    LoadFailed(String),
}

/// Notification sink errors. Isolated per sink and per invocation.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("sink channel closed")]
    ChannelClosed,

    #[error("sink delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("window capacity must be greater than zero")]
    ZeroCapacity,

    #[error("tick interval must be non-zero")]
    ZeroInterval,

    #[error("warning band is inverted: warn_low {warn_low} > warn_high {warn_high}")]
    InvertedWarnBand { warn_low: f64, warn_high: f64 },

    #[error("critical range is inverted: low_critical {low_critical} >= high_critical {high_critical}")]
    InvertedCriticalRange { low_critical: f64, high_critical: f64 },

    #[error("threshold is not a finite number: {name}")]
    NonFiniteThreshold { name: &'static str },

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Aggregate error for the monitor crate.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl MonitorError {
    /// Whether the tick loop may continue after this error. Source and
    /// configuration problems terminate startup; everything else is
    /// contained within its component.
    pub fn is_recoverable(&self) -> bool {
        match self {
            MonitorError::Source(_) => false,
            MonitorError::Config(_) => false,
            MonitorError::Model(_) => true,
            MonitorError::Sink(_) => true,
        }
    }
}
