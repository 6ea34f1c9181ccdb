//! pulsemon: a vital-sign sampling-to-alert kernel.
//!
//! Replays historical clinical-trial rows as a live feed, classifies
//! each reading against an injected predictive model plus hard safety
//! thresholds, debounces repeated statuses, and fans status changes
//! out to independent notification sinks.

pub mod alert;
pub mod classifier;
pub mod config;
pub mod driver;
pub mod error;
pub mod harness;
pub mod model;
pub mod sink;
pub mod source;
pub mod types;
pub mod window;

pub use alert::AlertStateMachine;
pub use classifier::Classifier;
pub use config::MonitorConfig;
pub use driver::MonitorDriver;
pub use error::{ConfigError, ModelError, MonitorError, SinkError, SourceError};
pub use model::{Predictor, RuleModel};
pub use sink::{NotificationSink, SpeechSink, StatusSink, Tone, ToneSink, TranscriptSink};
pub use source::{ReplaySource, SampleRecord, SampleSource};
pub use types::{Sample, Severity, Transition};
pub use window::WindowBuffer;
