//! Notification sinks: independent consumers of transition events.
//!
//! Each sink performs one side effect (status line, log pane, spoken
//! announcement, audible tone). Sinks are invoked on fire-and-forget
//! tasks and must contain their own faults; a failing sink never
//! blocks the tick loop or its peers.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;

use crate::error::SinkError;
use crate::types::{Severity, Transition};

#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Channel name used in dispatch logs.
    fn name(&self) -> &'static str;

    /// Deliver one transition. Must not panic across this boundary;
    /// internal faults are returned as [`SinkError`] and logged by the
    /// dispatcher.
    async fn notify(&self, transition: &Transition) -> Result<(), SinkError>;
}

/// Visual channel: holds the latest status line for a label widget to
/// render.
#[derive(Debug, Default)]
pub struct StatusSink {
    line: RwLock<String>,
}

impl StatusSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> String {
        self.line.read().clone()
    }
}

#[async_trait]
impl NotificationSink for StatusSink {
    fn name(&self) -> &'static str {
        "status"
    }

    async fn notify(&self, transition: &Transition) -> Result<(), SinkError> {
        let value = transition.sample.value;
        let line = match transition.to {
            Severity::Critical => format!("CRITICAL ALERT: {value:.0} BPM"),
            Severity::Elevated => format!("High heart rate: {value:.0} BPM"),
            Severity::Normal => format!("Normal heart rate: {value:.0} BPM"),
        };
        *self.line.write() = line;
        Ok(())
    }
}

/// Log-pane channel: an append-only in-memory transcript, read by the
/// UI as a copy.
#[derive(Debug, Default)]
pub struct TranscriptSink {
    entries: Mutex<Vec<String>>,
}

impl TranscriptSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn render(transition: &Transition) -> String {
        let value = transition.sample.value;
        match transition.to {
            Severity::Critical => {
                format!("[CRITICAL] Heart rate {value:.0} BPM, emergency response initiated")
            }
            Severity::Elevated => format!("[WARNING] High heart rate detected: {value:.0} BPM"),
            Severity::Normal => format!("[INFO] Heart rate stable at {value:.0} BPM"),
        }
    }
}

#[async_trait]
impl NotificationSink for TranscriptSink {
    fn name(&self) -> &'static str {
        "transcript"
    }

    async fn notify(&self, transition: &Transition) -> Result<(), SinkError> {
        self.entries.lock().push(Self::render(transition));
        Ok(())
    }
}

/// Spoken channel: renders announcement phrases into a channel drained
/// by an external text-to-speech worker.
#[derive(Debug, Clone)]
pub struct SpeechSink {
    phrases: mpsc::Sender<String>,
}

impl SpeechSink {
    pub fn new(phrases: mpsc::Sender<String>) -> Self {
        Self { phrases }
    }

    pub fn phrase(transition: &Transition) -> String {
        let value = transition.sample.value;
        match transition.to {
            Severity::Critical => {
                "Emergency! Heart rate critical. Calling for help now.".to_string()
            }
            Severity::Elevated => {
                format!("Warning! Heart rate {value:.0}. Please relax and sit down.")
            }
            Severity::Normal => {
                format!("Heart rate normal at {value:.0} beats per minute.")
            }
        }
    }
}

#[async_trait]
impl NotificationSink for SpeechSink {
    fn name(&self) -> &'static str {
        "speech"
    }

    async fn notify(&self, transition: &Transition) -> Result<(), SinkError> {
        self.phrases
            .send(Self::phrase(transition))
            .await
            .map_err(|_| SinkError::ChannelClosed)
    }
}

/// One audible tone request: frequency in hertz, duration in
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

/// Audible channel: emits tone requests for elevated and critical
/// transitions; returning to normal is silent.
#[derive(Debug, Clone)]
pub struct ToneSink {
    tones: mpsc::Sender<Tone>,
}

impl ToneSink {
    pub fn new(tones: mpsc::Sender<Tone>) -> Self {
        Self { tones }
    }

    pub fn tone_for(severity: Severity) -> Option<Tone> {
        match severity {
            Severity::Critical => Some(Tone {
                frequency_hz: 1000,
                duration_ms: 800,
            }),
            Severity::Elevated => Some(Tone {
                frequency_hz: 700,
                duration_ms: 400,
            }),
            Severity::Normal => None,
        }
    }
}

#[async_trait]
impl NotificationSink for ToneSink {
    fn name(&self) -> &'static str {
        "tone"
    }

    async fn notify(&self, transition: &Transition) -> Result<(), SinkError> {
        match Self::tone_for(transition.to) {
            Some(tone) => self
                .tones
                .send(tone)
                .await
                .map_err(|_| SinkError::ChannelClosed),
            None => Ok(()),
        }
    }
}
