use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::MonitorConfig;
use crate::model::Predictor;
use crate::types::Severity;

/// Maps a reading to a severity: model vote plus hard safety-threshold
/// overrides.
///
/// The predictive component may be untrained, stale, or wrong; the
/// configured critical range and warning band are a non-negotiable
/// safety net layered on top of its vote. A predictor fault or an
/// out-of-range vote degrades to threshold-only classification and is
/// never surfaced as an error.
pub struct Classifier<P> {
    low_critical: f64,
    high_critical: f64,
    warn_low: f64,
    warn_high: f64,
    model: P,
    degraded: AtomicBool,
}

impl<P: Predictor> Classifier<P> {
    pub fn new(config: &MonitorConfig, model: P) -> Self {
        Self {
            low_critical: config.low_critical,
            high_critical: config.high_critical,
            warn_low: config.warn_low,
            warn_high: config.warn_high,
            model,
            degraded: AtomicBool::new(false),
        }
    }

    /// Classify one reading.
    ///
    /// Override precedence: readings outside the critical range are
    /// Critical regardless of the vote; inside the warning band the
    /// result is at least Elevated, but a Critical vote is never
    /// downgraded. Outside both regions the vote decides.
    pub fn classify(&self, value: f64) -> Severity {
        let vote = self.vote(value);

        if value < self.low_critical || value > self.high_critical {
            return Severity::Critical;
        }
        if vote == Some(Severity::Critical) {
            return Severity::Critical;
        }
        if value >= self.warn_low && value <= self.warn_high {
            return Severity::Elevated;
        }
        vote.unwrap_or(Severity::Normal)
    }

    /// Whether the predictor has ever faulted. Latches on the first
    /// fault; the status display reads this to show "using safety
    /// thresholds".
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    fn vote(&self, value: f64) -> Option<Severity> {
        match self.model.predict(value) {
            Ok(code) => match Severity::from_vote(code) {
                Some(sev) => Some(sev),
                None => {
                    self.mark_degraded();
                    tracing::warn!(code, value, "model returned out-of-range vote, ignoring");
                    None
                }
            },
            Err(err) => {
                self.mark_degraded();
                tracing::warn!(error = %err, value, "model prediction failed, using thresholds only");
                None
            }
        }
    }

    fn mark_degraded(&self) {
        self.degraded.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    fn clinical<P: Predictor>(model: P) -> Classifier<P> {
        Classifier::new(&MonitorConfig::clinical(), model)
    }

    #[test]
    fn critical_range_overrides_normal_vote() {
        let c = clinical(|_| Ok(0));
        assert_eq!(c.classify(140.0), Severity::Critical);
        assert_eq!(c.classify(50.0), Severity::Critical);
    }

    #[test]
    fn warning_band_overrides_normal_vote() {
        let c = clinical(|_| Ok(0));
        assert_eq!(c.classify(100.0), Severity::Elevated);
    }

    #[test]
    fn critical_vote_is_never_downgraded_by_warning_band() {
        let c = clinical(|_| Ok(2));
        assert_eq!(c.classify(100.0), Severity::Critical);
    }

    #[test]
    fn band_boundaries_are_inclusive() {
        let c = clinical(|_| Ok(0));
        assert_eq!(c.classify(90.0), Severity::Elevated);
        assert_eq!(c.classify(120.0), Severity::Elevated);
        // Critical bounds are exclusive: 60 and 130 are in range.
        assert_eq!(c.classify(60.0), Severity::Normal);
        assert_eq!(c.classify(130.0), Severity::Normal);
    }

    #[test]
    fn vote_decides_outside_bands() {
        let c = clinical(|_| Ok(1));
        assert_eq!(c.classify(75.0), Severity::Elevated);
    }

    #[test]
    fn model_fault_falls_back_to_thresholds() {
        let c = clinical(|_| Err(ModelError::PredictionFailed("broken".into())));
        assert!(!c.is_degraded());
        assert_eq!(c.classify(100.0), Severity::Elevated);
        assert_eq!(c.classify(140.0), Severity::Critical);
        assert_eq!(c.classify(75.0), Severity::Normal);
        assert!(c.is_degraded());
    }

    #[test]
    fn out_of_range_vote_is_ignored_and_latches_degraded() {
        let c = clinical(|_| Ok(7));
        assert_eq!(c.classify(75.0), Severity::Normal);
        assert!(c.is_degraded());
    }
}
