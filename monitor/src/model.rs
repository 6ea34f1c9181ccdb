//! Predictive model capability.
//!
//! The classifier consumes any predictor behind the same call
//! contract: a trained model, a rule-based stand-in, or a closure.
//! Votes are 0 (normal), 1 (elevated), 2 (critical); anything else is
//! treated as no vote by the caller.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ModelError;

/// Function-shaped prediction capability. Must be pure and
/// side-effect-free from the pipeline's perspective.
pub trait Predictor: Send + Sync {
    fn predict(&self, value: f64) -> Result<i64, ModelError>;
}

impl<F> Predictor for F
where
    F: Fn(f64) -> Result<i64, ModelError> + Send + Sync,
{
    fn predict(&self, value: f64) -> Result<i64, ModelError> {
        self(value)
    }
}

impl Predictor for Box<dyn Predictor> {
    fn predict(&self, value: f64) -> Result<i64, ModelError> {
        self.as_ref().predict(value)
    }
}

/// Rule-based safety stand-in used when no trained model is available.
/// Votes critical outside its extreme range and elevated inside its
/// warning band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleModel {
    pub critical_below: f64,
    pub critical_above: f64,
    pub elevated_low: f64,
    pub elevated_high: f64,
}

impl Default for RuleModel {
    fn default() -> Self {
        Self {
            critical_below: 60.0,
            critical_above: 130.0,
            elevated_low: 90.0,
            elevated_high: 120.0,
        }
    }
}

impl Predictor for RuleModel {
    fn predict(&self, value: f64) -> Result<i64, ModelError> {
        if !value.is_finite() {
            return Err(ModelError::PredictionFailed(format!(
                "non-finite reading: {value}"
            )));
        }
        if value < self.critical_below || value > self.critical_above {
            Ok(2)
        } else if value >= self.elevated_low && value <= self.elevated_high {
            Ok(1)
        } else {
            Ok(0)
        }
    }
}

/// Load a serialized rule model from a JSON file.
///
/// Deployment flow: try the exported model file, fall back to the
/// built-in stand-in if it is missing or malformed.
/// Use [`load_or_default`] for the fallback behavior.
pub fn load(path: impl AsRef<Path>) -> Result<RuleModel, ModelError> {
    let raw = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ModelError::LoadFailed(e.to_string()))?;
    let model: RuleModel =
        serde_json::from_str(&raw).map_err(|e| ModelError::LoadFailed(e.to_string()))?;
    Ok(model)
}

/// Load a model file, falling back to [`RuleModel::default`] when
/// loading fails. Returns whether the loaded model is the fallback.
pub fn load_or_default(path: impl AsRef<Path>) -> (RuleModel, bool) {
    match load(path.as_ref()) {
        Ok(model) => (model, false),
        Err(err) => {
            tracing::warn!(
                path = %path.as_ref().display(),
                error = %err,
                "model load failed, using rule-based stand-in"
            );
            (RuleModel::default(), true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_model_votes() {
        let m = RuleModel::default();
        assert_eq!(m.predict(45.0).unwrap(), 2);
        assert_eq!(m.predict(140.0).unwrap(), 2);
        assert_eq!(m.predict(100.0).unwrap(), 1);
        assert_eq!(m.predict(70.0).unwrap(), 0);
    }

    #[test]
    fn rule_model_band_edges_are_inclusive() {
        let m = RuleModel::default();
        assert_eq!(m.predict(90.0).unwrap(), 1);
        assert_eq!(m.predict(120.0).unwrap(), 1);
    }

    #[test]
    fn rule_model_rejects_nan() {
        let m = RuleModel::default();
        assert!(m.predict(f64::NAN).is_err());
    }

    #[test]
    fn closure_satisfies_predictor() {
        let model = |_: f64| Ok(0);
        assert_eq!(Predictor::predict(&model, 80.0).unwrap(), 0);
    }

    #[test]
    fn load_missing_file_falls_back() {
        let (model, degraded) = load_or_default("/nonexistent/model.json");
        assert!(degraded);
        assert_eq!(model.critical_above, 130.0);
    }
}
