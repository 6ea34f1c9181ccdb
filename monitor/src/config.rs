use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::types::metric;

/// Monitoring session configuration.
///
/// Thresholds are domain constants, not derived: the hard critical
/// range and the warning band come from the deployment, and the two
/// shipped presets carry the values used by the two dashboard
/// variants this replaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Tick cadence in milliseconds.
    pub tick_interval_ms: u64,
    /// Sliding-window capacity per metric.
    pub window_capacity: usize,
    /// Readings strictly below this are forced Critical.
    pub low_critical: f64,
    /// Readings strictly above this are forced Critical.
    pub high_critical: f64,
    /// Warning band lower bound (inclusive).
    pub warn_low: f64,
    /// Warning band upper bound (inclusive).
    pub warn_high: f64,
    /// Name the primary reading is buffered under.
    #[serde(default = "default_primary_metric")]
    pub primary_metric: String,
}

fn default_primary_metric() -> String {
    metric::HEART_RATE.to_string()
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::clinical()
    }
}

impl MonitorConfig {
    /// Clinical preset: tight critical range, mid-range warning band,
    /// 2.5 s cadence.
    pub fn clinical() -> Self {
        Self {
            tick_interval_ms: 2500,
            window_capacity: 50,
            low_critical: 60.0,
            high_critical: 130.0,
            warn_low: 90.0,
            warn_high: 120.0,
            primary_metric: default_primary_metric(),
        }
    }

    /// Bedside preset: wider critical range, high warning band, 4 s
    /// cadence.
    pub fn bedside() -> Self {
        Self {
            tick_interval_ms: 4000,
            window_capacity: 50,
            low_critical: 60.0,
            high_critical: 160.0,
            warn_low: 120.0,
            warn_high: 160.0,
            primary_metric: default_primary_metric(),
        }
    }

    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "clinical" => Ok(Self::clinical()),
            "bedside" => Ok(Self::bedside()),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }

    /// Load and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        for (name, value) in [
            ("low_critical", self.low_critical),
            ("high_critical", self.high_critical),
            ("warn_low", self.warn_low),
            ("warn_high", self.warn_high),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteThreshold { name });
            }
        }
        if self.low_critical >= self.high_critical {
            return Err(ConfigError::InvertedCriticalRange {
                low_critical: self.low_critical,
                high_critical: self.high_critical,
            });
        }
        if self.warn_low > self.warn_high {
            return Err(ConfigError::InvertedWarnBand {
                warn_low: self.warn_low,
                warn_high: self.warn_high,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        MonitorConfig::clinical().validate().unwrap();
        MonitorConfig::bedside().validate().unwrap();
    }

    #[test]
    fn clinical_matches_default() {
        let c = MonitorConfig::default();
        assert_eq!(c.low_critical, 60.0);
        assert_eq!(c.high_critical, 130.0);
        assert_eq!(c.warn_low, 90.0);
        assert_eq!(c.warn_high, 120.0);
        assert_eq!(c.window_capacity, 50);
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert!(MonitorConfig::preset("icu").is_err());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut c = MonitorConfig::clinical();
        c.window_capacity = 0;
        assert!(matches!(c.validate(), Err(ConfigError::ZeroCapacity)));
    }

    #[test]
    fn inverted_warn_band_is_rejected() {
        let mut c = MonitorConfig::clinical();
        c.warn_low = 130.0;
        c.warn_high = 90.0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvertedWarnBand { .. })
        ));
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let mut c = MonitorConfig::clinical();
        c.warn_high = f64::NAN;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NonFiniteThreshold { name: "warn_high" })
        ));
    }
}
