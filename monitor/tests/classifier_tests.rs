use pulsemon::error::ModelError;
use pulsemon::{Classifier, MonitorConfig, RuleModel, Severity};

#[test]
fn override_precedence_beats_normal_vote() {
    // low_critical=60, high_critical=130, model always votes normal.
    let c = Classifier::new(&MonitorConfig::clinical(), |_: f64| Ok(0));
    assert_eq!(c.classify(140.0), Severity::Critical);
    assert_eq!(c.classify(59.9), Severity::Critical);
}

#[test]
fn warning_band_never_downgrades_critical_vote() {
    let c = Classifier::new(&MonitorConfig::clinical(), |_: f64| Ok(2));
    // 100 is inside [90, 120] but the vote says critical.
    assert_eq!(c.classify(100.0), Severity::Critical);
}

#[test]
fn elevated_vote_survives_outside_band() {
    let c = Classifier::new(&MonitorConfig::clinical(), |_: f64| Ok(1));
    assert_eq!(c.classify(75.0), Severity::Elevated);
}

#[test]
fn rule_model_and_thresholds_agree_on_clinical_preset() {
    let c = Classifier::new(&MonitorConfig::clinical(), RuleModel::default());
    assert_eq!(c.classify(70.0), Severity::Normal);
    assert_eq!(c.classify(100.0), Severity::Elevated);
    assert_eq!(c.classify(140.0), Severity::Critical);
    assert_eq!(c.classify(45.0), Severity::Critical);
}

#[test]
fn bedside_preset_widens_the_critical_range() {
    // The rule model still votes critical above 130, so a 140 reading
    // is critical by vote even though the bedside hard range reaches
    // to 160.
    let c = Classifier::new(&MonitorConfig::bedside(), RuleModel::default());
    assert_eq!(c.classify(140.0), Severity::Critical);
    assert_eq!(c.classify(170.0), Severity::Critical);
    assert_eq!(c.classify(70.0), Severity::Normal);
    // Inside the bedside warning band with a normal-ish reading for
    // the rule model's band: the hard band forces elevated.
    let pinned = Classifier::new(&MonitorConfig::bedside(), |_: f64| Ok(0));
    assert_eq!(pinned.classify(125.0), Severity::Elevated);
}

#[test]
fn failed_model_degrades_to_threshold_only() {
    let c = Classifier::new(&MonitorConfig::clinical(), |_: f64| {
        Err(ModelError::PredictionFailed("no model".into()))
    });
    assert_eq!(c.classify(70.0), Severity::Normal);
    assert_eq!(c.classify(100.0), Severity::Elevated);
    assert_eq!(c.classify(140.0), Severity::Critical);
    assert!(c.is_degraded());
}

#[test]
fn degraded_flag_stays_clear_for_healthy_model() {
    let c = Classifier::new(&MonitorConfig::clinical(), RuleModel::default());
    for v in [50.0, 70.0, 100.0, 140.0] {
        c.classify(v);
    }
    assert!(!c.is_degraded());
}
