//! Scripted scenario runner.
//!
//! Replays a fixed list of readings through the full pipeline without
//! real time or sinks, collecting the emitted transitions into a
//! report. Used by the `simulate` CLI subcommand and by the
//! integration tests.

use crate::driver::MonitorDriver;
use crate::error::MonitorError;
use crate::model::{Predictor, RuleModel};
use crate::sink::TranscriptSink;
use crate::source::ReplaySource;
use crate::types::Transition;
use crate::MonitorConfig;

#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Readings replayed cyclically.
    pub values: Vec<f64>,
    /// Ticks to run; defaults to one pass over the values.
    pub ticks: Option<u64>,
    pub monitor: MonitorConfig,
    /// Pin the model to a fixed vote instead of the rule stand-in.
    pub fixed_vote: Option<i64>,
}

impl ScenarioConfig {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            ticks: None,
            monitor: MonitorConfig::default(),
            fixed_vote: None,
        }
    }
}

#[derive(Debug)]
pub struct ScenarioReport {
    pub ticks: u64,
    pub transitions: Vec<Transition>,
    pub degraded: bool,
}

impl ScenarioReport {
    /// Human-readable report for the CLI.
    pub fn generate_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} ticks, {} transitions\n",
            self.ticks,
            self.transitions.len()
        ));
        for t in &self.transitions {
            out.push_str(&format!("  {t}\n"));
            out.push_str(&format!("    {}\n", TranscriptSink::render(t)));
        }
        if self.degraded {
            out.push_str("model unavailable, classification used safety thresholds\n");
        }
        out
    }
}

pub fn run_scenario(scenario: ScenarioConfig) -> Result<ScenarioReport, MonitorError> {
    let ticks = scenario.ticks.unwrap_or(scenario.values.len() as u64);
    let source = ReplaySource::from_values(scenario.values)?;
    let model: Box<dyn Predictor> = match scenario.fixed_vote {
        Some(vote) => Box::new(move |_: f64| Ok(vote)),
        None => Box::new(RuleModel::default()),
    };
    let mut driver = MonitorDriver::new(scenario.monitor, Box::new(source), model)?;

    let mut transitions = Vec::new();
    for _ in 0..ticks {
        if let Some(t) = driver.step() {
            transitions.push(t);
        }
    }

    Ok(ScenarioReport {
        ticks,
        transitions,
        degraded: driver.is_degraded(),
    })
}
