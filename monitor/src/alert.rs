use crate::types::{Sample, Severity, Transition};

/// Debouncing alert state machine.
///
/// Holds the last announced severity and emits a [`Transition`] only
/// when a newly classified severity differs from it. Every severity
/// can transition to every other; the only special edge is the first
/// observation out of the unset state. Without this, spoken and
/// audible sinks would fire on every tick while a patient stays
/// critical.
#[derive(Debug, Default)]
pub struct AlertStateMachine {
    last: Option<Severity>,
}

impl AlertStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Severity announced most recently, `None` before the first tick.
    pub fn last_severity(&self) -> Option<Severity> {
        self.last
    }

    /// Feed one classified severity. Returns the transition event if
    /// the held severity changed, `None` for a debounced repeat.
    pub fn observe(&mut self, severity: Severity, sample: Sample, tick: u64) -> Option<Transition> {
        if self.last == Some(severity) {
            return None;
        }
        let transition = Transition {
            from: self.last,
            to: severity,
            sample,
            tick,
        };
        self.last = Some(severity);
        Some(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(machine: &mut AlertStateMachine, severities: &[Severity]) -> Vec<Transition> {
        severities
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| machine.observe(s, Sample::new(i as u64, 0.0), i as u64))
            .collect()
    }

    #[test]
    fn first_observation_always_emits() {
        let mut machine = AlertStateMachine::new();
        let t = machine
            .observe(Severity::Normal, Sample::new(0, 70.0), 0)
            .unwrap();
        assert_eq!(t.from, None);
        assert_eq!(t.to, Severity::Normal);
    }

    #[test]
    fn repeats_are_debounced() {
        let mut machine = AlertStateMachine::new();
        let emitted = feed(
            &mut machine,
            &[
                Severity::Critical,
                Severity::Critical,
                Severity::Critical,
                Severity::Normal,
            ],
        );
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[1].from, Some(Severity::Critical));
        assert_eq!(emitted[1].to, Severity::Normal);
    }

    #[test]
    fn every_severity_pair_transitions() {
        use Severity::*;
        for from in [Normal, Elevated, Critical] {
            for to in [Normal, Elevated, Critical] {
                if from == to {
                    continue;
                }
                let mut machine = AlertStateMachine::new();
                machine.observe(from, Sample::new(0, 0.0), 0);
                let t = machine.observe(to, Sample::new(1, 0.0), 1).unwrap();
                assert_eq!(t.from, Some(from));
                assert_eq!(t.to, to);
            }
        }
    }

    #[test]
    fn held_severity_tracks_last_emission() {
        let mut machine = AlertStateMachine::new();
        assert_eq!(machine.last_severity(), None);
        machine.observe(Severity::Elevated, Sample::new(0, 100.0), 0);
        assert_eq!(machine.last_severity(), Some(Severity::Elevated));
        machine.observe(Severity::Elevated, Sample::new(1, 101.0), 1);
        assert_eq!(machine.last_severity(), Some(Severity::Elevated));
    }
}
