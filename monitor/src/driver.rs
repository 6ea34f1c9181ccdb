//! Fixed-cadence tick loop driving the sampling-to-alert pipeline.
//!
//! Each tick: pull the next sample, push it into the window buffer,
//! classify it, feed the alert state machine, and on a transition fan
//! the event out to every registered sink on fire-and-forget tasks.
//! The tick sequence itself is single-threaded and order-sensitive;
//! only sink delivery is concurrent.

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::alert::AlertStateMachine;
use crate::classifier::Classifier;
use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::model::Predictor;
use crate::sink::NotificationSink;
use crate::source::SampleSource;
use crate::types::{Severity, Transition};
use crate::window::WindowBuffer;

/// Handle to one registered sink: an ordered delivery queue drained by
/// a dedicated worker task, so each sink observes transitions in
/// emission order while delivery stays off the tick loop.
struct SinkHandle {
    name: &'static str,
    queue: mpsc::UnboundedSender<Transition>,
}

pub struct MonitorDriver {
    config: MonitorConfig,
    source: Box<dyn SampleSource>,
    buffer: Arc<WindowBuffer>,
    classifier: Classifier<Box<dyn Predictor>>,
    state: AlertStateMachine,
    sinks: Vec<SinkHandle>,
    tick: u64,
}

impl MonitorDriver {
    /// Build a driver. Config validation and the source's emptiness
    /// check have already run by the time this returns, so the tick
    /// loop itself cannot fail.
    pub fn new(
        config: MonitorConfig,
        source: Box<dyn SampleSource>,
        model: Box<dyn Predictor>,
    ) -> Result<Self, MonitorError> {
        config.validate()?;
        let buffer = Arc::new(WindowBuffer::new(config.window_capacity));
        let classifier = Classifier::new(&config, model);
        Ok(Self {
            config,
            source,
            buffer,
            classifier,
            state: AlertStateMachine::new(),
            sinks: Vec::new(),
            tick: 0,
        })
    }

    /// Register a sink and start its worker task. Each sink drains its
    /// own queue sequentially, so it observes transitions in emission
    /// order; workers stop when the driver is dropped. Must be called
    /// from within a tokio runtime.
    pub fn add_sink(&mut self, sink: Arc<dyn NotificationSink>) -> &mut Self {
        let (queue, mut deliveries) = mpsc::unbounded_channel::<Transition>();
        let name = sink.name();
        tokio::spawn(async move {
            while let Some(transition) = deliveries.recv().await {
                if let Err(err) = sink.notify(&transition).await {
                    tracing::warn!(
                        sink = sink.name(),
                        error = %err,
                        "sink delivery failed"
                    );
                }
            }
        });
        self.sinks.push(SinkHandle { name, queue });
        self
    }

    /// Shared handle to the window buffer for charting consumers.
    pub fn buffer(&self) -> Arc<WindowBuffer> {
        Arc::clone(&self.buffer)
    }

    pub fn last_severity(&self) -> Option<Severity> {
        self.state.last_severity()
    }

    /// Whether the predictive model has faulted and classification is
    /// running on safety thresholds alone.
    pub fn is_degraded(&self) -> bool {
        self.classifier.is_degraded()
    }

    pub fn ticks_run(&self) -> u64 {
        self.tick
    }

    /// One pipeline pass without sink dispatch: sample, buffer,
    /// classify, evaluate. Deterministic and synchronous; the scenario
    /// harness and tests drive this directly.
    pub fn step(&mut self) -> Option<Transition> {
        let sample = self.source.next_sample();

        self.buffer.push(&self.config.primary_metric, sample.value);
        for (name, value) in &sample.auxiliary {
            self.buffer.push(name, *value);
        }

        let severity = self.classifier.classify(sample.value);
        let tick = self.tick;
        self.tick += 1;

        let transition = self.state.observe(severity, sample, tick);
        if let Some(ref t) = transition {
            tracing::info!(%t, "status change");
        } else {
            tracing::trace!(tick, %severity, "debounced repeat");
        }
        transition
    }

    /// One full tick: pipeline pass plus sink fan-out.
    pub async fn tick_once(&mut self) -> Option<Transition> {
        let transition = self.step();
        if let Some(ref t) = transition {
            self.dispatch(t);
        }
        transition
    }

    /// Fan a transition out: one non-blocking enqueue per sink, in
    /// registration order. Queues preserve emission order per sink;
    /// completion order across sinks is not guaranteed. A sink fault
    /// is logged by its worker and isolated.
    fn dispatch(&self, transition: &Transition) {
        for sink in &self.sinks {
            if sink.queue.send(transition.clone()).is_err() {
                tracing::warn!(sink = sink.name, "sink worker gone, dropping transition");
            }
        }
    }

    /// Run the tick loop until the shutdown channel signals or closes.
    /// The stop signal is checked at each tick boundary, so a pending
    /// sleep never blocks teardown. In-flight sink tasks are not
    /// awaited; the process may exit with deliveries still finishing.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!(
            interval_ms = self.config.tick_interval_ms,
            period = self.source.period(),
            "monitor started"
        );
        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.tick_once().await;
                }
            }
        }
        tracing::info!(ticks = self.tick, "monitor stopped");
    }
}
