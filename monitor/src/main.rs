use clap::{value_parser, Arg, Command};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

use pulsemon::harness::{run_scenario, ScenarioConfig};
use pulsemon::model::{self, Predictor, RuleModel};
use pulsemon::{
    MonitorConfig, MonitorDriver, ReplaySource, SpeechSink, StatusSink, ToneSink, TranscriptSink,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Command::new("pulsemon")
        .version("0.1.0")
        .about("Vital-sign replay monitor")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("replay")
                .about("Replay a clinical-trial CSV as a live feed")
                .arg(
                    Arg::new("data")
                        .long("data")
                        .required(true)
                        .help("Path to the dataset CSV"),
                )
                .arg(
                    Arg::new("preset")
                        .long("preset")
                        .default_value("clinical")
                        .help("Threshold preset: clinical or bedside"),
                )
                .arg(
                    Arg::new("interval-ms")
                        .long("interval-ms")
                        .value_parser(value_parser!(u64))
                        .help("Override the tick interval"),
                )
                .arg(
                    Arg::new("ticks")
                        .long("ticks")
                        .value_parser(value_parser!(u64))
                        .help("Stop after N ticks instead of running until ctrl-c"),
                )
                .arg(
                    Arg::new("model")
                        .long("model")
                        .help("Path to an exported model file (falls back to the rule stand-in)"),
                ),
        )
        .subcommand(
            Command::new("simulate")
                .about("Run a scripted scenario and print the transition report")
                .arg(
                    Arg::new("values")
                        .long("values")
                        .required(true)
                        .help("Comma-separated readings, e.g. 70,100,140,140,95"),
                )
                .arg(
                    Arg::new("preset")
                        .long("preset")
                        .default_value("clinical")
                        .help("Threshold preset: clinical or bedside"),
                )
                .arg(
                    Arg::new("vote")
                        .long("vote")
                        .value_parser(value_parser!(i64))
                        .help("Pin the model to a fixed vote (0, 1, or 2)"),
                )
                .arg(
                    Arg::new("ticks")
                        .long("ticks")
                        .value_parser(value_parser!(u64))
                        .help("Ticks to run; defaults to one pass over the values"),
                ),
        )
        .subcommand(
            Command::new("check-config")
                .about("Validate a JSON config file")
                .arg(Arg::new("path").long("path").required(true)),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("replay", args)) => {
            let data = args.get_one::<String>("data").unwrap();
            let preset = args.get_one::<String>("preset").unwrap();
            let mut config = match MonitorConfig::preset(preset) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(2);
                }
            };
            if let Some(interval) = args.get_one::<u64>("interval-ms") {
                config.tick_interval_ms = *interval;
            }

            let source = match ReplaySource::from_csv(data) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("failed to load dataset: {e}");
                    std::process::exit(1);
                }
            };

            let predictor: Box<dyn Predictor> = match args.get_one::<String>("model") {
                Some(path) => {
                    let (m, degraded) = model::load_or_default(path);
                    if degraded {
                        println!("model unavailable, using safety thresholds");
                    }
                    Box::new(m)
                }
                None => Box::new(RuleModel::default()),
            };

            let mut driver = match MonitorDriver::new(config.clone(), Box::new(source), predictor) {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            };

            // Live sinks: status line, transcript, and channel-backed
            // speech/tone consumers printed to stdout.
            let status = Arc::new(StatusSink::new());
            let transcript = Arc::new(TranscriptSink::new());
            let (speech_tx, mut speech_rx) = mpsc::channel(16);
            let (tone_tx, mut tone_rx) = mpsc::channel(16);
            driver
                .add_sink(Arc::clone(&status) as _)
                .add_sink(Arc::clone(&transcript) as _)
                .add_sink(Arc::new(SpeechSink::new(speech_tx)))
                .add_sink(Arc::new(ToneSink::new(tone_tx)));

            tokio::spawn(async move {
                while let Some(phrase) = speech_rx.recv().await {
                    println!("SPEAK: {phrase}");
                }
            });
            tokio::spawn(async move {
                while let Some(tone) = tone_rx.recv().await {
                    println!("BEEP:  {} Hz for {} ms", tone.frequency_hz, tone.duration_ms);
                }
            });

            match args.get_one::<u64>("ticks") {
                Some(n) => {
                    let mut ticker = tokio::time::interval(config.tick_interval());
                    for _ in 0..*n {
                        ticker.tick().await;
                        driver.tick_once().await;
                    }
                }
                None => {
                    let (stop_tx, stop_rx) = watch::channel(false);
                    tokio::spawn(async move {
                        let _ = tokio::signal::ctrl_c().await;
                        let _ = stop_tx.send(true);
                    });
                    driver.run(stop_rx).await;
                }
            }

            println!();
            println!("final status: {}", status.current());
            println!("alert log:");
            for line in transcript.entries() {
                println!("  {line}");
            }
        }
        Some(("simulate", args)) => {
            let raw = args.get_one::<String>("values").unwrap();
            let values: Result<Vec<f64>, _> =
                raw.split(',').map(|v| v.trim().parse::<f64>()).collect();
            let values = match values {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("invalid values list: {e}");
                    std::process::exit(2);
                }
            };
            let preset = args.get_one::<String>("preset").unwrap();
            let monitor = match MonitorConfig::preset(preset) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(2);
                }
            };

            let mut scenario = ScenarioConfig::new(values);
            scenario.monitor = monitor;
            scenario.fixed_vote = args.get_one::<i64>("vote").copied();
            scenario.ticks = args.get_one::<u64>("ticks").copied();

            match run_scenario(scenario) {
                Ok(report) => println!("{}", report.generate_text()),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
        Some(("check-config", args)) => {
            let path = args.get_one::<String>("path").unwrap();
            match MonitorConfig::from_file(path) {
                Ok(config) => {
                    println!("config ok: {config:?}");
                }
                Err(e) => {
                    eprintln!("invalid config: {e}");
                    std::process::exit(1);
                }
            }
        }
        _ => {}
    }
}
