mod engine;
mod models;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{MetricsConfig, MetricsEngine};
use crate::models::DashboardReport;
use crate::storage::CsvDatasetSource;

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Three positional arguments do not justify pulling in clap yet.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: fraud-metrics-engine [input].csv [log_level:optional] [cache_seconds:optional] > [report].json");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        eprintln!("cache_seconds reuses one snapshot across queries while the file is unchanged (default: off)");
        eprintln!("Query windows: FRAUD_METRICS_ALERT_WINDOW_HOURS, FRAUD_METRICS_RATIO_WINDOW_MINUTES, FRAUD_METRICS_TOP_N");
        exit(1);
    }

    let path = &args[1];
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);
    let cache_timeout = args.get(3).and_then(|s| parse_cache_timeout(s));

    setup_logging(log_level);

    let source = Arc::new(CsvDatasetSource::new(path));
    info!("Reading transactions from {}", source.path().display());

    let mut engine = MetricsEngine::new(source).with_config(MetricsConfig::from_env());

    if let Some(timeout) = cache_timeout {
        info!("Caching snapshots for {timeout:?}");
        engine = engine.with_cache_timeout(timeout);
    }

    info!("Using {:?}", engine.config());

    let timer = Instant::now();
    let report = engine.report().await;
    let duration = timer.elapsed();

    info!("Computed fraud metrics in: {duration:?}");

    write_report_to_stdout(&report)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn parse_cache_timeout(seconds: &str) -> Option<Duration> {
    let timeout = seconds.trim().parse::<f64>().ok()
        .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
        .filter(|timeout| !timeout.is_zero());

    match timeout {
        Some(timeout) => Some(timeout),
        None => {
            eprintln!("Invalid cache duration '{}', caching disabled", seconds);
            None
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the JSON report, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_report_to_stdout(report: &DashboardReport) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, report)?;
    writeln!(output)?;

    output.flush()?;

    Ok(())
}
