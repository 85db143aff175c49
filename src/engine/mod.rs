pub mod aggregator;
mod config;
mod metrics_engine;

pub use config::MetricsConfig;
pub use metrics_engine::MetricsEngine;
