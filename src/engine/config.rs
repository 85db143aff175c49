use std::str::FromStr;
use tracing::warn;

const ALERT_WINDOW_HOURS_VAR: &str = "FRAUD_METRICS_ALERT_WINDOW_HOURS";
const RATIO_WINDOW_MINUTES_VAR: &str = "FRAUD_METRICS_RATIO_WINDOW_MINUTES";
const TOP_N_VAR: &str = "FRAUD_METRICS_TOP_N";

/// Query parameters used for the dashboard snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    /// Window of the headline fraud count.
    pub alert_window_hours: f64,
    /// Window of the fraud ratio.
    pub ratio_window_minutes: f64,
    /// Length of every top-n breakdown.
    pub top_n: usize
}

impl MetricsConfig {
    /// Defaults overridden by any `FRAUD_METRICS_*` environment variables that parse.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            alert_window_hours: read_override(&lookup, ALERT_WINDOW_HOURS_VAR, defaults.alert_window_hours),
            ratio_window_minutes: read_override(&lookup, RATIO_WINDOW_MINUTES_VAR, defaults.ratio_window_minutes),
            top_n: read_override(&lookup, TOP_N_VAR, defaults.top_n)
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            alert_window_hours: 2.0,
            ratio_window_minutes: 5.0,
            top_n: 5
        }
    }
}

fn read_override<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };

    raw.trim().parse().unwrap_or_else(|_| {
        warn!("Ignoring {key}='{raw}', keeping the default");
        default
    })
}
