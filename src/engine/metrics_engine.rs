use crate::engine::aggregator;
use crate::engine::MetricsConfig;
use crate::models::{AgeGroupCount, AlertsSnapshot, CategoryCount, Dataset, DashboardReport, MerchantLocation, StateCount, StatsSnapshot};
use crate::storage::{DatasetSource, SourceFingerprint};
use crate::types::{Count, Window};
use chrono::{Local, NaiveDateTime};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::spawn_blocking;
use tracing::{debug, error};

const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SNAPSHOT_CACHE_CAPACITY: u64 = 4;

/// Answers fraud metric queries, each over its own freshly loaded snapshot of the source.
pub struct MetricsEngine<S: DatasetSource> {
    source: Arc<S>,
    config: MetricsConfig,
    cache: Option<Cache<SourceFingerprint, Arc<Dataset>>>
}

impl<S: DatasetSource> MetricsEngine<S> {
    /// Creates an engine that re-reads the source on every query.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            config: MetricsConfig::default(),
            cache: None
        }
    }

    pub fn with_config(mut self, config: MetricsConfig) -> Self {
        self.config = config;
        self
    }

    /// Reuses a loaded snapshot while the source fingerprint is unchanged, for at most `timeout`.
    pub fn with_cache_timeout(mut self, timeout: Duration) -> Self {
        self.cache = Some(
            Cache::builder()
                .max_capacity(SNAPSHOT_CACHE_CAPACITY)
                .time_to_live(timeout)
                .build()
        );
        self
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    pub async fn recent_fraud_count(&self, hours: f64) -> Count {
        let (dataset, now) = self.snapshot().await;
        aggregator::recent_fraud_count(&dataset, now, Window::hours(hours))
    }

    pub async fn recent_fraud_ratio(&self, minutes: f64) -> f64 {
        let (dataset, now) = self.snapshot().await;
        aggregator::recent_fraud_ratio(&dataset, now, Window::minutes(minutes))
    }

    pub async fn top_fraud_categories(&self, n: usize) -> Vec<CategoryCount> {
        let (dataset, _) = self.snapshot().await;
        aggregator::top_fraud_categories(&dataset, n)
    }

    pub async fn age_distribution(&self) -> Vec<AgeGroupCount> {
        let (dataset, _) = self.snapshot().await;
        aggregator::age_distribution(&dataset)
    }

    pub async fn top_merchant_locations(&self, n: usize) -> Vec<MerchantLocation> {
        let (dataset, _) = self.snapshot().await;
        aggregator::top_merchant_locations(&dataset, n)
    }

    pub async fn top_fraud_states(&self, n: usize) -> Vec<StateCount> {
        let (dataset, _) = self.snapshot().await;
        aggregator::top_fraud_states(&dataset, n)
    }

    /// Headline count and ratio, using the configured windows.
    pub async fn alerts_snapshot(&self) -> AlertsSnapshot {
        let (fraud_count, fraud_ratio_5min) = tokio::join!(
            self.recent_fraud_count(self.config.alert_window_hours),
            self.recent_fraud_ratio(self.config.ratio_window_minutes)
        );

        AlertsSnapshot {
            fraud_count,
            fraud_ratio_5min,
            timestamp: current_timestamp()
        }
    }

    /// The four categorical breakdowns, queried concurrently.
    pub async fn stats_snapshot(&self) -> StatsSnapshot {
        let top_n = self.config.top_n;

        let (top_categories, age_distribution, top_merchant_locations, top_states) = tokio::join!(
            self.top_fraud_categories(top_n),
            self.age_distribution(),
            self.top_merchant_locations(top_n),
            self.top_fraud_states(top_n)
        );

        StatsSnapshot {
            top_categories,
            age_distribution,
            top_merchant_locations,
            top_states,
            timestamp: current_timestamp()
        }
    }

    pub async fn report(&self) -> DashboardReport {
        let (alerts, stats) = tokio::join!(self.alerts_snapshot(), self.stats_snapshot());

        DashboardReport { alerts, stats }
    }

    async fn snapshot(&self) -> (Arc<Dataset>, NaiveDateTime) {
        let now = Local::now().naive_local();

        let Some(cache) = &self.cache else {
            return (self.load(now).await, now);
        };

        let dataset = match self.fingerprint().await {
            Some(fingerprint) => cache.get_with(fingerprint, self.load(now)).await,
            None => self.load(now).await
        };

        (dataset, now)
    }

    async fn fingerprint(&self) -> Option<SourceFingerprint> {
        let source = self.source.clone();

        spawn_blocking(move || source.fingerprint()).await
            .inspect_err(|error| error!("Dataset fingerprint did not complete: {error}"))
            .ok()
            .flatten()
    }

    async fn load(&self, now: NaiveDateTime) -> Arc<Dataset> {
        let source = self.source.clone();

        match spawn_blocking(move || source.load(now)).await {
            Ok(dataset) if dataset.is_empty() => {
                debug!("Loaded an empty snapshot");
                Arc::new(dataset)
            }
            Ok(dataset) => {
                debug!("Loaded snapshot with {} transactions", dataset.len());
                Arc::new(dataset)
            }
            Err(error) => {
                error!("Dataset load did not complete: {error}");
                Arc::new(Dataset::default())
            }
        }
    }
}

fn current_timestamp() -> String {
    Local::now().format(SNAPSHOT_TIMESTAMP_FORMAT).to_string()
}
