use serde::Serialize;

use crate::models::AgeGroup;
use crate::types::Count;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: Count
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeGroupCount {
    pub age_group: AgeGroup,
    pub count: Count
}

/// A merchant position ranked by the number of fraud records seen there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchantLocation {
    pub merchant: String,
    pub count: Count,
    pub merch_lat: f64,
    pub merch_long: f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateCount {
    pub state: String,
    pub count: Count
}

/// Headline numbers polled by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertsSnapshot {
    pub fraud_count: Count,
    pub fraud_ratio_5min: f64,
    pub timestamp: String
}

/// Categorical fraud breakdowns polled by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub top_categories: Vec<CategoryCount>,
    pub age_distribution: Vec<AgeGroupCount>,
    pub top_merchant_locations: Vec<MerchantLocation>,
    pub top_states: Vec<StateCount>,
    pub timestamp: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub alerts: AlertsSnapshot,
    pub stats: StatsSnapshot
}
