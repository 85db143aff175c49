mod dataset;
mod results;
#[cfg(test)]
mod tests;
mod transaction;

use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::types::Age;

pub use dataset::Dataset;
pub use results::{AgeGroupCount, AlertsSnapshot, CategoryCount, DashboardReport, MerchantLocation, StateCount, StatsSnapshot};
pub use transaction::TransactionRecord;

/// Fixed age buckets for the fraud age distribution, left-inclusive and right-exclusive.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum AgeGroup {
    #[serde(rename = "<25")]
    Under25,
    #[serde(rename = "25-34")]
    From25To34,
    #[serde(rename = "35-44")]
    From35To44,
    #[serde(rename = "45-54")]
    From45To54,
    #[serde(rename = "55+")]
    From55
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::Under25,
        AgeGroup::From25To34,
        AgeGroup::From35To44,
        AgeGroup::From45To54,
        AgeGroup::From55
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Under25 => "<25",
            AgeGroup::From25To34 => "25-34",
            AgeGroup::From35To44 => "35-44",
            AgeGroup::From45To54 => "45-54",
            AgeGroup::From55 => "55+"
        }
    }

    /// The `[lower, upper)` age range covered by the bucket.
    pub fn bounds(self) -> (Age, Age) {
        match self {
            AgeGroup::Under25 => (0, 25),
            AgeGroup::From25To34 => (25, 35),
            AgeGroup::From35To44 => (35, 45),
            AgeGroup::From45To54 => (45, 55),
            AgeGroup::From55 => (55, 120)
        }
    }

    /// Returns `None` for ages outside `[0, 120)`.
    pub fn classify(age: Age) -> Option<AgeGroup> {
        Self::ALL.into_iter().find(|group| {
            let (lower, upper) = group.bounds();
            (lower..upper).contains(&age)
        })
    }
}

impl Display for AgeGroup {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}
