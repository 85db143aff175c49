mod csv_source;
mod errors;
mod normalizer;
mod schema;

use chrono::NaiveDateTime;
use std::time::SystemTime;

use crate::models::Dataset;

pub use csv_source::CsvDatasetSource;

/// Identifies one version of the underlying file.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SourceFingerprint {
    pub modified: SystemTime,
    pub length: u64
}

pub trait DatasetSource: Send + Sync + 'static {
    /// Loads a fresh snapshot; failures degrade to an empty dataset.
    fn load(&self, now: NaiveDateTime) -> Dataset;

    /// `None` when there is nothing to fingerprint (e.g. the file does not exist yet).
    fn fingerprint(&self) -> Option<SourceFingerprint>;
}
