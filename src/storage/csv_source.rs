use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::models::Dataset;
use crate::storage::errors::LoadError;
use crate::storage::normalizer::normalize;
use crate::storage::schema::{HeaderIndex, TIMESTAMP_COLUMN};
use crate::storage::{DatasetSource, SourceFingerprint};

/// Reads the transaction file from disk, in full, on every load.
pub struct CsvDatasetSource {
    path: PathBuf
}

impl CsvDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into()
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and normalizes the whole file.
    ///
    /// A missing file is an empty dataset, not an error.
    ///
    /// # Errors
    /// Returns `LoadError` if:
    /// - The file exists but cannot be opened.
    /// - The CSV cannot be parsed (I/O failure, invalid UTF-8).
    /// - A row has more fields than the header.
    pub fn read(&self, now: NaiveDateTime) -> Result<Dataset, LoadError> {
        if !self.path.is_file() {
            debug!("No dataset at path: {}", self.path.display());
            return Ok(Dataset::default());
        }

        let file = File::open(&self.path).map_err(|source| LoadError::Open {
            path: self.path.clone(),
            source
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let header = HeaderIndex::from_headers(reader.headers().map_err(|source| self.malformed(source))?);

        if !header.contains(TIMESTAMP_COLUMN) {
            debug!("No [{TIMESTAMP_COLUMN}] column in {}, every record falls outside the windows", self.path.display());
        }

        let mut records = Vec::new();
        let mut row = StringRecord::new();

        while reader.read_record(&mut row).map_err(|source| self.malformed(source))? {
            if row.len() > header.width() {
                return Err(LoadError::RowTooWide {
                    path: self.path.clone(),
                    line: row.position().map_or(0, |position| position.line()),
                    expected: header.width(),
                    found: row.len()
                });
            }

            records.push(normalize(&row, &header, now));
        }

        debug!("Loaded {} transactions from {}", records.len(), self.path.display());

        Ok(Dataset::new(records))
    }

    fn malformed(&self, source: csv::Error) -> LoadError {
        LoadError::Malformed {
            path: self.path.clone(),
            source
        }
    }
}

impl DatasetSource for CsvDatasetSource {
    fn load(&self, now: NaiveDateTime) -> Dataset {
        self.read(now).unwrap_or_else(|error| {
            warn!("{error}");
            Dataset::default()
        })
    }

    fn fingerprint(&self) -> Option<SourceFingerprint> {
        let metadata = std::fs::metadata(&self.path).ok()?;

        Some(SourceFingerprint {
            modified: metadata.modified().ok()?,
            length: metadata.len()
        })
    }
}
