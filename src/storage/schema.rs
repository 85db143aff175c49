use csv::StringRecord;
use std::collections::HashMap;
use tracing::debug;

pub const TIMESTAMP_COLUMN: &str = "local_timestamp";

/// Column layout of the transaction feed, used to repair files whose header is missing or unnamed.
pub const CANONICAL_COLUMNS: [&str; 27] = [
    "transaction_id", "ssn", "cc_num", "first_name", "last_name", "gender",
    "street", "city", "state", "zip", "home_lat", "home_long", "city_population",
    "job", "dob", "account_number", "trans_num", "trans_date", "trans_time",
    "unix_time", "category", "amt", "merchant", "merch_lat", "merch_long",
    "is_fraud", TIMESTAMP_COLUMN
];

/// Maps column names to their position in each row.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
    width: usize
}

impl HeaderIndex {
    /// Builds the index from the header row, applying the legacy schema migration when it matches.
    pub fn from_headers(headers: &StringRecord) -> Self {
        let names: Vec<String> = if needs_legacy_migration(headers) {
            debug!("Header lacks [{TIMESTAMP_COLUMN}] but has {} columns, renaming positionally", CANONICAL_COLUMNS.len());
            CANONICAL_COLUMNS.iter().map(|name| name.to_string()).collect()
        } else {
            headers.iter().map(str::to_string).collect()
        };

        let width = names.len();
        let mut positions = HashMap::with_capacity(width);

        for (position, name) in names.into_iter().enumerate() {
            positions.entry(name).or_insert(position);
        }

        Self { positions, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    /// The raw cell for `column`, `None` when the column is unknown or the row stops short of it.
    pub fn field<'a>(&self, row: &'a StringRecord, column: &str) -> Option<&'a str> {
        self.position(column).and_then(|position| row.get(position))
    }
}

/// The header does not name the timestamp column and has exactly the canonical width.
pub fn needs_legacy_migration(headers: &StringRecord) -> bool {
    headers.len() == CANONICAL_COLUMNS.len() && !headers.iter().any(|name| name == TIMESTAMP_COLUMN)
}
