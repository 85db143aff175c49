use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::types::{Age, FraudFlag};

/// Represents a single normalized row of the transaction file.
///
/// Every text field is `None` when its column is missing from the file (or the row is
/// too short to reach it) and `Some("")` when the cell is present but blank. Derived
/// fields (`age`, `fraud_flag`, coordinates, `local_timestamp`) are recomputed on every load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionRecord {
    pub transaction_id: Option<String>,
    pub ssn: Option<String>,
    pub cc_num: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub home_lat: Option<f64>,
    pub home_long: Option<f64>,
    pub city_population: Option<String>,
    pub job: Option<String>,
    /// Date of birth, `None` when missing or unparsable.
    pub dob: Option<NaiveDate>,
    /// Whole years since `dob` at load time.
    pub age: Option<Age>,
    pub account_number: Option<String>,
    pub trans_num: Option<String>,
    pub trans_date: Option<String>,
    pub trans_time: Option<String>,
    pub unix_time: Option<String>,
    pub category: Option<String>,
    /// The `amt` column.
    pub amount: Option<Decimal>,
    pub merchant: Option<String>,
    pub merch_lat: Option<f64>,
    pub merch_long: Option<f64>,
    /// First run of digits in the raw `is_fraud` cell, 0 when there is none.
    pub fraud_flag: FraudFlag,
    pub local_timestamp: Option<NaiveDateTime>
}

impl TransactionRecord {
    pub fn is_fraud(&self) -> bool {
        self.fraud_flag == 1
    }

    /// Merchant position, only when both coordinates parsed.
    pub fn merchant_coordinates(&self) -> Option<(f64, f64)> {
        self.merch_lat.zip(self.merch_long)
    }
}
