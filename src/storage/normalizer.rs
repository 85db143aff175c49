use chrono::NaiveDateTime;
use csv::StringRecord;
use tracing::trace;

use crate::models::TransactionRecord;
use crate::storage::schema::HeaderIndex;
use crate::types::{age_in_years, extract_fraud_flag, parse_date, parse_timestamp, safe_decimal, safe_float};

/// Turns one raw CSV row into a typed record.
///
/// Derivations run independently: a missing or malformed source cell only nulls its own field.
pub fn normalize(row: &StringRecord, header: &HeaderIndex, now: NaiveDateTime) -> TransactionRecord {
    let text = |column: &str| header.field(row, column).map(str::to_string);
    let float = |column: &str| header.field(row, column).and_then(safe_float);

    let fraud_flag = header.field(row, "is_fraud")
        .map(extract_fraud_flag)
        .unwrap_or(0);

    let local_timestamp = header.field(row, "local_timestamp")
        .and_then(|raw| parse_timestamp(raw).inspect_err(|error| trace!("{error}")).ok());

    let dob = header.field(row, "dob")
        .and_then(|raw| parse_date(raw).inspect_err(|error| trace!("{error}")).ok());

    TransactionRecord {
        transaction_id: text("transaction_id"),
        ssn: text("ssn"),
        cc_num: text("cc_num"),
        first_name: text("first_name"),
        last_name: text("last_name"),
        gender: text("gender"),
        street: text("street"),
        city: text("city"),
        state: text("state"),
        zip: text("zip"),
        home_lat: float("home_lat"),
        home_long: float("home_long"),
        city_population: text("city_population"),
        job: text("job"),
        dob,
        age: dob.map(|dob| age_in_years(dob, now)),
        account_number: text("account_number"),
        trans_num: text("trans_num"),
        trans_date: text("trans_date"),
        trans_time: text("trans_time"),
        unix_time: text("unix_time"),
        category: text("category"),
        amount: header.field(row, "amt").and_then(safe_decimal),
        merchant: text("merchant"),
        merch_lat: float("merch_lat"),
        merch_long: float("merch_long"),
        fraud_flag,
        local_timestamp
    }
}
