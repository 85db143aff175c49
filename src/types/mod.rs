mod coercion;
mod errors;
mod window;

pub use coercion::{age_in_years, extract_fraud_flag, parse_date, parse_timestamp, safe_decimal, safe_float};
pub use window::Window;

pub type Age = i64;
pub type FraudFlag = i64;
pub type Count = u64;
