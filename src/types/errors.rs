use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoercionError {
    #[error("Coercion error: Value is an empty string")]
    Empty,
    #[error("Coercion error: Invalid number [{0}]")]
    InvalidNumber(String),
    #[error("Coercion error: Invalid timestamp [{0}]")]
    InvalidTimestamp(String),
    #[error("Coercion error: Invalid date [{0}]")]
    InvalidDate(String)
}
