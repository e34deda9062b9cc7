use spendlog_domain::CurrencyCode;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Currency mismatch: ledger is locked to {locked}, got {given}")]
    CurrencyMismatch {
        locked: CurrencyCode,
        given: CurrencyCode,
    },
    #[error("Expense not found: {0}")]
    NotFound(Uuid),
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Persistence(err.to_string())
    }
}
