use thiserror::Error;

pub type Result<T> = std::result::Result<T, BankError>;

#[derive(Error, Debug)]
pub enum BankError {
    #[error("account not found: {0}")]
    AccountNotFound(String),
    #[error("alert not found: {0}")]
    AlertNotFound(String),
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("unsupported currency pair: {0}/{1}")]
    UnsupportedPair(String, String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
