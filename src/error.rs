use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("rate is required when applicant profile is absent")]
    MissingRate,
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("No simulation found with id {0}")]
    NotFound(u64),
    #[error("Rate service unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDBError(#[from] rocksdb::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LoanError {
    /// Wraps any unexpected failure as an internal error.
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        LoanError::InternalError(err.into())
    }

    /// True when the failure was caused by the caller's input rather than a fault
    /// in the service or one of its dependencies.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LoanError::InvalidInput(_)
                | LoanError::InvalidCategory(_)
                | LoanError::MissingRate
                | LoanError::ValidationError(_)
                | LoanError::NotFound(_)
        )
    }

    /// Message safe to hand back to a caller. Internal faults are logged and
    /// replaced with a generic message.
    pub fn public_message(&self) -> String {
        if self.is_client_error() || matches!(self, LoanError::UpstreamUnavailable(_)) {
            self.to_string()
        } else {
            tracing::error!(error = %self, "internal failure");
            "Internal server error".to_string()
        }
    }
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::internal(e)
    }
}

impl From<csv::Error> for LoanError {
    fn from(e: csv::Error) -> Self {
        LoanError::internal(e)
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
