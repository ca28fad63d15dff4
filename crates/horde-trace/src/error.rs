//! Trace-output errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("trace io: {0}")]
    Io(#[from] std::io::Error),

    #[error("trace csv: {0}")]
    Csv(#[from] csv::Error),
}

pub type TraceResult<T> = Result<T, TraceError>;
