use thiserror::Error;

/// Outcome of reading one persisted history.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// No file, or a file too corrupt to parse.
    #[error("history not found")]
    NotFound,
    #[error("invalid history record: {0}")]
    InvalidRecord(String),
    #[error("history storage error: {0}")]
    Storage(#[from] std::io::Error),
}
