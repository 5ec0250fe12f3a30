use thiserror::Error;

#[derive(Debug, Error)]
pub enum TlError {
    #[error("invalid argument: {0}")]
    InvalidArg(String),
    #[error("no game found for {0}")]
    NoGameFound(String),
    #[error("statistics service unavailable: {0}")]
    Upstream(String),
    #[error("malformed statistics response: {0}")]
    Malformed(String),
    #[error("snapshot at timecode {timecode} failed: {reason}")]
    SnapshotFailed { timecode: String, reason: String },
    #[error("export line exceeds the configured byte budget")]
    Oversize,
    #[error("internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TlError {
    /// True when the run produced no usable data rather than hitting a fault in this crate.
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            TlError::NoGameFound(_)
                | TlError::Upstream(_)
                | TlError::Malformed(_)
                | TlError::SnapshotFailed { .. }
        )
    }
}

pub type TlResult<T> = Result<T, TlError>;
