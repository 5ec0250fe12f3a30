use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutboundError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("unusable summary response: {0}")]
    Malformed(String),
}

impl OutboundError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        OutboundError::InvalidConfig(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        OutboundError::Malformed(msg.into())
    }
}

pub type OutboundResult<T> = Result<T, OutboundError>;
