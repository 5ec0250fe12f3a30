use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsApiError {
    #[error("invalid argument: {0}")]
    InvalidArg(String),
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
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StatsApiError {
    pub fn url(&self) -> Option<&str> {
        match self {
            StatsApiError::InvalidArg(_) => None,
            StatsApiError::Network { url, .. }
            | StatsApiError::Status { url, .. }
            | StatsApiError::Decode { url, .. } => Some(url),
        }
    }
}

pub type StatsResult<T> = Result<T, StatsApiError>;
