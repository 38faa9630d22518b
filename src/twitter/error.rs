use thiserror::Error;

pub type Result<T> = std::result::Result<T, TwitterError>;

/// Failures talking to the X API
///
/// None of these reach HTTP callers; the account fetcher replaces the
/// affected account's posts with generated ones.
#[derive(Debug, Error)]
pub enum TwitterError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl TwitterError {
    /// Short label for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            TwitterError::Network(_) => "network",
            TwitterError::Api { .. } => "api",
            TwitterError::Parse(_) => "parse",
            TwitterError::Malformed(_) => "malformed",
            TwitterError::Url(_) => "url",
        }
    }
}

impl From<reqwest::Error> for TwitterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TwitterError::Parse(err.to_string())
        } else {
            TwitterError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TwitterError {
    fn from(err: serde_json::Error) -> Self {
        TwitterError::Parse(err.to_string())
    }
}
