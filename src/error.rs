use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{url} answered with status {status}")]
    Status { status: u16, url: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("request was superseded or torn down")]
    Cancelled,
    #[error("maintenance toggle is busy")]
    Busy,
    #[error("no maintenance change is awaiting confirmation")]
    NotPending,
    #[error("config error: {0}")]
    Config(String),
}

impl AdminError {
    /// Cancelled requests are dropped quietly instead of being shown to the user.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
