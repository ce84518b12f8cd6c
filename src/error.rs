use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// How a search can fail. `Display` is the text shown in the status element.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    /// No usable response: connect/DNS/IO failure or an unparsable body.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The planner answered with a non-success status.
    #[error("Error {status}: {message}")]
    Application { status: u16, message: String },
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Transport(err.to_string())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
}
