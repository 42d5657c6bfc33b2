use derive_more::Display;

/// Ways a trade feed subscription can fail.
///
/// `Display` yields the text shown to the user; the wrapped detail is only
/// for the log.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum FeedError {
    #[display(fmt = "Error processing trade data")]
    MalformedMessage(String),
    #[display(fmt = "Connection error occurred")]
    TransportError(String),
    #[display(fmt = "API server is not responding. Please try again later.")]
    Timeout,
}

impl FeedError {
    /// Diagnostic text for the log.
    pub fn detail(&self) -> &str {
        match self {
            FeedError::MalformedMessage(detail) | FeedError::TransportError(detail) => detail,
            FeedError::Timeout => "no message before the deadline",
        }
    }
}

impl std::error::Error for FeedError {}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::MalformedMessage(err.to_string())
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
