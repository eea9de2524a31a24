use reqwest::StatusCode;
use thiserror::Error;

/// Errors that terminate a lookup.
#[derive(Debug, Error)]
pub enum Error {
    /// A required environment variable is absent or empty.
    #[error("missing configuration: environment variable `{0}` is not set")]
    MissingConfiguration(&'static str),

    /// The command line could not be parsed.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// A configured endpoint is not a usable base URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The remote service failed or refused a request.
    #[error("remote service error: {0}")]
    RemoteService(#[from] RemoteError),

    /// An accepted post lacks the URL its media resolves to.
    #[error("post {id} has malformed media data: {reason}")]
    MalformedMediaData {
        /// ID of the offending post
        id: String,
        /// which part of the descriptor is missing
        reason: &'static str,
    },

    /// Nothing in the listing links to viewable media.
    #[error("Could not find any posts with readable media. Try again later!")]
    NoEligiblePosts,

    /// Writing the result failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Failures reported by, or while talking to, the remote service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport or decoding failure.
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// The credentials or token were refused.
    #[error("authentication rejected with status {0}")]
    AuthRejected(StatusCode),

    /// The service asked us to slow down.
    #[error("rate limited by the remote service")]
    RateLimited,

    /// Any other non-success status.
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(StatusCode),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::RemoteService(RemoteError::Reqwest(err))
    }
}

impl RemoteError {
    /// Classifies a non-success status code.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::AuthRejected(status),
            StatusCode::TOO_MANY_REQUESTS => RemoteError::RateLimited,
            code => RemoteError::UnexpectedStatus(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            RemoteError::from_status(StatusCode::UNAUTHORIZED),
            RemoteError::AuthRejected(StatusCode::UNAUTHORIZED)
        ));
        assert!(matches!(
            RemoteError::from_status(StatusCode::FORBIDDEN),
            RemoteError::AuthRejected(_)
        ));
        assert!(matches!(
            RemoteError::from_status(StatusCode::TOO_MANY_REQUESTS),
            RemoteError::RateLimited
        ));
        assert!(matches!(
            RemoteError::from_status(StatusCode::NOT_FOUND),
            RemoteError::UnexpectedStatus(StatusCode::NOT_FOUND)
        ));
    }

    #[test]
    fn no_eligible_posts_asks_to_retry() {
        let msg = Error::NoEligiblePosts.to_string();
        assert!(msg.contains("Try again later"));
    }
}
