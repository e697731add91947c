use shared::error::ErrorCode;
use thiserror::Error;

/// Why a single fetch of the employee collection did not yield records.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The service answered with a non-2xx status. Any body is ignored.
    #[error("request rejected with status {status}")]
    Unauthorized { status: u16 },
    /// No response was obtained: DNS, refused connection, timeout or an
    /// aborted body read.
    #[error("transport failure: {0}")]
    NetworkFault(String),
    /// A 2xx response whose body is not a list of employees.
    #[error("malformed employee payload: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FetchError::Unauthorized { .. } => ErrorCode::InvalidCredentials,
            FetchError::NetworkFault(_) => ErrorCode::NetworkFault,
            FetchError::MalformedResponse(_) => ErrorCode::MalformedResponse,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::NetworkFault(err.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginRejected {
    #[error("a login attempt is already in flight")]
    AlreadyInFlight,
    #[error("already signed in; log out first")]
    AlreadyAuthenticated,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid api base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("api base url '{0}' cannot carry a path")]
    OpaqueBaseUrl(String),
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
