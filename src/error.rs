use thiserror::Error;

use crate::messages;

/// Malformed input handed to the translator. These are data-contract
/// violations, never user-recoverable, so they propagate instead of being coerced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("invalid {field} id: {value:?}")]
    InvalidId { field: &'static str, value: String },

    #[error("unparseable appointment timestamp: {0:?}")]
    InvalidTimestamp(String),
}

/// Failure talking to one of the remote collaborators.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("could not reach {0}")]
    Connection(String),

    #[error("backend answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode backend response: {0}")]
    Decode(String),

    #[error("http client error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            let target = e
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "backend".into());
            RemoteError::Connection(target)
        } else if e.is_decode() {
            RemoteError::Decode(e.to_string())
        } else {
            RemoteError::Http(e.to_string())
        }
    }
}

/// Local form validation. `Display` is the exact text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", messages::FILL_ALL_FIELDS)]
    MissingFields,

    #[error("{}", messages::INVALID_DATE_FORMAT)]
    InvalidDateFormat,
}

/// Error surfaced by [`crate::services::AppointmentsService`].
///
/// Remote failures are collapsed into one fixed message per operation; the
/// underlying cause is kept as the error source for diagnostics.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Remote {
        message: &'static str,
        #[source]
        source: RemoteError,
    },

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl ServiceError {
    pub fn remote(message: &'static str, source: RemoteError) -> Self {
        ServiceError::Remote { message, source }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ServiceError::Remote { .. })
    }
}
