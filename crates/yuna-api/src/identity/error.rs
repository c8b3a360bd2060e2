use thiserror::Error;

/// An error code/message pair sourced from the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct AuthFailure {
    /// Machine-readable service code, e.g. `EMAIL_NOT_FOUND`.
    pub code: String,
    pub message: String,
}

/// Errors from the identity client.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("auth error: {0}")]
    Service(AuthFailure),

    #[error("parse error: {0}")]
    Parse(String),
}

impl AuthError {
    /// The service's code/message pair when this is a service rejection.
    pub fn failure(&self) -> Option<&AuthFailure> {
        match self {
            Self::Service(failure) => Some(failure),
            _ => None,
        }
    }
}
