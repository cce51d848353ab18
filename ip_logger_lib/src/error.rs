use thiserror::Error;

/// Failure of the IP or geolocation lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The request could not complete: transport error, non-2xx status or malformed body.
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// The geolocation service answered with its error flag set.
    #[error("Geolocation unavailable")]
    GeoUnavailable,
}

/// Failure of a persistence call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Service error: {0}")]
    ServiceError(String),
}

pub type WriteError = StoreError;
pub type ReadError = StoreError;

/// The only error that is ever shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}
