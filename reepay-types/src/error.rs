//! Error types for the provider plugin.

/// Failures talking to the remote gateway.
///
/// Port-level type: the reqwest adapter maps its errors into these so the
/// core stays free of HTTP client types.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("gateway returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("could not decode gateway response: {0}")]
    Decode(String),
}

/// Failures from the host platform's ports (carts, orders, keys).
#[derive(Debug, thiserror::Error)]
pub enum CommerceError {
    #[error("entity not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Business failures in the payment session adapter.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A gateway response was in a state the operation does not accept.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("payment data missing required field: {0}")]
    MissingData(&'static str),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidArgument(msg) => AppError::InvalidData(msg),
            ProviderError::MissingData(field) => {
                AppError::InvalidData(format!("payment data missing required field: {field}"))
            }
            ProviderError::Gateway(e) => AppError::Internal(e.to_string()),
            ProviderError::Commerce(e) => e.into(),
        }
    }
}

impl From<CommerceError> for AppError {
    fn from(err: CommerceError) -> Self {
        match err {
            CommerceError::NotFound => AppError::NotFound("Resource not found".into()),
            CommerceError::Storage(e) => AppError::Internal(e),
            CommerceError::Conflict(e) => AppError::InvalidData(e),
        }
    }
}
