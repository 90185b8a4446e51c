/// Error type returned by the client library
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    // Validation errors (missing credential fields, missing data source files, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    // Transport errors (connection, timeout, TLS, body streaming)
    #[error("Transport error: {0}")]
    Transport(String),

    // The server answered with a non-success status code
    #[error("Server error {status}: {message}")]
    Api { status: u16, message: String },

    // Request/response (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("{0} not found")]
    NotFound(String),

    // Status polling gave up after too many consecutive fetch failures
    #[error("Status polling for execution {execution_id} abandoned after {errors} consecutive errors")]
    PollingAbandoned { execution_id: String, errors: u32 },
}

// Convenient conversions from common error types

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Serialization(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
