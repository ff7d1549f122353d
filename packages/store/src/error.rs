use thiserror::Error;

/// Failures raised by a [`crate::SessionStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store io: {0}")]
    Io(#[from] std::io::Error),

    #[error("session value is not valid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid session key: {0:?}")]
    InvalidKey(String),
}
