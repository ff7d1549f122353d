//! # Request failures
//!
//! [`ApiError`] is the closed set of ways a call through [`crate::ApiClient`]
//! can fail. Each variant keeps the request method and URL, plus the status
//! code and raw response body when a response arrived.
//!
//! Two views are offered on top of the variants:
//!
//! - [`ApiError::kind`] for callers that branch on the failure class.
//! - [`ApiError::user_message`] for the single line the UI shows under a form.
//!
//! The `Display` impl is the diagnostic form meant for logs.

use reqwest::{Method, StatusCode};
use thiserror::Error;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized - invalid or expired token";
pub const FORBIDDEN_MESSAGE: &str = "Access forbidden";
pub const INTERNAL_MESSAGE: &str = "Internal server error";
pub const UNEXPECTED_MESSAGE: &str = "Unexpected error in request";

/// Failure class of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
    /// Any other non-success status.
    Status,
    Transport,
    Unexpected,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("401 unauthorized: {method} {url}")]
    Unauthorized {
        method: Method,
        url: String,
        body: String,
    },

    #[error("403 forbidden: {method} {url}")]
    Forbidden {
        method: Method,
        url: String,
        body: String,
    },

    #[error("404 not found: {method} {url}")]
    NotFound {
        method: Method,
        url: String,
        body: String,
    },

    #[error("500 internal server error: {method} {url}")]
    Internal {
        method: Method,
        url: String,
        body: String,
    },

    #[error("{status}: {method} {url}")]
    Status {
        status: StatusCode,
        method: Method,
        url: String,
        /// The `message` field of a JSON error body, if any.
        message: Option<String>,
        body: String,
    },

    #[error("transport error: {method} {url}: {message}")]
    Transport {
        method: Method,
        url: String,
        message: String,
    },

    #[error("unexpected error: {method} {url}: {message}")]
    Unexpected {
        method: Method,
        url: String,
        message: String,
    },
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_response(status: StatusCode, method: Method, url: String, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized { method, url, body },
            StatusCode::FORBIDDEN => ApiError::Forbidden { method, url, body },
            StatusCode::NOT_FOUND => ApiError::NotFound { method, url, body },
            StatusCode::INTERNAL_SERVER_ERROR => ApiError::Internal { method, url, body },
            _ => ApiError::Status {
                status,
                method,
                url,
                message: server_message(&body),
                body,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Unauthorized { .. } => ErrorKind::Unauthorized,
            ApiError::Forbidden { .. } => ErrorKind::Forbidden,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::Internal { .. } => ErrorKind::ServerError,
            ApiError::Status { .. } => ErrorKind::Status,
            ApiError::Transport { .. } => ErrorKind::Transport,
            ApiError::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    /// Response status, when the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::Forbidden { .. } => Some(StatusCode::FORBIDDEN),
            ApiError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            ApiError::Internal { .. } => Some(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport { .. } | ApiError::Unexpected { .. } => None,
        }
    }

    pub fn method(&self) -> &Method {
        match self {
            ApiError::Unauthorized { method, .. }
            | ApiError::Forbidden { method, .. }
            | ApiError::NotFound { method, .. }
            | ApiError::Internal { method, .. }
            | ApiError::Status { method, .. }
            | ApiError::Transport { method, .. }
            | ApiError::Unexpected { method, .. } => method,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ApiError::Unauthorized { url, .. }
            | ApiError::Forbidden { url, .. }
            | ApiError::NotFound { url, .. }
            | ApiError::Internal { url, .. }
            | ApiError::Status { url, .. }
            | ApiError::Transport { url, .. }
            | ApiError::Unexpected { url, .. } => url,
        }
    }

    /// Raw response body, when the server answered.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { body, .. }
            | ApiError::Forbidden { body, .. }
            | ApiError::NotFound { body, .. }
            | ApiError::Internal { body, .. }
            | ApiError::Status { body, .. } => Some(body),
            ApiError::Transport { .. } | ApiError::Unexpected { .. } => None,
        }
    }

    /// The human-readable line shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { .. } => UNAUTHORIZED_MESSAGE.to_string(),
            ApiError::Forbidden { .. } => FORBIDDEN_MESSAGE.to_string(),
            ApiError::NotFound { method, url, .. } => {
                format!("Resource not found - {method} {url}")
            }
            ApiError::Internal { .. } => INTERNAL_MESSAGE.to_string(),
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Status { status, .. } => {
                format!("Request failed with status code {}", status.as_u16())
            }
            ApiError::Transport { message, .. } => message.clone(),
            ApiError::Unexpected { .. } => UNEXPECTED_MESSAGE.to_string(),
        }
    }

    /// Emit the failure as one `error` event. `error_data` is the response
    /// body, or the underlying error text when no response arrived.
    pub(crate) fn log(&self) {
        let error_data = match self {
            ApiError::Transport { message, .. } | ApiError::Unexpected { message, .. } => message.as_str(),
            _ => self.body().unwrap_or_default(),
        };
        tracing::error!(
            status = self.status().map(|s| s.as_u16()),
            error_message = %self.user_message(),
            url = %self.url(),
            method = %self.method(),
            error_data,
            "api request failed"
        );
    }
}

/// The `message` string of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")?
        .as_str()
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn response(status: u16, body: &str) -> ApiError {
        ApiError::from_response(
            StatusCode::from_u16(status).unwrap(),
            Method::GET,
            "http://localhost:8080/projects/9".to_string(),
            body.to_string(),
        )
    }

    #[rstest]
    #[case(401, ErrorKind::Unauthorized, UNAUTHORIZED_MESSAGE)]
    #[case(403, ErrorKind::Forbidden, FORBIDDEN_MESSAGE)]
    #[case(404, ErrorKind::NotFound, "Resource not found - GET http://localhost:8080/projects/9")]
    #[case(500, ErrorKind::ServerError, INTERNAL_MESSAGE)]
    #[case(418, ErrorKind::Status, "Request failed with status code 418")]
    fn test_status_mapping(#[case] status: u16, #[case] kind: ErrorKind, #[case] message: &str) {
        let error = response(status, "");
        assert_eq!(error.kind(), kind);
        assert_eq!(error.status().map(|s| s.as_u16()), Some(status));
        assert_eq!(error.user_message(), message);
    }

    #[test]
    fn test_fixed_statuses_ignore_server_message() {
        let error = response(403, r#"{"message":"role missing"}"#);
        assert_eq!(error.user_message(), FORBIDDEN_MESSAGE);
        assert_eq!(error.body(), Some(r#"{"message":"role missing"}"#));
    }

    #[test]
    fn test_server_message_is_surfaced() {
        let error = response(409, r#"{"message":"Email already registered"}"#);
        assert_eq!(error.kind(), ErrorKind::Status);
        assert_eq!(error.user_message(), "Email already registered");
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"message": 42}"#)]
    #[case(r#"{"error":"nope"}"#)]
    #[case("")]
    fn test_unusable_body_falls_back(#[case] body: &str) {
        let error = response(422, body);
        assert_eq!(error.user_message(), "Request failed with status code 422");
    }

    #[test]
    fn test_transport_message_is_verbatim() {
        let error = ApiError::Transport {
            method: Method::POST,
            url: "http://127.0.0.1:1/sign-in".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::Transport);
        assert_eq!(error.user_message(), "connection refused");
        assert!(error.status().is_none());
        assert!(error.body().is_none());
    }

    #[test]
    fn test_unexpected_message() {
        let error = ApiError::Unexpected {
            method: Method::GET,
            url: "http://localhost:8080/tasks".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(error.user_message(), UNEXPECTED_MESSAGE);
        assert_eq!(error.url(), "http://localhost:8080/tasks");
    }
}
