//! Error types for the web service.
//!
//! Errors are rendered as simple HTML error pages rather than JSON, since
//! this is a user-facing HTML service. The `/api` handlers map them to JSON
//! bodies themselves.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maud::{DOCTYPE, html};

/// Web service error type.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// A path segment could not be decoded (kind number or event id).
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The requested kind, variant or event does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error (event source, rendering, etc.).
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),

    /// Catalog construction or event validation error.
    #[error("catalog error: {0}")]
    Core(#[from] kindlr_core::Error),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) | Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to users. Internal details are only logged.
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidIdentifier(msg) => format!("The request could not be understood: {msg}"),
            Self::NotFound(msg) => msg.clone(),
            Self::Internal(_) | Self::Core(_) => {
                "An internal error occurred. Please try again later.".to_string()
            }
        }
    }

    fn log(&self) {
        match self {
            Self::Internal(err) => tracing::error!(error = %err, "internal server error"),
            Self::Core(err) => tracing::error!(error = %err, "catalog error"),
            _ => {}
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status();
        let title = match status {
            StatusCode::BAD_REQUEST => "Invalid Request",
            StatusCode::NOT_FOUND => "Not Found",
            _ => "Internal Error",
        };
        let message = self.public_message();

        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (title) " | Kindlr" }
                    meta name="robots" content="noindex";
                    style { (maud::PreEscaped(crate::render::components::ERROR_CSS)) }
                }
                body {
                    main class="error-page" {
                        h1 { (title) }
                        p { (message) }
                        a href="/" { "Back to all kinds" }
                    }
                }
            }
        };

        (status, markup).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_identifier() {
        let err = WebError::InvalidIdentifier("bad input".to_string());
        assert_eq!(err.to_string(), "invalid identifier: bad input");
    }

    #[test]
    fn test_error_display_not_found() {
        let err = WebError::NotFound("Kind 12345 not found".to_string());
        assert_eq!(err.to_string(), "not found: Kind 12345 not found");
    }

    #[test]
    fn test_error_display_internal() {
        let err = WebError::Internal(anyhow::anyhow!("something broke"));
        assert_eq!(err.to_string(), "internal error: something broke");
    }

    #[test]
    fn test_error_from_core() {
        let err: WebError = kindlr_core::Error::DuplicateKind(1).into();
        assert!(matches!(err, WebError::Core(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_public_message_hides_internals() {
        let err = WebError::Internal(anyhow::anyhow!("relay password leaked"));
        assert!(!err.public_message().contains("password"));
    }

    #[test]
    fn test_error_into_response_invalid_identifier() {
        let response = WebError::InvalidIdentifier("test".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_into_response_not_found() {
        let response = WebError::NotFound("event xyz".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_into_response_internal() {
        let response = WebError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
