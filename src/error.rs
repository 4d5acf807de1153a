//! Error types.
//!
//! Two layers:
//!
//! - [`ApiError`] is what a request can go wrong with. Every variant maps to a
//!   fixed status and a fixed client-facing message, and implements
//!   [`IntoResponse`] so handlers and middleware can return it directly.
//! - [`Error`] surfaces infrastructure failures: binding to a port or
//!   accepting a connection. These never become HTTP responses.

use http::StatusCode;
use tracing::error;

use crate::response::{IntoResponse, Response};

/// The error type returned by the server's fallible operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// A request-level failure.
///
/// The `Display` text of each variant is exactly the message sent to the
/// client. `Internal` carries a detail string that is logged and never sent.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Product not found")]
    NotFound,

    #[error("Missing required fields")]
    Validation,

    #[error("Access denied. No token provided.")]
    AuthMissing,

    #[error("Invalid token")]
    AuthInvalid,

    #[error("API endpoint not found")]
    NoRoute,

    #[error("Something went wrong!")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::NoRoute => StatusCode::NOT_FOUND,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::AuthMissing => StatusCode::UNAUTHORIZED,
            Self::AuthInvalid => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            error!(%detail, "unhandled fault");
        }
        Response::message(self.status(), &self.to_string())
    }
}
