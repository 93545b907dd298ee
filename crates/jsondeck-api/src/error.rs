//! Error types for the API layer.
//!
//! [`ApiError`] covers every request that does not succeed. Client errors
//! map to 4xx, missing records to 404, and failures while reading the
//! request body or persisting a create/update to a generic 500. Each
//! variant renders into the standard [`Reply`] envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::response::Reply;

/// Errors that end a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The first path segment does not name a resource.
    #[error("Invalid endpoint")]
    InvalidEndpoint,

    /// A read under a known resource with an unsupported target shape.
    #[error("Invalid URL")]
    InvalidUrl,

    /// A member operation was requested without an id.
    #[error("Invalid request")]
    InvalidRequest,

    /// The method is not served for this resource and path.
    #[error("Invalid request method")]
    MethodNotAllowed,

    /// No record matches the requested id.
    #[error("{0}")]
    NotFound(String),

    /// The body could not be used or the change could not be persisted.
    #[error("{0}")]
    Failed(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidEndpoint | Self::InvalidUrl | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render as a response envelope.
    pub fn into_reply(self) -> Reply {
        Reply::new(self.status(), self.to_string())
    }
}

impl From<ApiError> for Reply {
    fn from(error: ApiError) -> Self {
        error.into_reply()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_reply().into_response()
    }
}
