//! Handler-boundary errors and their JSON envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Every way a request can fail.  Nothing propagates past this type: each
/// variant becomes a status code and a generic `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The `{id}` path segment is not an integer.
    #[error("Invalid user ID")]
    InvalidId,

    /// An update body failed to decode into a patch.
    #[error("Invalid request body")]
    InvalidBody(#[source] serde_json::Error),

    /// A create body failed to decode into a complete user.  Treated like any
    /// other failed insert.
    #[error("Internal server error")]
    UndecodableInsert(#[source] serde_json::Error),

    #[error("User not found")]
    NotFound,

    /// Storage failure, including constraint violations.  The cause is logged
    /// and never sent to the client.
    #[error("Internal server error")]
    Internal(#[from] db::DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UndecodableInsert(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(cause) => error!("API error: {cause}"),
            Self::UndecodableInsert(cause) => error!("API error: undecodable user: {cause}"),
            Self::InvalidBody(cause) => warn!("rejected request body: {cause}"),
            _ => {}
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
