//! Request-level errors and their HTTP representation.
//!
//! Every failure while serving a request becomes a 500 whose body is the
//! error text. Failures are local to the request that hit them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::terminal::ResolveError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid backend URL {url}: {source}")]
    InvalidTarget {
        url: String,
        source: axum::http::uri::InvalidUri,
    },

    #[error("backend request failed: {0}")]
    Backend(#[from] hyper_util::client::legacy::Error),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
