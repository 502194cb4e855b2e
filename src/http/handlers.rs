//! Request handlers for the two routes.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::RelayError;
use crate::http::cors::preflight_response;
use crate::http::server::AppState;
use crate::observability::metrics::{self, ROUTE_PREFLIGHT, ROUTE_RELAY, ROUTE_TERMINAL_ID};

/// Everything except `/terminalId`: preflight or forward to the gateway.
pub async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();

    if request.method() == Method::OPTIONS {
        tracing::debug!(path = %request.uri().path(), "Answering preflight");
        metrics::record_request(ROUTE_PREFLIGHT, 200, start);
        return preflight_response();
    }

    let response = state
        .relay
        .forward(request)
        .await
        .unwrap_or_else(IntoResponse::into_response);

    metrics::record_request(ROUTE_RELAY, response.status().as_u16(), start);
    response
}

/// `/terminalId`: the third line of the newest terminal configuration file.
pub async fn terminal_id_handler(State(state): State<AppState>, method: Method) -> Response {
    let start = Instant::now();

    if method == Method::OPTIONS {
        metrics::record_request(ROUTE_PREFLIGHT, 200, start);
        return preflight_response();
    }

    let resolver = state.resolver.clone();
    let resolved = tokio::task::spawn_blocking(move || resolver.resolve())
        .await
        .map_err(RelayError::from)
        .and_then(|result| result.map_err(RelayError::from));

    let response = match resolved {
        Ok(terminal_id) => (StatusCode::OK, terminal_id).into_response(),
        Err(e) => e.into_response(),
    };

    metrics::record_request(ROUTE_TERMINAL_ID, response.status().as_u16(), start);
    response
}
