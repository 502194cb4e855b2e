//! Cross-origin headers.
//!
//! The allowed origin is appended to every response leaving the relay by a
//! single `SetResponseHeaderLayer`, so relayed, preflight, terminal id and
//! error responses all carry it exactly once on top of backend headers.

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::Response,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Non-standard singular form, emitted alongside the origin on preflight.
pub const ACCESS_CONTROL_ALLOW_METHOD: HeaderName =
    HeaderName::from_static("access-control-allow-method");

/// Layer appending `Access-Control-Allow-Origin: <origin>` to each response.
pub fn allow_origin_layer(origin: HeaderValue) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::appending(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin)
}

/// Answer a browser preflight without contacting the backend.
pub fn preflight_response() -> Response {
    let wildcard = HeaderValue::from_static("*");
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_METHOD, wildcard.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, wildcard);
    response
}
