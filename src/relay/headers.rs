//! Header copying between inbound, outbound and relayed messages.

use axum::http::{header, HeaderMap};

/// Append every value of every header in `src` to `dst`.
///
/// Multi-valued headers keep their values in the original order.
pub fn copy_headers(src: &HeaderMap, dst: &mut HeaderMap) {
    for (name, value) in src.iter() {
        dst.append(name.clone(), value.clone());
    }
}

/// Headers to send to the backend for an inbound request.
///
/// Everything is copied except `Host`, which the client derives from the
/// backend URL.
pub fn outbound_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound.iter() {
        if name == header::HOST {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}
