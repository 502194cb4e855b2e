//! Forwarding inbound requests to the gateway.
//!
//! # Responsibilities
//! - Rebuild the inbound request against the backend origin
//! - Stream the request body up and the response body back
//! - Hand back the backend status and headers untouched
//!
//! # Design Decisions
//! - One outbound request per inbound request, never retried
//! - Bodies are streamed, never buffered
//! - The path and query are spliced onto the base URL as raw bytes; no
//!   dot-segment removal or re-encoding happens on the way through
//! - Certificate checks are disabled on this client only, when configured

use axum::{
    body::Body,
    http::{HeaderMap, Request, Uri},
    response::Response,
};
use futures_util::TryStreamExt;
use hyper_tls::HttpsConnector;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::BackendConfig;
use crate::error::RelayError;
use crate::relay::headers::{copy_headers, outbound_headers};

type BackendClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Client for the single gateway backend.
#[derive(Clone)]
pub struct Relay {
    client: BackendClient,
    base_url: String,
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Relay {
    /// Build the backend client from configuration.
    pub fn new(config: &BackendConfig) -> Result<Self, native_tls::Error> {
        if config.accept_invalid_certs {
            tracing::warn!(
                base_url = %config.base_url,
                "Backend certificate verification is disabled"
            );
        }

        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        let mut http = HttpConnector::new();
        http.enforce_http(false);
        let https = HttpsConnector::from((http, tokio_native_tls::TlsConnector::from(tls)));

        let client = Client::builder(TokioExecutor::new()).build(https);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base_url><path+query>` for an inbound URI.
    pub fn target_uri(&self, uri: &Uri) -> Result<Uri, RelayError> {
        let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
        let target = format!("{}{}", self.base_url, path_and_query);
        target
            .parse::<Uri>()
            .map_err(|source| RelayError::InvalidTarget {
                url: target,
                source,
            })
    }

    /// Forward one request and return the backend's response as-is.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, RelayError> {
        let (parts, body) = request.into_parts();
        let uri = self.target_uri(&parts.uri)?;

        tracing::debug!(method = %parts.method, target = %uri, "Forwarding request");

        let mut outbound = Request::new(body);
        *outbound.method_mut() = parts.method;
        *outbound.uri_mut() = uri;
        *outbound.headers_mut() = outbound_headers(&parts.headers);

        let backend = self.client.request(outbound).await?;
        let (backend_parts, backend_body) = backend.into_parts();
        tracing::debug!(status = %backend_parts.status, "Backend responded");

        let mut headers = HeaderMap::with_capacity(backend_parts.headers.len() + 1);
        copy_headers(&backend_parts.headers, &mut headers);

        let stream = Body::new(backend_body).into_data_stream().inspect_err(|e| {
            tracing::warn!(error = %e, "Backend body stream failed, response truncated");
        });

        let mut response = Response::new(Body::from_stream(stream));
        *response.status_mut() = backend_parts.status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}
