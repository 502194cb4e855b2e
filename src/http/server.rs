//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with both handlers
//! - Wire up middleware (tracing, CORS origin)
//! - Dispatch `/terminalId` to the resolver, everything else to the relay
//! - Serve on a bound listener until shutdown is signalled

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    routing::any,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::http::cors::allow_origin_layer;
use crate::http::handlers::{relay_handler, terminal_id_handler};
use crate::relay::Relay;
use crate::terminal::{TerminalIdResolver, TERMINAL_FILE_EXTENSION};

/// Path served by the terminal id resolver.
pub const TERMINAL_ID_PATH: &str = "/terminalId";

/// Application state injected into handlers.
///
/// Read-only after startup; shared by every connection task.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    pub resolver: Arc<TerminalIdResolver>,
}

/// Error building the server from configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to build backend client: {0}")]
    Client(#[from] native_tls::Error),

    #[error("invalid CORS origin {0:?}")]
    Origin(String),
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, BuildError> {
        let origin = HeaderValue::from_str(&config.cors.origin)
            .map_err(|_| BuildError::Origin(config.cors.origin.clone()))?;

        let state = AppState {
            relay: Arc::new(Relay::new(&config.backend)?),
            resolver: Arc::new(TerminalIdResolver::new(
                config.terminal.terminal_dir(),
                TERMINAL_FILE_EXTENSION,
            )),
        };

        let router = Self::build_router(state, origin);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, origin: HeaderValue) -> Router {
        Router::new()
            .route(TERMINAL_ID_PATH, any(terminal_id_handler))
            .fallback(relay_handler)
            .with_state(state)
            .layer(allow_origin_layer(origin))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once `shutdown` resolves and in-flight requests have finished.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");
        tracing::info!(
            "Serving the currently configured terminal ID on http://{}{}",
            addr,
            TERMINAL_ID_PATH
        );
        tracing::info!(
            "Forwarding calls originating from {} through http://{} to {}",
            self.config.cors.origin,
            addr,
            self.config.backend.base_url
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received, draining requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::{header, Method, StatusCode};
    use std::fs;
    use tower::ServiceExt;

    fn server_for(install_dir: &std::path::Path) -> HttpServer {
        let mut config = RelayConfig::default();
        config.cors.origin = "https://pos.example".into();
        // Nothing listens here; anything reaching the backend fails.
        config.backend.base_url = "http://127.0.0.1:1".into();
        config.terminal.install_dir = install_dir.to_path_buf();
        HttpServer::new(config).unwrap()
    }

    #[tokio::test]
    async fn terminal_id_is_served_with_origin() {
        let install = tempfile::tempdir().unwrap();
        let emv = install.path().join("EMV");
        fs::create_dir(&emv).unwrap();
        fs::write(emv.join("lane.EMVTERM"), "header\nversion\nTERM123\n").unwrap();

        let response = server_for(install.path())
            .router()
            .oneshot(Request::get("/terminalId").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://pos.example"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, "TERM123".as_bytes());
    }

    #[tokio::test]
    async fn terminal_id_failure_is_500_with_message() {
        let install = tempfile::tempdir().unwrap();

        let response = server_for(install.path())
            .router()
            .oneshot(Request::post("/terminalId").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://pos.example"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("failed to read directory"), "{text}");
    }

    #[tokio::test]
    async fn preflight_on_any_path() {
        let install = tempfile::tempdir().unwrap();
        let server = server_for(install.path());

        for path in ["/api/rest/v1/transactions/sale", "/terminalId", "/"] {
            let request = Request::builder()
                .method(Method::OPTIONS)
                .uri(path)
                .body(Body::empty())
                .unwrap();
            let response = server.router().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{path}");
            let headers = response.headers();
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://pos.example");
            assert_eq!(headers["access-control-allow-method"], "*");
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "*");
            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_500() {
        let install = tempfile::tempdir().unwrap();

        let response = server_for(install.path())
            .router()
            .oneshot(Request::get("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response
                .headers()
                .get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .iter()
                .count(),
            1
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!body.is_empty());
    }

    #[test]
    fn rejects_invalid_origin() {
        let mut config = RelayConfig::default();
        config.cors.origin = "bad\r\norigin".into();
        assert!(matches!(HttpServer::new(config), Err(BuildError::Origin(_))));
    }
}
