//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    response::Response,
    Router,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Notify};

use utg_relay::{RelayConfig, RelayHandle};

pub const ORIGIN: &str = "https://pos.example";

/// Start the relay on an ephemeral port in front of `base_url`.
#[allow(dead_code)]
pub async fn start_relay(base_url: &str, install_dir: Option<&std::path::Path>) -> RelayHandle {
    let mut config = RelayConfig::default();
    config.listener.listen_addr = "127.0.0.1:0".into();
    config.backend.base_url = base_url.to_string();
    config.cors.origin = ORIGIN.to_string();
    if let Some(dir) = install_dir {
        config.terminal.install_dir = dir.to_path_buf();
    }
    utg_relay::start(config).await.unwrap()
}

/// Client that talks to the relay directly, never through a proxy.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Read one request head so the peer is not reset when we answer.
async fn read_request_head(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

/// Start a backend that answers every request with `raw_head` and `body`,
/// counting the connections it receives.
///
/// `raw_head` holds the status line and headers without the final blank line.
#[allow(dead_code)]
pub async fn start_raw_backend(raw_head: &'static str, body: &'static str) -> (SocketAddr, Arc<AtomicU32>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(async move {
                        read_request_head(&mut socket).await;
                        let response = format!(
                            "{}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            raw_head,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, hits)
}

/// Start a programmable mock backend with async support.
///
/// The returned `Notify` fires each time a request head has been read, before
/// `f` runs, so a test can act while that request is known to be in flight.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, Arc<Notify>)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);
    let received = Arc::new(Notify::new());
    let notify = received.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let notify = notify.clone();
                    tokio::spawn(async move {
                        read_request_head(&mut socket).await;
                        notify.notify_one();
                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, received)
}

/// Send `GET <target>` to `addr` byte for byte and return the raw response.
///
/// HTTP clients normalize the request target; this does not.
#[allow(dead_code)]
pub async fn send_raw_get(addr: SocketAddr, target: &str) -> String {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {target} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    socket.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

/// What the echo backend saw for one request.
#[derive(Debug)]
#[allow(dead_code)]
pub struct Captured {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

/// Start a backend that records each request and echoes its body back.
///
/// `/status/<code>` answers with that status code.
#[allow(dead_code)]
pub async fn start_echo_backend() -> (SocketAddr, mpsc::UnboundedReceiver<Captured>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new().fallback(echo).with_state(tx);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, rx)
}

async fn echo(
    State(tx): State<mpsc::UnboundedSender<Captured>>,
    request: Request<Body>,
) -> Response {
    let (parts, body) = request.into_parts();
    let status = parts
        .uri
        .path()
        .strip_prefix("/status/")
        .and_then(|code| code.parse::<u16>().ok())
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);

    let _ = tx.send(Captured {
        method: parts.method,
        uri: parts.uri,
        headers: parts.headers,
    });

    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    response
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
