//! Dev server over the build root
//!
//! HTTP/1 via `hyper`, one task per connection on a dedicated `tokio`
//! runtime thread so the synchronous watcher loop is unaffected.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::error::{PipelineError, PipelineResult};

use super::live_reload::LiveReload;
use super::static_files::{self, StaticFileError};

/// Long-poll endpoint the injected client script talks to
pub const RELOAD_PATH: &str = "/__assetpipe/reload";

/// Longest a reload poll is held open
const POLL_TIMEOUT: Duration = Duration::from_secs(30);

const CLIENT_SCRIPT: &str = r#"<script>(function(){var v=__VERSION__;function poll(){fetch('/__assetpipe/reload?since='+v).then(function(r){return r.json();}).then(function(m){if(m.version>v){v=m.version;if(m.kind==='css'){document.querySelectorAll('link[rel="stylesheet"]').forEach(function(l){var u=new URL(l.href);u.searchParams.set('_r',v);l.href=u.toString();});}else{location.reload();return;}}poll();}).catch(function(){setTimeout(poll,1000);});}poll();})();</script>"#;

struct ServerState {
    root: PathBuf,
    reload: LiveReload,
}

/// Static file server with live reload
#[derive(Debug, Clone)]
pub struct DevServer {
    root: PathBuf,
    addr: SocketAddr,
    reload: LiveReload,
}

/// Running server; dropping it stops the server
#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl DevServer {
    pub fn new(root: PathBuf, addr: SocketAddr, reload: LiveReload) -> Self {
        Self { root, addr, reload }
    }

    /// Bind the listener and start serving in the background.
    ///
    /// Binding happens on the calling thread so address errors surface here.
    pub fn spawn(self) -> PipelineResult<ServerHandle> {
        let std_listener =
            std::net::TcpListener::bind(self.addr).map_err(|e| PipelineError::Server {
                message: format!("cannot bind {}: {}", self.addr, e),
            })?;
        std_listener
            .set_nonblocking(true)
            .map_err(|e| PipelineError::io(&self.root, e))?;
        let addr = std_listener
            .local_addr()
            .map_err(|e| PipelineError::io(&self.root, e))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("assetpipe-server")
            .build()
            .map_err(|e| PipelineError::Server {
                message: format!("cannot start runtime: {}", e),
            })?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let state = Arc::new(ServerState {
            root: self.root,
            reload: self.reload,
        });

        let thread = std::thread::Builder::new()
            .name("assetpipe-server".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    match TcpListener::from_std(std_listener) {
                        Ok(listener) => serve(listener, state, shutdown_rx).await,
                        Err(e) => tracing::error!(error = %e, "dev server listener failed"),
                    }
                });
            })
            .map_err(|e| PipelineError::Server {
                message: format!("cannot spawn server thread: {}", e),
            })?;

        tracing::info!(%addr, "dev server listening");
        Ok(ServerHandle {
            addr,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        })
    }
}

impl ServerHandle {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Stop accepting connections and wait for the server thread
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn serve(listener: TcpListener, state: Arc<ServerState>, mut shutdown: oneshot::Receiver<()>) {
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::debug!("dev server shutting down");
                break;
            }
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!(error = %e, "accept failed");
                        continue;
                    }
                };
                let state = state.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req| {
                        let state = state.clone();
                        async move { handle(req, state).await }
                    });
                    if let Err(e) = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await
                    {
                        tracing::debug!(%peer, error = %e, "connection closed with error");
                    }
                });
            }
        }
    }
}

async fn handle(
    req: Request<Incoming>,
    state: Arc<ServerState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return Ok(text(StatusCode::METHOD_NOT_ALLOWED, "method not allowed"));
    }

    let path = req.uri().path().to_string();
    if path == RELOAD_PATH {
        let since = parse_since(req.uri().query());
        return Ok(poll_reload(&state.reload, since).await);
    }

    Ok(serve_file(&state, &path).await)
}

async fn serve_file(state: &ServerState, path: &str) -> Response<Full<Bytes>> {
    let file = match static_files::resolve(&state.root, path) {
        Ok(file) => file,
        Err(StaticFileError::NotFound(_)) => return text(StatusCode::NOT_FOUND, "not found"),
        Err(StaticFileError::PathTraversal(_)) => return text(StatusCode::FORBIDDEN, "forbidden"),
        Err(StaticFileError::InvalidPath(_)) => return text(StatusCode::BAD_REQUEST, "bad request"),
    };

    let body = match tokio::fs::read(&file.path).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(path = %file.path.display(), error = %e, "read failed");
            return text(StatusCode::NOT_FOUND, "not found");
        }
    };

    let body = if file.is_html() {
        Bytes::from(inject_client(&String::from_utf8_lossy(&body), state.reload.version()))
    } else {
        Bytes::from(body)
    };

    response(StatusCode::OK, file.content_type, body)
}

async fn poll_reload(reload: &LiveReload, since: u64) -> Response<Full<Bytes>> {
    let mut rx = reload.subscribe();
    let deadline = tokio::time::Instant::now() + POLL_TIMEOUT;

    loop {
        let current = *rx.borrow_and_update();
        if current.version > since {
            return json(&current);
        }
        match tokio::time::timeout_at(deadline, rx.changed()).await {
            Ok(Ok(())) => continue,
            // Timed out or channel closed: report what we have
            _ => return json(&*rx.borrow()),
        }
    }
}

/// Insert the live-reload client before `</body>`, or append it
pub fn inject_client(html: &str, version: u64) -> String {
    let script = CLIENT_SCRIPT.replace("__VERSION__", &version.to_string());
    match html.rfind("</body>") {
        Some(idx) => {
            let mut out = String::with_capacity(html.len() + script.len());
            out.push_str(&html[..idx]);
            out.push_str(&script);
            out.push_str(&html[idx..]);
            out
        }
        None => format!("{}{}", html, script),
    }
}

fn parse_since(query: Option<&str>) -> u64 {
    query
        .unwrap_or("")
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "since")
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or(0)
}

fn json<T: serde::Serialize>(value: &T) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(value).unwrap_or_else(|_| b"{}".to_vec());
    response(StatusCode::OK, "application/json", Bytes::from(body))
}

fn text(status: StatusCode, message: &'static str) -> Response<Full<Bytes>> {
    response(status, "text/plain; charset=utf-8", Bytes::from_static(message.as_bytes()))
}

fn response(status: StatusCode, content_type: &'static str, body: Bytes) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(body));
    *resp.status_mut() = status;
    let headers = resp.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    resp
}
