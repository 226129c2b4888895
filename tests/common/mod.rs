#![allow(dead_code)]

//! Stub paste provider for integration tests.
//!
//! Serves every path with one canned status and body on an auto-assigned
//! local port, recording each request so tests can inspect what a backend
//! sent. Bodies are handled as raw bytes in both directions.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::Router;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    /// Decoded form fields for POST, query parameters for GET.
    pub fields: HashMap<String, Vec<u8>>,
}

impl Recorded {
    /// A field as text; panics if it was not sent.
    pub fn field(&self, name: &str) -> String {
        String::from_utf8_lossy(self.field_bytes(name)).into_owned()
    }

    pub fn field_bytes(&self, name: &str) -> &[u8] {
        self.fields
            .get(name)
            .unwrap_or_else(|| panic!("field {name} missing from {:?}", self.fields.keys()))
    }
}

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: Bytes,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl StubServer {
    /// Start a server answering every request with `status` and `body`.
    /// `{base}` in the body is replaced with the server's own base URL, so
    /// a stub can answer with links that point back at itself.
    pub fn start(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::spawn(status, move |base| {
            body.replace("{base}", base).into_bytes()
        })
    }

    /// Start a server answering with `body` exactly as given.
    pub fn start_bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self::spawn(status, move |_| body)
    }

    fn spawn<F>(status: u16, make_body: F) -> Self
    where
        F: FnOnce(&str) -> Vec<u8> + Send + 'static,
    {
        let status = StatusCode::from_u16(status).expect("valid status");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (ready_tx, ready_rx) = mpsc::channel();

        let thread = thread::Builder::new()
            .name("stub-paste-server".into())
            .spawn(move || {
                let rt = tokio::runtime::Builder::new_multi_thread()
                    .worker_threads(1)
                    .enable_all()
                    .build()
                    .expect("runtime");
                rt.block_on(async move {
                    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                        .await
                        .expect("bind stub server");
                    let addr = listener.local_addr().expect("local addr");
                    let stub = Stub {
                        status,
                        body: Bytes::from(make_body(&format!("http://{addr}"))),
                        requests: recorded,
                    };
                    ready_tx.send(addr).expect("report address");
                    let app = Router::new().fallback(record).with_state(stub);
                    axum::serve(listener, app)
                        .with_graceful_shutdown(async {
                            let _ = shutdown_rx.await;
                        })
                        .await
                        .expect("serve stub");
                });
            })
            .expect("spawn stub server");

        let addr = ready_rx.recv().expect("stub server address");
        StubServer {
            addr,
            requests,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    /// Base URL to hand to a backend config, e.g. `http://127.0.0.1:4321`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// The only request received; panics if there were none or several.
    pub fn single_request(&self) -> Recorded {
        let mut requests = self.requests();
        assert_eq!(requests.len(), 1, "expected one request, got {requests:?}");
        requests.remove(0)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

async fn record(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> (StatusCode, Bytes) {
    let encoded: &[u8] = if method == Method::GET {
        uri.query().unwrap_or_default().as_bytes()
    } else {
        &body
    };
    stub.requests
        .lock()
        .expect("requests lock")
        .push(Recorded {
            method,
            path: uri.path().to_string(),
            fields: decode_form(encoded),
        });
    (stub.status, stub.body.clone())
}

/// Decode `application/x-www-form-urlencoded` without assuming UTF-8.
fn decode_form(encoded: &[u8]) -> HashMap<String, Vec<u8>> {
    encoded
        .split(|b| *b == b'&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut parts = pair.splitn(2, |b| *b == b'=');
            let name = decode_component(parts.next().unwrap_or_default());
            let value = decode_component(parts.next().unwrap_or_default());
            (String::from_utf8_lossy(&name).into_owned(), value)
        })
        .collect()
}

fn decode_component(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|b| if *b == b'+' { b' ' } else { *b })
        .collect();
    urlencoding::decode_binary(&spaced).into_owned()
}

/// A local address nothing is listening on.
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
