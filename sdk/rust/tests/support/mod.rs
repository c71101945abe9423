//! In-process mock of the Appello HTTP API.
//!
//! Replies are queued per path and served first-in first-out; every request
//! is recorded for later inspection. Unqueued paths answer 404.

#![allow(dead_code)]

use appello_sdk::{AppelloClient, ClientConfig};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A canned HTTP reply.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub body: String,
}

impl MockReply {
    pub fn json(body: Value) -> Self {
        Self::status(200, body.to_string())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `{ "token": ... }`
    pub fn token(token: &str) -> Self {
        Self::json(json!({ "token": token }))
    }

    /// `{ "data": ... }`
    pub fn data(data: Value) -> Self {
        Self::json(json!({ "data": data }))
    }
}

/// A request as seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub token: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Returns the GraphQL variables of the request body.
    pub fn variables(&self) -> &Value {
        &self.body.as_ref().expect("request has a JSON body")["variables"]
    }

    /// Returns the GraphQL query text of the request body.
    pub fn query(&self) -> &str {
        self.body.as_ref().expect("request has a JSON body")["query"]
            .as_str()
            .expect("query is a string")
    }
}

#[derive(Default)]
struct State {
    routes: HashMap<String, VecDeque<MockReply>>,
    requests: Vec<RecordedRequest>,
}

pub struct MockServer {
    addr: SocketAddr,
    state: Arc<Mutex<State>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let state = Arc::new(Mutex::new(State::default()));

        let server_state = state.clone();
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let io = TokioIo::new(stream);
                let state = server_state.clone();

                tokio::spawn(async move {
                    let service = service_fn(move |req| respond(state.clone(), req));
                    let _ = http1::Builder::new().serve_connection(io, service).await;
                });
            }
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client config pointing at this server with key `K` and secret `S`.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.url(), "K", "S")
            .timeout(Duration::from_secs(5))
            .system_proxy(false)
    }

    pub fn client(&self) -> AppelloClient {
        AppelloClient::new(self.config()).expect("client for mock server")
    }

    /// Client already logged in with the user token `user-tok`.
    pub async fn authenticated_client(&self) -> AppelloClient {
        self.enqueue("/authenticate", MockReply::token("app-tok"));
        self.enqueue(
            "/graphql",
            MockReply::data(json!({ "authenticateUser": "user-tok" })),
        );
        AppelloClient::connect(self.config(), "alice", "secret")
            .await
            .expect("mock login succeeds")
    }

    pub fn enqueue(&self, path: &str, reply: MockReply) {
        self.state
            .lock()
            .unwrap()
            .routes
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn last_request_to(&self, path: &str) -> RecordedRequest {
        self.requests_to(path)
            .pop()
            .unwrap_or_else(|| panic!("no request to {path}"))
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn respond(
    state: Arc<Mutex<State>>,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let body_bytes = body
        .collect()
        .await
        .map(|c| c.to_bytes())
        .unwrap_or_default();

    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let recorded = RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        token: header("token"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&body_bytes).ok(),
    };

    let reply = {
        let mut state = state.lock().unwrap();
        let reply = state
            .routes
            .get_mut(&recorded.path)
            .and_then(VecDeque::pop_front);
        state.requests.push(recorded);
        reply
    };
    let reply = reply.unwrap_or_else(|| MockReply::status(404, r#"{"error":"Not Found"}"#));

    let response = Response::builder()
        .status(StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR))
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(reply.body)))
        .unwrap();

    Ok(response)
}
