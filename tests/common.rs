//! Mock backend shared by the integration tests.
//!
//! [`MockBackend`] is an axum server on a random local port. Every request is
//! recorded, then answered by the first route whose method and path match;
//! unmatched requests get a 404 with a JSON message. Routes are closures so a
//! test can keep state between calls (e.g. a reservation that becomes
//! approved after `PUT .../approve`).

#![allow(dead_code)]

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

use cabinet::api::ApiClient;
use cabinet::config::ApiConfig;
use cabinet::models::{Id, Role, UserProfile};
use cabinet::session::Session;

/// Path prefix the backend is mounted under.
pub const API_PREFIX: &str = "/api";

/// Token attached by [`MockBackend::client_as`].
pub const TEST_TOKEN: &str = "test-token";

/// A request as the backend saw it, with the `/api` prefix removed.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

enum Reply {
    Json(StatusCode, Value),
    Raw {
        content_type: &'static str,
        body: Vec<u8>,
    },
}

type Responder = Arc<dyn Fn(&RecordedRequest) -> Reply + Send + Sync>;

struct Route {
    method: Method,
    path: String,
    responder: Responder,
}

#[derive(Clone, Default)]
struct Shared {
    routes: Arc<Mutex<Vec<Route>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Builder for [`MockBackend`].
#[derive(Default)]
pub struct MockBackendBuilder {
    routes: Vec<Route>,
}

impl MockBackendBuilder {
    /// Answer `method path` with whatever `responder` returns.
    pub fn route<F>(mut self, method: Method, path: &str, responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            responder: Arc::new(move |req: &RecordedRequest| {
                let (status, body) = responder(req);
                Reply::Json(status, body)
            }),
        });
        self
    }

    /// Answer `GET path` with 200 and raw bytes, for file downloads.
    pub fn raw(mut self, path: &str, content_type: &'static str, body: &[u8]) -> Self {
        let body = body.to_vec();
        self.routes.push(Route {
            method: Method::GET,
            path: path.to_string(),
            responder: Arc::new(move |_: &RecordedRequest| Reply::Raw {
                content_type,
                body: body.clone(),
            }),
        });
        self
    }

    /// Answer `method path` with a fixed status and JSON body.
    pub fn json(self, method: Method, path: &str, status: StatusCode, body: Value) -> Self {
        self.route(method, path, move |_| (status, body.clone()))
    }

    /// Answer `GET path` with 200 and `body`.
    pub fn get(self, path: &str, body: Value) -> Self {
        self.json(Method::GET, path, StatusCode::OK, body)
    }

    pub async fn start(self) -> std::io::Result<MockBackend> {
        let shared = Shared {
            routes: Arc::new(Mutex::new(self.routes)),
            requests: Arc::default(),
        };

        let app = Router::new().fallback(handle).with_state(shared.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(MockBackend {
            base_url: format!("http://{addr}{API_PREFIX}"),
            shared,
            task,
        })
    }
}

async fn handle(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or(uri.path())
        .to_string();
    let request = RecordedRequest {
        method,
        path,
        query: uri.query().map(str::to_string),
        headers,
        body,
    };
    shared.requests.lock().unwrap().push(request.clone());

    let responder = shared
        .routes
        .lock()
        .unwrap()
        .iter()
        .find(|r| r.method == request.method && r.path == request.path)
        .map(|r| r.responder.clone());

    let reply = match responder {
        Some(responder) => responder(&request),
        None => Reply::Json(
            StatusCode::NOT_FOUND,
            json!({"message": format!("No route for {} {}", request.method, request.path)}),
        ),
    };
    match reply {
        Reply::Json(status, body) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response(),
        Reply::Raw { content_type, body } => {
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
        },
    }
}

/// A running mock backend. The server stops when this is dropped.
pub struct MockBackend {
    base_url: String,
    shared: Shared,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl MockBackend {
    pub fn builder() -> MockBackendBuilder {
        MockBackendBuilder::default()
    }

    /// Base URL including the `/api` prefix.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Server root, without the `/api` prefix.
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches(API_PREFIX)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// Requests matching a method and path.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Anonymous client.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ApiConfig::with_base_url(self.base_url.clone()))
            .expect("Failed to create client")
    }

    /// Client signed in as user `1` with `role`.
    pub fn client_as(&self, role: Role) -> ApiClient {
        self.client()
            .with_session(Session::new(TEST_TOKEN, Some(test_user(role))))
    }
}

pub fn test_user(role: Role) -> UserProfile {
    UserProfile {
        id: Id::new("1"),
        email: "claire@cabinet.fr".into(),
        nom: Some("Moreau".into()),
        prenom: Some("Claire".into()),
        role,
    }
}
