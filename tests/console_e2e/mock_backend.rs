//! Mock backend for E2E tests.
//!
//! Starts an in-process HTTP server with canned per-endpoint responses
//! and records every request it receives.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::Value;

/// A canned response for one endpoint.
#[derive(Clone)]
pub enum Canned {
    /// JSON body with a status code
    Json(u16, Value),
    /// Opaque bytes with a status code (CSV export)
    Bytes(u16, Vec<u8>),
    /// Non-JSON body with a status code (malformed error shape)
    Raw(u16, String),
}

/// Shared state for the mock backend.
pub struct MockState {
    /// Requests seen, as "METHOD /path[?query]"
    pub calls: Mutex<Vec<String>>,
    /// Canned responses keyed by "METHOD /path" (query excluded)
    pub responses: Mutex<HashMap<String, Canned>>,
}

async fn dispatch(req: HttpRequest, state: web::Data<Arc<MockState>>) -> HttpResponse {
    let key = format!("{} {}", req.method(), req.path());
    let recorded = match req.query_string() {
        "" => key.clone(),
        q => format!("{}?{}", key, q),
    };
    state.calls.lock().unwrap().push(recorded);

    let canned = state.responses.lock().unwrap().get(&key).cloned();
    match canned {
        Some(Canned::Json(status, body)) => {
            HttpResponse::build(StatusCode::from_u16(status).unwrap()).json(body)
        }
        Some(Canned::Bytes(status, bytes)) => {
            HttpResponse::build(StatusCode::from_u16(status).unwrap())
                .content_type("text/csv")
                .body(bytes)
        }
        Some(Canned::Raw(status, text)) => {
            HttpResponse::build(StatusCode::from_u16(status).unwrap())
                .content_type("text/plain")
                .body(text)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({
            "error": "NOT_FOUND",
            "message": format!("no canned response for {}", key)
        })),
    }
}

/// In-process mock backend.
pub struct MockBackend {
    /// Base URL including the `/api` prefix
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    /// Start the mock backend on an ephemeral port.
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(HashMap::new()),
        });

        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind");
        let port = listener.local_addr().unwrap().port();
        let base_url = format!("http://127.0.0.1:{}/api", port);

        let state_data = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state_data.clone()))
                .default_service(web::route().to(dispatch))
        })
        .listen(listener)
        .expect("failed to listen")
        .disable_signals()
        .run();

        // Fire and forget — server lives for the process lifetime
        tokio::spawn(server);

        MockBackend { base_url, state }
    }

    /// Stub a JSON response. Path is relative to the API base ("/suites").
    pub fn stub_json(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state.responses.lock().unwrap().insert(
            format!("{} /api{}", method, path),
            Canned::Json(status, body),
        );
    }

    /// Stub a binary response.
    pub fn stub_bytes(&self, method: &str, path: &str, status: u16, bytes: Vec<u8>) {
        self.state.responses.lock().unwrap().insert(
            format!("{} /api{}", method, path),
            Canned::Bytes(status, bytes),
        );
    }

    /// Stub a non-JSON body (malformed error shape).
    pub fn stub_raw(&self, method: &str, path: &str, status: u16, text: &str) {
        self.state.responses.lock().unwrap().insert(
            format!("{} /api{}", method, path),
            Canned::Raw(status, text.to_string()),
        );
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<String> {
        self.state.calls.lock().unwrap().clone()
    }

    /// How many recorded calls start with the given prefix.
    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}
