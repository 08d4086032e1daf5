//! Shared test helpers for console E2E tests.

use std::net::TcpListener;
use std::path::Path;
use std::sync::{Arc, Mutex};

use secrecy::SecretString;
use serde_json::{Value, json};

use testframe_admin_lib::api::ApiClient;
use testframe_admin_lib::config::{Config, Environment, MetricsErrorPolicy};
use testframe_admin_lib::notify::Notifier;
use testframe_admin_lib::session::{ADMIN_ROLE, BASE_ROLE, Identity, SessionContext};

use super::mock_backend::MockBackend;

/// Bearer token used in tests.
pub const TEST_TOKEN: &str = "test-bearer-token";

/// Build a config pointing at the given backend.
pub fn test_config(base_url: &str, download_dir: &Path) -> Config {
    Config {
        environment: Environment::Development,
        api_base_url: base_url.to_string(),
        download_dir: download_dir.to_path_buf(),
        connect_timeout_secs: Some(5),
        request_timeout_secs: Some(10),
        metrics_error_policy: MetricsErrorPolicy::default(),
    }
}

/// A non-administrator session.
pub fn user_session() -> SessionContext {
    SessionContext::new(
        Identity::new("maria", "maria@example.com", vec![BASE_ROLE.to_string()]),
        SecretString::from(TEST_TOKEN.to_string()),
    )
}

/// An administrator session.
pub fn admin_session() -> SessionContext {
    SessionContext::new(
        Identity::new(
            "admin",
            "admin@example.com",
            vec![ADMIN_ROLE.to_string(), BASE_ROLE.to_string()],
        ),
        SecretString::from(TEST_TOKEN.to_string()),
    )
}

/// Build a client bound to the mock backend.
pub fn client_for(mock: &MockBackend, session: SessionContext, download_dir: &Path) -> ApiClient {
    let config = test_config(&mock.base_url, download_dir);
    ApiClient::new(&config, session).expect("failed to build client")
}

/// Build a client pointing at a port nothing listens on (network error).
pub fn unreachable_client(session: SessionContext, download_dir: &Path) -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let config = test_config(&format!("http://127.0.0.1:{}/api", port), download_dir);
    ApiClient::new(&config, session).expect("failed to build client")
}

/// Recording notifier for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<String>>,
    pub opened: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.notifications.lock().unwrap().push(message.to_string());
    }

    fn open_viewer(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

/// A one-suite listing body in the backend's wire shape.
pub fn suite_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Suite {}", id),
        "description": "E2E fixture",
        "status": status,
        "testCases": [{"id": 1, "name": "first case"}],
        "createdAt": "2026-07-01T08:30:00Z"
    })
}
