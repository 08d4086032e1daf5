//! Execution orchestration: trigger a suite run and reflect the result.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::notify::Notifier;
use crate::services::suites::SuiteRepository;

/// Triggers suite execution and keeps the suite list current.
pub struct ExecutionOrchestrator {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl ExecutionOrchestrator {
    /// Create an orchestrator.
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        ExecutionOrchestrator { api, notifier }
    }

    /// Execute a suite.
    ///
    /// On success the backend returns the run identifier synchronously;
    /// the run itself proceeds asynchronously and is not polled. The
    /// user is notified with the identifier and the suite list is
    /// re-fetched so its `status` reflects eventual completion on the
    /// next load. On failure the user is notified and local state is
    /// left untouched.
    ///
    /// Two rapid calls issue two independent execution requests; there
    /// is no deduplication or debouncing.
    pub async fn execute_suite(
        &self,
        suite_id: i64,
        suites: &mut SuiteRepository,
    ) -> ClientResult<String> {
        match self.api.execute_suite(suite_id).await {
            Ok(response) => {
                info!(suite_id, run_id = %response.test_run_id, "suite execution started");
                self.notifier.notify(&format!(
                    "Suite execution started! Test Run ID: {}",
                    response.test_run_id
                ));
                suites.refresh().await;
                Ok(response.test_run_id)
            }
            Err(e) => {
                warn!(suite_id, error = %e, "suite execution failed");
                self.notifier
                    .notify(&format!("Failed to execute suite: {}", e.user_message()));
                Err(e)
            }
        }
    }
}
