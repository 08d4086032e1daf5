//! Typed HTTP client for the backend API.
//!
//! One method per endpoint, all authenticated with the session's bearer
//! credential. Non-success statuses are parsed into the backend's
//! structured error body; a body that is not JSON degrades to an empty
//! one rather than failing the classification.
//!
//! No retries and no deduplication of rapid repeat calls: requests are
//! independent and fire-and-forget from the client's perspective.

use std::time::Duration;

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ClientError, ClientResult, ErrorBody};
use crate::models::{
    CreateSuiteRequest, DashboardSummary, ExecuteResponse, PersonalStats, ReportResponse,
    RunReportResponse, Suite, SuiteAnalytics, TestRun,
};
use crate::policy::ListingScope;
use crate::session::SessionContext;

/// Client for the backend API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// Build a client from configuration and the current session.
    ///
    /// Timeouts are applied only when configured; by default a hung
    /// request hangs (a documented gap, not an accident).
    pub fn new(config: &Config, session: SessionContext) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(ApiClient {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// The session this client is bound to.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.bearer_auth(self.session.token().expose_secret())
    }

    /// Map a non-success response to a structured API error.
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        // A non-JSON error body decodes to the empty default.
        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        warn!(
            status = status.as_u16(),
            error = body.error.as_deref().unwrap_or("-"),
            "backend returned error"
        );
        Err(ClientError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        debug!(path, "GET");
        let response = self.authorized(self.http.get(self.url(path))).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        debug!(path, "POST");
        let response = self
            .authorized(self.http.post(self.url(path)))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post_json_body<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(path, "POST");
        let response = self
            .authorized(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>> {
        debug!(path, "GET (binary)");
        let response = self.authorized(self.http.get(self.url(path))).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// List suites visible under the given scope.
    pub async fn list_suites(&self, scope: ListingScope) -> ClientResult<Vec<Suite>> {
        let path = match scope {
            ListingScope::All => "/suites",
            ListingScope::Own => "/suites/my-suites",
        };
        self.get_json(path).await
    }

    /// Create a suite (manual-entry payload).
    pub async fn create_suite(&self, request: &CreateSuiteRequest) -> ClientResult<Suite> {
        self.post_json_body("/suites", request).await
    }

    /// Trigger execution of a suite. Returns the run identifier; the run
    /// itself proceeds asynchronously on the backend.
    pub async fn execute_suite(&self, suite_id: i64) -> ClientResult<ExecuteResponse> {
        self.post_json(&format!("/suites/{}/execute", suite_id)).await
    }

    /// Request report generation for a suite.
    pub async fn suite_report(&self, suite_id: i64) -> ClientResult<ReportResponse> {
        self.get_json(&format!("/suites/{}/report", suite_id)).await
    }

    /// Fetch the CSV artifact for a suite as opaque bytes.
    pub async fn export_suite_csv(&self, suite_id: i64) -> ClientResult<Vec<u8>> {
        self.get_bytes(&format!("/suites/{}/export/csv", suite_id))
            .await
    }

    /// Global run metrics (administrator scope).
    pub async fn run_metrics(&self) -> ClientResult<DashboardSummary> {
        self.get_json("/runs/metrics").await
    }

    /// Caller-scoped test statistics (non-administrator scope).
    pub async fn my_test_stats(&self) -> ClientResult<PersonalStats> {
        self.get_json("/users/me/tests").await
    }

    /// List test runs.
    pub async fn list_runs(&self) -> ClientResult<Vec<TestRun>> {
        self.get_json("/runs").await
    }

    /// Request a run report; the returned URL is opened directly.
    pub async fn run_report(&self, run_id: &str) -> ClientResult<RunReportResponse> {
        self.post_json(&format!("/runs/{}/report", run_id)).await
    }

    /// Windowed analytics for one suite.
    pub async fn suite_analytics(
        &self,
        suite_id: i64,
        window_days: u32,
    ) -> ClientResult<SuiteAnalytics> {
        self.get_json(&format!("/suites/{}/analytics?days={}", suite_id, window_days))
            .await
    }
}
