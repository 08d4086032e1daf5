//! Report and export gateway.
//!
//! Requests report generation, resolves the viewable report location,
//! and downloads CSV artifacts. Domain failures are classified from the
//! structured error body so the branching stays stable if backend
//! wording changes.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult, DomainCode};
use crate::notify::Notifier;

/// Corrective instruction for a suite that has never been executed.
pub const NOT_EXECUTED_MESSAGE: &str =
    "Suite has not been executed yet. Execute the suite first, then generate the report.";

/// Fallback shown when report generation succeeds with no message.
const REPORT_GENERATED_MESSAGE: &str = "Report generated successfully!";

/// The viewable report location for a suite. Client-constructed; the
/// backend serves the artifact at this fixed pattern.
pub fn suite_report_url(suite_id: i64) -> String {
    format!("/reports/suite-{}/suite-report.html", suite_id)
}

/// Deterministic local filename for an exported CSV.
pub fn csv_filename(suite_id: i64) -> String {
    format!("suite-{}-report.csv", suite_id)
}

/// Outcome of a report generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// A report exists; its viewer URL was opened
    Viewer { url: String },
    /// The backend reported an outcome message instead of an artifact
    Message(String),
    /// The suite has never been executed
    NotExecuted,
    /// Any other failure
    Failed(String),
}

/// Gateway for report generation and CSV export.
pub struct ReportGateway {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    download_dir: PathBuf,
}

impl ReportGateway {
    /// Create a gateway saving downloads under the given directory.
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>, download_dir: impl Into<PathBuf>) -> Self {
        ReportGateway {
            api,
            notifier,
            download_dir: download_dir.into(),
        }
    }

    /// Request report generation for a suite and present the outcome.
    ///
    /// Variants, in order of inspection:
    /// - a `reportPath` in the response resolves to the fixed viewer URL
    ///   and opens it;
    /// - a `message` (or neither field) is shown as the outcome;
    /// - the "Suite not executed" domain code gets the corrective
    ///   instruction, distinct from generic failures;
    /// - anything else is shown with the backend message when available.
    pub async fn generate_report(&self, suite_id: i64) -> ReportOutcome {
        match self.api.suite_report(suite_id).await {
            Ok(response) => {
                if response.report_path.is_some() {
                    let url = suite_report_url(suite_id);
                    info!(suite_id, url = %url, "opening suite report");
                    self.notifier.open_viewer(&url);
                    ReportOutcome::Viewer { url }
                } else {
                    let message = response
                        .message
                        .unwrap_or_else(|| REPORT_GENERATED_MESSAGE.to_string());
                    self.notifier.notify(&message);
                    ReportOutcome::Message(message)
                }
            }
            Err(e) => match e.domain_code() {
                DomainCode::SuiteNotExecuted => {
                    info!(suite_id, "report requested for unexecuted suite");
                    self.notifier.notify(NOT_EXECUTED_MESSAGE);
                    ReportOutcome::NotExecuted
                }
                DomainCode::Other => {
                    warn!(suite_id, error = %e, "report generation failed");
                    let message = format!("Failed to generate report: {}", e.user_message());
                    self.notifier.notify(&message);
                    ReportOutcome::Failed(message)
                }
            },
        }
    }

    /// Download the CSV artifact for a suite.
    ///
    /// A non-success response is presented as its structured message and
    /// nothing touches the filesystem. On success the body is opaque
    /// bytes, written through a scoped temp file and persisted as
    /// `suite-<id>-report.csv`; the temp handle never outlives the call.
    pub async fn export_csv(&self, suite_id: i64) -> ClientResult<PathBuf> {
        let bytes = match self.api.export_suite_csv(suite_id).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(suite_id, error = %e, "CSV export failed");
                self.notifier
                    .notify(&format!("Failed to export CSV: {}", e.user_message()));
                return Err(e);
            }
        };

        match save_download(&self.download_dir, suite_id, &bytes) {
            Ok(path) => {
                info!(suite_id, path = %path.display(), "CSV saved");
                self.notifier
                    .notify(&format!("CSV saved to {}", path.display()));
                Ok(path)
            }
            Err(e) => {
                warn!(suite_id, error = %e, "CSV download could not be saved");
                self.notifier
                    .notify(&format!("Failed to export CSV: {}", e.user_message()));
                Err(e)
            }
        }
    }

    /// Request a run report and open the returned URL directly.
    pub async fn open_run_report(&self, run_id: &str) -> ClientResult<String> {
        match self.api.run_report(run_id).await {
            Ok(response) => {
                info!(run_id, url = %response.url, "opening run report");
                self.notifier.open_viewer(&response.url);
                Ok(response.url)
            }
            Err(e) => {
                warn!(run_id, error = %e, "run report failed");
                self.notifier
                    .notify(&format!("Failed to generate report: {}", e.user_message()));
                Err(e)
            }
        }
    }
}

/// Materialize downloaded bytes under their final name.
fn save_download(dir: &Path, suite_id: i64, bytes: &[u8]) -> ClientResult<PathBuf> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    let path = dir.join(csv_filename(suite_id));
    tmp.persist(&path)
        .map_err(|e| ClientError::Download(e.to_string()))?;
    Ok(path)
}
