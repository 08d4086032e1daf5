//! Report generation responses.

use serde::{Deserialize, Serialize};

/// Response to a suite report request.
///
/// Either `report_path` points at a generated artifact, or `message`
/// describes the outcome. Both absent means the backend had nothing to
/// say; the gateway treats that as a plain message outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response to a run report request: a URL opened directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    pub url: String,
}
