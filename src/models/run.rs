//! Test run model: one execution instance of a suite.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    Pending,
    Running,
    Passed,
    Failed,
}

/// A test run as reported by the backend.
///
/// The client never constructs one locally; runs exist only as the
/// backend reports them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    pub id: String,
    pub name: String,
    pub status: RunStatus,
    /// Worker threads the run was parallelized across (at least 1)
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: u32,
    pub created_at: DateTime<Utc>,
}

fn default_parallel_threads() -> u32 {
    1
}

/// Response to an execution trigger: the identifier of the run the
/// backend started. The run itself proceeds asynchronously.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    pub test_run_id: String,
}
