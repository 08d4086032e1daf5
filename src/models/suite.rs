//! Test suite model: a named collection of test cases with an aggregate
//! execution status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate execution status of a suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SuiteStatus {
    Pending,
    Running,
    Passed,
    Failed,
    Completed,
}

impl std::fmt::Display for SuiteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Completed => "COMPLETED",
        };
        f.pad(s)
    }
}

/// A single test case inside a suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Summary of the identity that created a suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySummary {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A test suite as reported by the backend.
///
/// The backend owns this record; the client holds a read-mostly cached
/// copy and never infers status changes locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suite {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: SuiteStatus,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<IdentitySummary>,
}

/// Payload for creating a suite via the manual-entry flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSuiteRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub test_cases: Vec<NewTestCase>,
}

/// A test case in a creation payload (no id yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestCase {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
