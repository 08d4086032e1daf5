//! Analytics and dashboard metric models.
//!
//! All numbers here are backend-computed aggregates. The client never
//! derives pass rates or stability locally; it only reshapes between
//! the two summary shapes the backend exposes.

use serde::{Deserialize, Serialize};

/// Windowed per-suite analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteAnalytics {
    pub summary: AnalyticsSummary,
    pub trends: TrendSeries,
    pub flaky_tests: FlakyTests,
}

/// Aggregate pass/fail figures for one suite over the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_tests: u64,
    pub passed: u64,
    pub failed: u64,
    /// Percentage in 0-100
    pub pass_rate: f64,
    pub avg_duration_ms: f64,
    /// Percentage in 0-100
    pub stability: f64,
}

/// Chronological pass-rate trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeries {
    pub data: Vec<TrendPoint>,
}

/// One day's pass rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: String,
    pub pass_rate: f64,
}

/// Flaky-test listing for a suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlakyTests {
    pub count: u64,
    pub tests: Vec<FlakyTest>,
}

/// One flaky test with its backend-computed score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlakyTest {
    pub test_name: String,
    pub total_runs: u64,
    pub retry_count: u64,
    pub flaky_score: f64,
}

/// Personal test statistics from the caller-scoped endpoint.
///
/// Structurally different from [`DashboardSummary`]; the metrics view
/// reshapes it before rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalStats {
    pub total_tests: u64,
    pub passed_tests: u64,
    pub failed_tests: u64,
    pub pass_rate: f64,
}

/// Dashboard totals, the one shape the rendering layer understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub pass_rate: f64,
    pub avg_duration_ms: f64,
    pub stability: f64,
}

impl From<PersonalStats> for DashboardSummary {
    /// Reshape personal stats into the dashboard shape. The personal
    /// endpoint has no duration or stability figures; those render as
    /// zero.
    fn from(stats: PersonalStats) -> Self {
        DashboardSummary {
            total: stats.total_tests,
            passed: stats.passed_tests,
            failed: stats.failed_tests,
            pass_rate: stats.pass_rate,
            avg_duration_ms: 0.0,
            stability: 0.0,
        }
    }
}
