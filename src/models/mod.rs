//! Domain models for the admin console.

pub mod analytics;
pub mod report;
pub mod run;
pub mod suite;

// Re-export commonly used types
pub use analytics::{
    AnalyticsSummary, DashboardSummary, FlakyTest, FlakyTests, PersonalStats, SuiteAnalytics,
    TrendPoint, TrendSeries,
};
pub use report::{ReportResponse, RunReportResponse};
pub use run::{ExecuteResponse, RunStatus, TestRun};
pub use suite::{CreateSuiteRequest, IdentitySummary, NewTestCase, Suite, SuiteStatus, TestCase};
