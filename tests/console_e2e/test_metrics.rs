//! E2E tests: dashboard metrics and suite analytics.

use serde_json::json;

use testframe_admin_lib::config::MetricsErrorPolicy;
use testframe_admin_lib::models::DashboardSummary;
use testframe_admin_lib::policy::AccessPolicy;
use testframe_admin_lib::services::MetricsView;

use super::mock_backend::MockBackend;
use super::test_helpers::*;

/// Administrators read the global run metrics endpoint.
#[actix_rt::test]
async fn test_admin_reads_global_metrics() {
    let mock = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    mock.stub_json(
        "GET",
        "/runs/metrics",
        200,
        json!({
            "total": 250, "passed": 230, "failed": 20,
            "passRate": 92.0, "avgDurationMs": 512.3, "stability": 95.5
        }),
    );

    let session = admin_session();
    let policy = AccessPolicy::resolve(session.identity());
    let notifier = RecordingNotifier::new();
    let mut view = MetricsView::new(
        client_for(&mock, session, dir.path()),
        policy,
        MetricsErrorPolicy::SilentZeroFill,
        notifier,
    );

    let summary = view.fetch_dashboard_metrics().await;

    assert_eq!(summary.total, 250);
    assert_eq!(summary.stability, 95.5);
    assert_eq!(mock.call_count("GET /api/runs/metrics"), 1);
    assert_eq!(mock.call_count("GET /api/users/me/tests"), 0);
}

/// Non-administrators read personal stats, reshaped with zero-filled
/// duration and stability.
#[actix_rt::test]
async fn test_user_personal_stats_are_reshaped() {
    let mock = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    mock.stub_json(
        "GET",
        "/users/me/tests",
        200,
        json!({"totalTests": 10, "passedTests": 8, "failedTests": 2, "passRate": 80.0}),
    );

    let session = user_session();
    let policy = AccessPolicy::resolve(session.identity());
    let notifier = RecordingNotifier::new();
    let mut view = MetricsView::new(
        client_for(&mock, session, dir.path()),
        policy,
        MetricsErrorPolicy::SilentZeroFill,
        notifier,
    );

    let summary = view.fetch_dashboard_metrics().await;

    assert_eq!(
        summary,
        DashboardSummary {
            total: 10,
            passed: 8,
            failed: 2,
            pass_rate: 80.0,
            avg_duration_ms: 0.0,
            stability: 0.0,
        }
    );
    assert_eq!(mock.call_count("GET /api/runs/metrics"), 0);
}

/// A failed metrics fetch degrades to the all-zero summary, silently
/// under the default policy.
#[actix_rt::test]
async fn test_metrics_failure_zero_fills_silently() {
    let dir = tempfile::tempdir().unwrap();
    let session = user_session();
    let policy = AccessPolicy::resolve(session.identity());
    let notifier = RecordingNotifier::new();
    let mut view = MetricsView::new(
        unreachable_client(session, dir.path()),
        policy,
        MetricsErrorPolicy::SilentZeroFill,
        notifier.clone(),
    );

    let summary = view.fetch_dashboard_metrics().await;

    assert_eq!(summary, DashboardSummary::default());
    assert!(notifier.notifications().is_empty());
    assert_eq!(view.dashboard(), Some(&DashboardSummary::default()));
}

/// Under the notify policy the zero-fill is accompanied by a message.
#[actix_rt::test]
async fn test_metrics_failure_notifies_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let session = admin_session();
    let policy = AccessPolicy::resolve(session.identity());
    let notifier = RecordingNotifier::new();
    let mut view = MetricsView::new(
        unreachable_client(session, dir.path()),
        policy,
        MetricsErrorPolicy::Notify,
        notifier.clone(),
    );

    let summary = view.fetch_dashboard_metrics().await;

    assert_eq!(summary, DashboardSummary::default());
    assert_eq!(notifier.notifications().len(), 1);
}

/// Suite analytics are requested with the fixed 7-day window, and each
/// selection issues a fresh request.
#[actix_rt::test]
async fn test_analytics_window_and_no_caching() {
    let mock = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let body = json!({
        "summary": {
            "totalTests": 120, "passed": 110, "failed": 10,
            "passRate": 91.7, "avgDurationMs": 842.5, "stability": 88.0
        },
        "trends": {"data": [{"date": "2026-07-01", "passRate": 90.0}]},
        "flakyTests": {"count": 0, "tests": []}
    });
    mock.stub_json("GET", "/suites/42/analytics", 200, body.clone());
    mock.stub_json("GET", "/suites/43/analytics", 200, body);

    let session = user_session();
    let policy = AccessPolicy::resolve(session.identity());
    let notifier = RecordingNotifier::new();
    let mut view = MetricsView::new(
        client_for(&mock, session, dir.path()),
        policy,
        MetricsErrorPolicy::SilentZeroFill,
        notifier,
    );

    let analytics = view.fetch_suite_analytics(42).await.unwrap();
    assert_eq!(analytics.summary.total_tests, 120);

    // Selecting another suite, then the first again, re-fetches each
    // time; nothing is cached across selections.
    view.fetch_suite_analytics(43).await.unwrap();
    view.fetch_suite_analytics(42).await.unwrap();

    let calls = mock.calls();
    let analytics_calls: Vec<&String> = calls
        .iter()
        .filter(|c| c.contains("/analytics"))
        .collect();
    assert_eq!(analytics_calls.len(), 3);
    for call in analytics_calls {
        assert!(call.ends_with("?days=7"), "window must be 7 days: {}", call);
    }
}

/// A failed analytics fetch leaves the previous display state in place.
#[actix_rt::test]
async fn test_analytics_failure_keeps_previous_state() {
    let mock = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    mock.stub_json(
        "GET",
        "/suites/42/analytics",
        200,
        json!({
            "summary": {
                "totalTests": 5, "passed": 5, "failed": 0,
                "passRate": 100.0, "avgDurationMs": 10.0, "stability": 100.0
            },
            "trends": {"data": []},
            "flakyTests": {"count": 0, "tests": []}
        }),
    );
    mock.stub_json(
        "GET",
        "/suites/43/analytics",
        500,
        json!({"error": "ANALYTICS_DOWN", "message": "unavailable"}),
    );

    let session = user_session();
    let policy = AccessPolicy::resolve(session.identity());
    let notifier = RecordingNotifier::new();
    let mut view = MetricsView::new(
        client_for(&mock, session, dir.path()),
        policy,
        MetricsErrorPolicy::SilentZeroFill,
        notifier,
    );

    view.fetch_suite_analytics(42).await.unwrap();
    let after_failure = view.fetch_suite_analytics(43).await;

    // The failed fetch did not clear the panel; the prior suite's data
    // is still the committed value.
    assert_eq!(after_failure.unwrap().summary.total_tests, 5);
}
