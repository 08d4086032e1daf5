//! Metrics aggregation view.
//!
//! Fetches pre-aggregated dashboard totals and per-suite analytics,
//! scoped by the resolved access policy. All aggregation happens on the
//! backend; this view only reshapes and degrades.

use std::sync::Arc;

use tracing::warn;

use crate::api::ApiClient;
use crate::config::MetricsErrorPolicy;
use crate::models::{DashboardSummary, SuiteAnalytics};
use crate::notify::Notifier;
use crate::policy::AccessPolicy;
use crate::services::view_state::FetchSlot;

/// Analytics window in days. Fixed; not user-adjustable.
pub const ANALYTICS_WINDOW_DAYS: u32 = 7;

/// Role-scoped dashboard and analytics state.
pub struct MetricsView {
    api: ApiClient,
    policy: AccessPolicy,
    error_policy: MetricsErrorPolicy,
    notifier: Arc<dyn Notifier>,
    dashboard: FetchSlot<DashboardSummary>,
    analytics: FetchSlot<SuiteAnalytics>,
}

impl MetricsView {
    /// Create a metrics view for the given policy.
    pub fn new(
        api: ApiClient,
        policy: AccessPolicy,
        error_policy: MetricsErrorPolicy,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        MetricsView {
            api,
            policy,
            error_policy,
            notifier,
            dashboard: FetchSlot::new(),
            analytics: FetchSlot::new(),
        }
    }

    /// Fetch dashboard totals for the current role.
    ///
    /// Administrators get the global run metrics; everyone else gets
    /// their personal stats reshaped into the same summary shape, with
    /// the fields the personal endpoint lacks rendered as zero. Any
    /// failure degrades to the all-zero summary so the view never hangs
    /// in a loading state.
    pub async fn fetch_dashboard_metrics(&mut self) -> DashboardSummary {
        let ticket = self.dashboard.begin();

        let result = if self.policy.is_admin() {
            self.api.run_metrics().await
        } else {
            self.api.my_test_stats().await.map(DashboardSummary::from)
        };

        let summary = match result {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, admin = self.policy.is_admin(), "dashboard metrics fetch failed; zero-filling");
                if self.error_policy == MetricsErrorPolicy::Notify {
                    self.notifier.notify("Failed to load dashboard metrics.");
                }
                DashboardSummary::default()
            }
        };

        self.dashboard.commit(ticket, summary.clone());
        summary
    }

    /// Fetch windowed analytics for one suite.
    ///
    /// No caching across selections: every call issues a fresh request.
    /// The response is committed to the display slot only when no newer
    /// selection has been made meanwhile; a superseded response is
    /// dropped instead of overwriting newer data.
    pub async fn fetch_suite_analytics(&mut self, suite_id: i64) -> Option<&SuiteAnalytics> {
        let ticket = self.analytics.begin();

        match self
            .api
            .suite_analytics(suite_id, ANALYTICS_WINDOW_DAYS)
            .await
        {
            Ok(analytics) => {
                if !self.analytics.commit(ticket, analytics) {
                    warn!(suite_id, "stale analytics response dropped");
                }
            }
            Err(e) => {
                warn!(suite_id, error = %e, "analytics fetch failed");
            }
        }

        self.analytics.value()
    }

    /// The latest committed dashboard summary.
    pub fn dashboard(&self) -> Option<&DashboardSummary> {
        self.dashboard.value()
    }

    /// The latest committed analytics.
    pub fn analytics(&self) -> Option<&SuiteAnalytics> {
        self.analytics.value()
    }

    /// Clear analytics when navigating away from the suite view.
    pub fn clear_analytics(&mut self) {
        self.analytics.clear();
    }
}
