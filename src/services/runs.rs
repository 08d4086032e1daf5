//! Run history view: the run-listing table.

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::models::TestRun;

/// Cached list of test runs.
#[derive(Debug)]
pub struct RunHistory {
    api: ApiClient,
    runs: Vec<TestRun>,
}

impl RunHistory {
    /// Create an empty run history.
    pub fn new(api: ApiClient) -> Self {
        RunHistory {
            api,
            runs: Vec::new(),
        }
    }

    /// Re-fetch the run list. Same read-path policy as the suite list:
    /// failure degrades to an empty list with a logged diagnostic.
    pub async fn refresh(&mut self) -> &[TestRun] {
        match self.api.list_runs().await {
            Ok(runs) => {
                info!(count = runs.len(), "runs loaded");
                self.runs = runs;
            }
            Err(e) => {
                warn!(error = %e, "run listing failed; showing empty list");
                self.runs = Vec::new();
            }
        }
        &self.runs
    }

    /// The cached runs, in backend order.
    pub fn runs(&self) -> &[TestRun] {
        &self.runs
    }
}
