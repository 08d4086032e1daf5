//! Suite repository: role-scoped listing with a read-mostly cache.

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{CreateSuiteRequest, Suite};
use crate::policy::ListingScope;

/// Cached, scope-filtered view of the backend's suites.
///
/// The cache is refreshed wholesale after any mutating action; there is
/// no partial or optimistic merge, and no persistence beyond this value's
/// lifetime.
#[derive(Debug)]
pub struct SuiteRepository {
    api: ApiClient,
    scope: ListingScope,
    suites: Vec<Suite>,
}

impl SuiteRepository {
    /// Create an empty repository for the given scope.
    ///
    /// The scope comes from the resolved access policy; the repository
    /// never re-derives it.
    pub fn new(api: ApiClient, scope: ListingScope) -> Self {
        SuiteRepository {
            api,
            scope,
            suites: Vec::new(),
        }
    }

    /// The scope this repository lists under.
    pub fn scope(&self) -> ListingScope {
        self.scope
    }

    /// Re-fetch the suite list.
    ///
    /// A failed fetch leaves an empty cache and logs a diagnostic; the
    /// view degrades to "no suites" without an error banner. The log is
    /// the only way to tell the two apart (documented limitation).
    pub async fn refresh(&mut self) -> &[Suite] {
        match self.api.list_suites(self.scope).await {
            Ok(suites) => {
                info!(count = suites.len(), scope = ?self.scope, "suites loaded");
                self.suites = suites;
            }
            Err(e) => {
                warn!(error = %e, scope = ?self.scope, "suite listing failed; showing empty list");
                self.suites = Vec::new();
            }
        }
        &self.suites
    }

    /// The cached suites, in backend order.
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    /// Look up a cached suite by id.
    pub fn get(&self, suite_id: i64) -> Option<&Suite> {
        self.suites.iter().find(|s| s.id == suite_id)
    }

    /// Create a suite, then invalidate the cache by re-fetching.
    ///
    /// Creation failures propagate to the caller (the entry flow owns
    /// the user feedback); only success triggers the refresh.
    pub async fn create(&mut self, request: &CreateSuiteRequest) -> ClientResult<Suite> {
        let created = self.api.create_suite(request).await?;
        info!(suite_id = created.id, "suite created");
        self.refresh().await;
        Ok(created)
    }
}
