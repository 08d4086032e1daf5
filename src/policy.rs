//! Access policy resolution.
//!
//! All role-conditional behavior in the console (which listing endpoint
//! to call, which dashboard sections to reveal, which header to show)
//! is derived here, once, into an immutable decision record. Consumers
//! read the record instead of re-deriving admin-ness locally.

use crate::session::{ADMIN_ROLE, Identity, ROLE_PREFIX};

/// Which suites an identity may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingScope {
    /// Every suite on the platform (administrators)
    All,
    /// Only suites owned by the caller
    Own,
}

/// Resolved per-identity access decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Suite and metrics visibility scope
    pub scope: ListingScope,
    /// Whether performance-metric panels and quick actions are shown
    pub show_admin_panels: bool,
    /// Dashboard header label
    pub dashboard_title: &'static str,
}

impl AccessPolicy {
    /// Resolve the policy for an identity.
    pub fn resolve(identity: &Identity) -> Self {
        let admin = identity.has_role(ADMIN_ROLE);
        AccessPolicy {
            scope: if admin {
                ListingScope::All
            } else {
                ListingScope::Own
            },
            show_admin_panels: admin,
            dashboard_title: if admin {
                "Admin Dashboard"
            } else {
                "My Dashboard"
            },
        }
    }

    /// Whether this policy grants the administrator scope.
    pub fn is_admin(&self) -> bool {
        self.scope == ListingScope::All
    }
}

/// Strip the role namespace prefix for display ("ROLE_ADMIN" -> "ADMIN").
pub fn display_role(role: &str) -> &str {
    role.strip_prefix(ROLE_PREFIX).unwrap_or(role)
}
