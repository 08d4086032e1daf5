//! Session context: the authenticated identity and its bearer credential.
//!
//! Created at sign-in, dropped at sign-out, and threaded explicitly into
//! the client, never held as a global. Token acquisition itself is an
//! external collaborator; this module only carries the result.

use std::collections::BTreeSet;
use std::env;

use secrecy::SecretString;

use crate::config::ConfigError;

/// Role granting access to all suites and global metrics.
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Base role every identity holds at minimum.
pub const BASE_ROLE: &str = "ROLE_USER";

/// Namespace prefix stripped from role names for display.
pub const ROLE_PREFIX: &str = "ROLE_";

/// An authenticated identity as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub email: String,
    roles: BTreeSet<String>,
}

impl Identity {
    /// Create an identity. An empty role set is upgraded to the implicit
    /// base role, so the set is never empty.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        roles: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut roles: BTreeSet<String> = roles.into_iter().collect();
        if roles.is_empty() {
            roles.insert(BASE_ROLE.to_string());
        }
        Identity {
            username: username.into(),
            email: email.into(),
            roles,
        }
    }

    /// Whether the identity holds the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// The identity's roles, in stable order.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }
}

/// The current session: identity plus bearer credential.
///
/// Immutable for the lifetime of a session except for credential
/// refresh. `Debug` never prints the token.
#[derive(Clone)]
pub struct SessionContext {
    identity: Identity,
    token: SecretString,
}

impl SessionContext {
    /// Create a session from an identity and bearer token.
    pub fn new(identity: Identity, token: SecretString) -> Self {
        SessionContext { identity, token }
    }

    /// Build a session from environment variables (console entry point).
    ///
    /// - `TFA_TOKEN`: bearer credential - REQUIRED
    /// - `TFA_USERNAME`: identity username (default: empty)
    /// - `TFA_EMAIL`: identity email (default: empty)
    /// - `TFA_ROLES`: comma-separated role names (default: base role)
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var("TFA_TOKEN").map_err(|_| ConfigError::MissingEnvVar("TFA_TOKEN"))?;
        let username = env::var("TFA_USERNAME").unwrap_or_default();
        let email = env::var("TFA_EMAIL").unwrap_or_default();
        let roles = env::var("TFA_ROLES")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Ok(SessionContext::new(
            Identity::new(username, email, roles),
            SecretString::from(token),
        ))
    }

    /// The authenticated identity.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The bearer credential. Callers must `expose_secret()` explicitly.
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// Replace the bearer credential after a refresh.
    pub fn refresh_credential(&mut self, token: SecretString) {
        self.token = token;
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("identity", &self.identity)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
