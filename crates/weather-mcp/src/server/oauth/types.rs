//! OAuth 2.0 types for MCP authentication.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered OAuth client.
///
/// Immutable once issued except `active`. The secret is returned to the
/// caller exactly once at registration and never listed again.
#[derive(Debug, Clone)]
pub struct Client {
    pub client_id: String,
    pub client_secret: String,
    pub name: String,
    pub redirect_uris: HashSet<String>,
    pub scopes: HashSet<String>,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl Client {
    /// Redacted view for listings.
    #[must_use]
    pub fn summary(&self) -> ClientSummary {
        let mut redirect_uris: Vec<String> = self.redirect_uris.iter().cloned().collect();
        redirect_uris.sort();
        let mut scopes: Vec<String> = self.scopes.iter().cloned().collect();
        scopes.sort();

        ClientSummary {
            client_id: self.client_id.clone(),
            name: self.name.clone(),
            redirect_uris,
            scopes,
            created_at: self.created_at,
            active: self.active,
        }
    }
}

/// Client view exposed by `/api/clients` — no secret.
#[derive(Debug, Clone, Serialize)]
pub struct ClientSummary {
    pub client_id: String,
    pub name: String,
    pub redirect_uris: Vec<String>,
    pub scopes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

/// An authorization code issued by `/oauth/authorize`.
///
/// Consumed exactly once by removal-on-read at the token endpoint, or
/// discarded by the expiry sweep.
#[derive(Debug, Clone)]
pub struct AuthorizationCode {
    pub client_id: String,
    pub redirect_uri: String,
    pub state: Option<String>,
    pub scope: String,
    pub code_challenge: Option<String>,
    pub code_challenge_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthorizationCode {
    /// Check whether the code has passed its expiry instant.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
