//! In-memory OAuth state store.
//!
//! Process-wide registries for clients and authorization codes, guarded by
//! `RwLock`s so authorize-time sweeps and token-exchange removal cannot race
//! into lost updates. Nothing persists across restarts.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use super::types::{AuthorizationCode, Client, ClientSummary};
use crate::config::oauth::{AUTH_CODE_TTL_SECS, DEFAULT_SCOPE};

/// In-memory OAuth state store.
#[derive(Clone)]
pub struct OAuthStore {
    clients: Arc<RwLock<HashMap<String, Client>>>,
    codes: Arc<RwLock<HashMap<String, AuthorizationCode>>>,
}

impl OAuthStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
            codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Generate an opaque identifier from two UUIDs (256 bits, hex).
    ///
    /// Used for authorization codes, client secrets, and bearer tokens;
    /// tokens are stateless so nothing minted here is stored.
    #[must_use]
    pub fn mint_token() -> String {
        format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
    }

    /// Register a new client (dynamic registration).
    ///
    /// The returned value is the only copy of the secret callers will ever
    /// see; listings are redacted.
    pub async fn register_client(
        &self,
        name: Option<String>,
        redirect_uris: Vec<String>,
    ) -> Client {
        let client = Client {
            client_id: uuid::Uuid::new_v4().simple().to_string(),
            client_secret: Self::mint_token(),
            name: name.unwrap_or_else(|| "unnamed client".to_string()),
            redirect_uris: redirect_uris.into_iter().collect(),
            scopes: HashSet::from([DEFAULT_SCOPE.to_string()]),
            created_at: Utc::now(),
            active: true,
        };

        self.clients.write().await.insert(client.client_id.clone(), client.clone());

        client
    }

    /// Insert a pre-provisioned client with fixed credentials.
    ///
    /// Used at startup so a dashboard with static configuration can run the
    /// flow without dynamic registration.
    pub async fn seed_client(
        &self,
        client_id: String,
        client_secret: String,
        redirect_uris: Vec<String>,
    ) {
        let client = Client {
            client_id: client_id.clone(),
            client_secret,
            name: "seeded client".to_string(),
            redirect_uris: redirect_uris.into_iter().collect(),
            scopes: HashSet::from([DEFAULT_SCOPE.to_string()]),
            created_at: Utc::now(),
            active: true,
        };

        self.clients.write().await.insert(client_id, client);
    }

    /// Look up a client by ID.
    pub async fn get_client(&self, client_id: &str) -> Option<Client> {
        self.clients.read().await.get(client_id).cloned()
    }

    /// List all clients, active and inactive, secrets redacted.
    pub async fn list_clients(&self) -> Vec<ClientSummary> {
        let clients = self.clients.read().await;
        let mut summaries: Vec<ClientSummary> = clients.values().map(Client::summary).collect();
        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        summaries
    }

    /// Check a presented client secret against the stored one.
    ///
    /// Both sides are hashed before comparison so timing cannot leak secret
    /// prefixes.
    pub async fn verify_client_secret(&self, client_id: &str, presented: &str) -> bool {
        let clients = self.clients.read().await;
        let Some(client) = clients.get(client_id) else {
            return false;
        };

        Sha256::digest(client.client_secret.as_bytes()) == Sha256::digest(presented.as_bytes())
    }

    /// Issue an authorization code with the default 10-minute TTL.
    ///
    /// The same write pass sweeps out any codes that have already expired.
    pub async fn create_code(
        &self,
        client_id: String,
        redirect_uri: String,
        state: Option<String>,
        scope: String,
        code_challenge: Option<String>,
        code_challenge_method: Option<String>,
    ) -> String {
        #[allow(clippy::cast_possible_wrap)]
        let ttl = TimeDelta::seconds(AUTH_CODE_TTL_SECS as i64);

        self.create_code_with_ttl(
            client_id,
            redirect_uri,
            state,
            scope,
            code_challenge,
            code_challenge_method,
            ttl,
        )
        .await
    }

    /// Issue an authorization code with an explicit TTL.
    ///
    /// Exposed so tests can mint codes that are already expired.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_code_with_ttl(
        &self,
        client_id: String,
        redirect_uri: String,
        state: Option<String>,
        scope: String,
        code_challenge: Option<String>,
        code_challenge_method: Option<String>,
        ttl: TimeDelta,
    ) -> String {
        let code = Self::mint_token();
        let now = Utc::now();

        let mut codes = self.codes.write().await;
        Self::sweep_expired(&mut codes, now);

        codes.insert(
            code.clone(),
            AuthorizationCode {
                client_id,
                redirect_uri,
                state,
                scope,
                code_challenge,
                code_challenge_method,
                created_at: now,
                expires_at: now + ttl,
            },
        );

        code
    }

    /// Remove and return an authorization code.
    ///
    /// Single-use is enforced by the removal itself: a concurrent replay of
    /// the same code races to this `remove` and at most one caller gets the
    /// record. Expiry and binding checks happen after removal, at the token
    /// endpoint.
    pub async fn take_code(&self, code: &str) -> Option<AuthorizationCode> {
        self.codes.write().await.remove(code)
    }

    /// Number of codes currently held (expired ones included until swept).
    pub async fn code_count(&self) -> usize {
        self.codes.read().await.len()
    }

    fn sweep_expired(codes: &mut HashMap<String, AuthorizationCode>, now: DateTime<Utc>) {
        let before = codes.len();
        codes.retain(|_, code| !code.is_expired_at(now));
        let removed = before - codes.len();
        if removed > 0 {
            tracing::debug!(count = removed, "Swept expired authorization codes");
        }
    }
}

impl Default for OAuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OAuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthStore").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_registration() {
        let store = OAuthStore::new();
        let client = store
            .register_client(Some("Test App".into()), vec!["http://localhost/callback".into()])
            .await;

        assert!(!client.client_id.is_empty());
        assert!(client.client_secret.len() >= 64);
        assert!(client.active);
        assert!(client.scopes.contains("weather:read"));

        let found = store.get_client(&client.client_id).await;
        assert_eq!(found.unwrap().name, "Test App");
    }

    #[tokio::test]
    async fn test_listing_redacts_secrets() {
        let store = OAuthStore::new();
        let client = store
            .register_client(Some("Test App".into()), vec!["http://localhost/callback".into()])
            .await;

        let listing = store.list_clients().await;
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].client_id, client.client_id);

        let serialized = serde_json::to_string(&listing).unwrap();
        assert!(!serialized.contains(&client.client_secret));
    }

    #[tokio::test]
    async fn test_secret_verification() {
        let store = OAuthStore::new();
        let client =
            store.register_client(None, vec!["http://localhost/callback".into()]).await;

        assert!(store.verify_client_secret(&client.client_id, &client.client_secret).await);
        assert!(!store.verify_client_secret(&client.client_id, "wrong").await);
        assert!(!store.verify_client_secret("no-such-client", &client.client_secret).await);
    }

    #[tokio::test]
    async fn test_code_single_use() {
        let store = OAuthStore::new();
        let code = store
            .create_code(
                "client1".into(),
                "http://localhost/callback".into(),
                None,
                "weather:read".into(),
                None,
                None,
            )
            .await;

        let taken = store.take_code(&code).await;
        assert!(taken.is_some());
        assert_eq!(taken.unwrap().client_id, "client1");

        // Second take fails: the code was removed on first read.
        assert!(store.take_code(&code).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_code_reports_expired() {
        let store = OAuthStore::new();
        let code = store
            .create_code_with_ttl(
                "client1".into(),
                "http://localhost/callback".into(),
                None,
                "weather:read".into(),
                None,
                None,
                TimeDelta::seconds(-1),
            )
            .await;

        let taken = store.take_code(&code).await.unwrap();
        assert!(taken.is_expired_at(Utc::now()));
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_codes_on_issue() {
        let store = OAuthStore::new();
        let expired = store
            .create_code_with_ttl(
                "client1".into(),
                "http://localhost/callback".into(),
                None,
                "weather:read".into(),
                None,
                None,
                TimeDelta::seconds(-1),
            )
            .await;
        assert_eq!(store.code_count().await, 1);

        // Issuing a fresh code sweeps the expired one.
        let fresh = store
            .create_code(
                "client2".into(),
                "http://localhost/callback".into(),
                None,
                "weather:read".into(),
                None,
                None,
            )
            .await;

        assert_eq!(store.code_count().await, 1);
        assert!(store.take_code(&expired).await.is_none());
        assert!(store.take_code(&fresh).await.is_some());
    }

    #[tokio::test]
    async fn test_codes_are_unique_and_opaque() {
        let store = OAuthStore::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..32 {
            let code = store
                .create_code(
                    "client1".into(),
                    "http://localhost/callback".into(),
                    None,
                    "weather:read".into(),
                    None,
                    None,
                )
                .await;
            assert!(code.len() >= 64);
            assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
            assert!(seen.insert(code));
        }
    }
}
