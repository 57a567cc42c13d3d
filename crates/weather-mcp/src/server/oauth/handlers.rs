//! OAuth 2.0 endpoint handlers.
//!
//! Implements the authorization-code grant used by the BI dashboard:
//! `/oauth/authorize`, `/oauth/token`, and the client-registry admin
//! endpoints under `/api/clients`.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use url::Url;

use super::pkce;
use super::store::OAuthStore;
use crate::config::oauth::{ACCESS_TOKEN_TTL_SECS, DEFAULT_SCOPE};
use crate::server::transport::AppState;

/// OAuth protocol errors, all surfaced as 400 responses with an
/// `{"error", "error_description"}` body.
#[derive(thiserror::Error, Debug)]
pub enum OAuthError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    InvalidClient(String),

    #[error("{0}")]
    InvalidGrant(String),

    #[error("{0}")]
    InvalidRedirectUri(String),

    #[error("unsupported response_type '{0}', only 'code' is supported")]
    UnsupportedResponseType(String),

    #[error("unsupported grant_type '{0}', only 'authorization_code' is supported")]
    UnsupportedGrantType(String),
}

impl OAuthError {
    /// Wire-level error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::InvalidClient(_) => "invalid_client",
            Self::InvalidGrant(_) => "invalid_grant",
            Self::InvalidRedirectUri(_) => "invalid_redirect_uri",
            Self::UnsupportedResponseType(_) => "unsupported_response_type",
            Self::UnsupportedGrantType(_) => "unsupported_grant_type",
        }
    }
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": self.code(),
                "error_description": self.to_string()
            })),
        )
            .into_response()
    }
}

// ─── Authorization Endpoint ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AuthorizeQuery {
    pub response_type: Option<String>,
    pub client_id: Option<String>,
    pub redirect_uri: Option<String>,
    pub state: Option<String>,
    pub scope: Option<String>,
    pub code_challenge: Option<String>,
    pub code_challenge_method: Option<String>,
}

/// `GET /oauth/authorize`
///
/// Issues an authorization code and redirects back to the client. There is
/// no interactive consent page: any registered client with a matching
/// redirect URI is approved directly.
pub async fn handle_authorize(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AuthorizeQuery>,
) -> Result<Response, OAuthError> {
    let Some(client_id) = query.client_id.as_deref() else {
        return Err(OAuthError::InvalidRequest("missing client_id".into()));
    };
    let Some(redirect_uri) = query.redirect_uri.as_deref() else {
        return Err(OAuthError::InvalidRequest("missing redirect_uri".into()));
    };

    let Some(client) = state.oauth.get_client(client_id).await else {
        return Err(OAuthError::InvalidClient(format!("unknown client '{client_id}'")));
    };
    if !client.active {
        return Err(OAuthError::InvalidClient(format!("client '{client_id}' is deactivated")));
    }

    // Exact string match against the registered set.
    if !client.redirect_uris.contains(redirect_uri) {
        return Err(OAuthError::InvalidRedirectUri(format!(
            "redirect_uri '{redirect_uri}' is not registered for this client"
        )));
    }

    // Absent response_type defaults to "code"; anything else is rejected.
    let response_type = query.response_type.as_deref().unwrap_or("code");
    if response_type != "code" {
        return Err(OAuthError::UnsupportedResponseType(response_type.to_string()));
    }

    // Scope validation is advisory: unrecognized scopes are logged, never
    // rejected, so third-party callers that send extra scopes still work.
    let scope = query.scope.as_deref().unwrap_or(DEFAULT_SCOPE);
    for requested in scope.split_whitespace() {
        if !client.scopes.contains(requested) {
            tracing::warn!(
                client_id = %client_id,
                scope = %requested,
                "Authorize request carries scope outside the client's grant"
            );
        }
    }

    let code = state
        .oauth
        .create_code(
            client_id.to_owned(),
            redirect_uri.to_owned(),
            query.state.clone(),
            scope.to_owned(),
            query.code_challenge.clone(),
            query.code_challenge_method.clone(),
        )
        .await;

    tracing::info!(client_id = %client_id, "Issued authorization code");

    let mut location = Url::parse(redirect_uri).map_err(|_| {
        OAuthError::InvalidRedirectUri(format!("redirect_uri '{redirect_uri}' is not a valid URL"))
    })?;
    {
        let mut pairs = location.query_pairs_mut();
        pairs.append_pair("code", &code);
        if let Some(ref oauth_state) = query.state {
            pairs.append_pair("state", oauth_state);
        }
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response())
}

// ─── Token Endpoint ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub grant_type: Option<String>,
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub code_verifier: Option<String>,
}

/// `POST /oauth/token` (form-encoded)
///
/// Exchanges an authorization code for a bearer token. The code is removed
/// from the store before any further validation, so a replay can never
/// succeed even when the first exchange fails a later check.
pub async fn handle_token(
    State(state): State<Arc<AppState>>,
    axum::Form(form): axum::Form<TokenForm>,
) -> Result<Response, OAuthError> {
    let grant_type = form.grant_type.as_deref().unwrap_or_default();
    if grant_type != "authorization_code" {
        return Err(OAuthError::UnsupportedGrantType(grant_type.to_string()));
    }

    let code = require_field(form.code.as_deref(), "code")?;
    let redirect_uri = require_field(form.redirect_uri.as_deref(), "redirect_uri")?;
    let client_id = require_field(form.client_id.as_deref(), "client_id")?;
    let client_secret = require_field(form.client_secret.as_deref(), "client_secret")?;

    if state.oauth.get_client(client_id).await.is_none()
        || !state.oauth.verify_client_secret(client_id, client_secret).await
    {
        return Err(OAuthError::InvalidClient("client authentication failed".into()));
    }

    // Removal-on-read: at most one exchange can ever observe this code.
    let Some(auth_code) = state.oauth.take_code(code).await else {
        return Err(OAuthError::InvalidGrant(
            "authorization code is invalid or already used".into(),
        ));
    };

    if auth_code.is_expired_at(chrono::Utc::now()) {
        return Err(OAuthError::InvalidGrant("authorization code expired".into()));
    }
    if auth_code.redirect_uri != redirect_uri {
        return Err(OAuthError::InvalidGrant(
            "redirect_uri does not match the authorization request".into(),
        ));
    }
    if auth_code.client_id != client_id {
        return Err(OAuthError::InvalidGrant(
            "authorization code was issued to a different client".into(),
        ));
    }

    if let Some(ref challenge) = auth_code.code_challenge {
        let Some(verifier) = form.code_verifier.as_deref() else {
            return Err(OAuthError::InvalidGrant("code_verifier required".into()));
        };
        if !pkce::verify(verifier, challenge, auth_code.code_challenge_method.as_deref()) {
            return Err(OAuthError::InvalidGrant("PKCE verification failed".into()));
        }
    }

    tracing::info!(client_id = %client_id, "Issued access token");

    Ok(token_success(&OAuthStore::mint_token(), &auth_code.scope))
}

/// Build a token response with the cache headers RFC 6749 §5.1 requires.
fn token_success(access_token: &str, scope: &str) -> Response {
    let mut response = Json(serde_json::json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": ACCESS_TOKEN_TTL_SECS,
        "scope": scope
    }))
    .into_response();

    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    response
}

fn require_field<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, OAuthError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(OAuthError::InvalidRequest(format!("missing {field}"))),
    }
}

// ─── Client Registry ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub redirect_uris: Option<Vec<String>>,
}

/// `POST /api/clients/register`
///
/// Dynamic client registration. The response is the only place the secret
/// ever appears; the listing endpoint redacts it.
pub async fn handle_register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let redirect_uris = req.redirect_uris.unwrap_or_default();
    if redirect_uris.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "invalid_client_metadata",
                "error_description": "redirect_uris is required"
            })),
        )
            .into_response();
    }

    let client = state.oauth.register_client(req.name, redirect_uris).await;

    tracing::info!(client_id = %client.client_id, name = %client.name, "Registered OAuth client");

    let summary = client.summary();
    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "client_id": summary.client_id,
            "client_secret": client.client_secret,
            "name": summary.name,
            "redirect_uris": summary.redirect_uris,
            "scopes": summary.scopes,
            "created_at": summary.created_at,
            "active": summary.active
        })),
    )
        .into_response()
}

/// `GET /api/clients`
///
/// Lists all clients, active and inactive, without secrets.
pub async fn handle_clients_list(State(state): State<Arc<AppState>>) -> Response {
    let clients = state.oauth.list_clients().await;
    Json(serde_json::json!({ "clients": clients })).into_response()
}
