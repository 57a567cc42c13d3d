//! OAuth 2.0 authorization server for MCP authentication.
//!
//! A self-contained authorization-code flow embedded in the binary, used by
//! the BI dashboard to obtain bearer tokens:
//! - RFC 6749: Authorization Code Grant
//! - RFC 7636: PKCE (S256 and plain)
//! - Dynamic client registration over `/api/clients`

pub mod handlers;
pub mod pkce;
pub mod store;
mod types;

pub use store::OAuthStore;
pub use types::{AuthorizationCode, Client, ClientSummary};
