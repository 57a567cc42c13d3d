//! MCP server implementation.
//!
//! HTTP-only: the consumer is a BI dashboard speaking HTTP + SSE. The
//! server owns the tool registry and the OAuth store; both live for the
//! process lifetime and are lost on restart.

pub mod events;
pub mod oauth;
pub mod transport;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::client::OpenWeatherClient;
use crate::config::Config;
use crate::tools::{self, McpTool, ToolContext};

/// Weather MCP server.
pub struct McpServer {
    /// Tool execution context.
    ctx: ToolContext,

    /// Registered tools.
    tools: Vec<Box<dyn McpTool>>,

    /// OAuth authority state.
    oauth: oauth::OAuthStore,
}

impl McpServer {
    /// Create a new MCP server.
    #[must_use]
    pub fn new(client: OpenWeatherClient) -> Self {
        let ctx = ToolContext::new(Arc::new(client));
        let tools = tools::register_all_tools();

        Self { ctx, tools, oauth: oauth::OAuthStore::new() }
    }

    /// Register the pre-provisioned client from configuration, if any.
    pub async fn seed_oauth_client(&self, config: &Config) {
        let (Some(id), Some(secret)) =
            (config.seed_client_id.clone(), config.seed_client_secret.clone())
        else {
            return;
        };

        let redirect_uris = config.seed_redirect_uri.clone().into_iter().collect();
        self.oauth.seed_client(id.clone(), secret, redirect_uris).await;
        tracing::info!(client_id = %id, "Seeded OAuth client from configuration");
    }

    /// Run the server in HTTP mode.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        tracing::info!("Registered {} tools", self.tools.len());

        let router = transport::create_router(self.tools, self.ctx, self.oauth);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }

    /// Get tool by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// List all available tools.
    #[must_use]
    pub fn list_tools(&self) -> Vec<(&str, &str)> {
        self.tools.iter().map(|t| (t.name(), t.description())).collect()
    }

    /// Get tool context for execution.
    #[must_use]
    pub const fn context(&self) -> &ToolContext {
        &self.ctx
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer").field("tools", &self.tools.len()).finish()
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.expect("Failed to install CTRL+C handler");
    tracing::info!("Received shutdown signal");
}
