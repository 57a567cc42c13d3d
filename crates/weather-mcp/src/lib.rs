//! Weather MCP Server
//!
//! A Model Context Protocol (MCP) backend exposing OpenWeatherMap lookups as
//! callable tools, fronted by an embedded OAuth 2.0 authorization-code flow.
//! Built for consumption by a BI dashboard (AWS QuickSight).
//!
//! # Features
//!
//! - **Weather tools**: current conditions, two-city comparison, forecast stub
//! - **OAuth 2.0**: authorization-code grant with PKCE and dynamic client
//!   registration, backed by in-memory registries
//! - **Event stream**: SSE connect + heartbeat channel for MCP clients
//!
//! # Example
//!
//! ```no_run
//! use weather_mcp::{OpenWeatherClient, config::Config, server::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = OpenWeatherClient::new(config)?;
//!     McpServer::new(client).run_http(8000).await
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod server;
pub mod tools;

pub use client::OpenWeatherClient;
pub use config::Config;
pub use error::{ClientError, ToolError};
