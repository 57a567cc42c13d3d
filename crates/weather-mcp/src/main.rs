//! Weather MCP Server - Entry Point

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use weather_mcp::{OpenWeatherClient, config::Config, server::McpServer};

#[derive(Parser, Debug)]
#[command(name = "weather-mcp")]
#[command(about = "MCP server exposing weather tools behind OAuth 2.0")]
#[command(version)]
struct Cli {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY")]
    api_key: Option<String>,

    /// HTTP server port
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Pre-provisioned OAuth client id (registered at startup)
    #[arg(long, env = "MCP_SEED_CLIENT_ID")]
    seed_client_id: Option<String>,

    /// Secret for the pre-provisioned OAuth client
    #[arg(long, env = "MCP_SEED_CLIENT_SECRET")]
    seed_client_secret: Option<String>,

    /// Redirect URI allowed for the pre-provisioned OAuth client
    #[arg(long, env = "MCP_SEED_REDIRECT_URI")]
    seed_redirect_uri: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cli.port,
        has_api_key = cli.api_key.is_some(),
        "Starting Weather MCP server"
    );

    let mut config = Config::new(cli.api_key);
    config.seed_client_id = cli.seed_client_id;
    config.seed_client_secret = cli.seed_client_secret;
    config.seed_redirect_uri = cli.seed_redirect_uri;

    if !config.has_api_key() {
        tracing::warn!("No OpenWeatherMap API key configured; weather lookups will fail");
    }

    let client = OpenWeatherClient::new(config.clone())?;
    let server = McpServer::new(client);
    server.seed_oauth_client(&config).await;

    server.run_http(cli.port).await
}
