//! MCP event stream.
//!
//! Emits one `mcp_connected` event when a client attaches, then a
//! `heartbeat` every 30 seconds. The stream is a per-connection task;
//! when the peer disconnects axum drops the stream, which cancels the
//! pending sleep and releases the connection.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::Event;
use futures::Stream;

/// Interval between heartbeat events.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Server identity announced in the connect event.
pub const SERVER_NAME: &str = "Weather MCP";

/// Build the connect-then-heartbeat event stream.
pub fn heartbeat_stream(tool_names: Vec<String>) -> impl Stream<Item = Result<Event, Infallible>> {
    async_stream::stream! {
        let connected = serde_json::json!({
            "type": "mcp_connected",
            "server": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().timestamp(),
            "tools": tool_names,
        });
        yield Ok(Event::default().data(connected.to_string()));

        loop {
            tokio::time::sleep(HEARTBEAT_INTERVAL).await;

            let heartbeat = serde_json::json!({
                "type": "heartbeat",
                "timestamp": chrono::Utc::now().timestamp(),
            });
            yield Ok(Event::default().data(heartbeat.to_string()));
        }
    }
}
