//! Equation Line relay server
//!
//! Seats two participants on a WebSocket endpoint and relays their moves.
//! Each client runs the game engine locally (natively or through the
//! `wasm` build of eqline-core) and applies the relayed moves itself.

mod relay;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use clap::Parser;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

use eqline_core::{Board, Message, DEFAULT_BOARD_SIZE};

use crate::relay::Relay;

// =============================================================================
// Command Line
// =============================================================================

/// Equation Line relay - two-player WebSocket match server
#[derive(Parser, Debug)]
#[command(name = "eqline-server")]
#[command(about = "WebSocket relay for two-player equation line matches", long_about = None)]
#[command(version)]
struct Cli {
    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind to
    #[arg(short, long, default_value = "12345")]
    port: u16,

    /// Board side length announced to participants (4-30)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE, value_parser = parse_board_size)]
    board_size: usize,
}

fn parse_board_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("{e}"))?;
    Board::new(size).map(|_| size).map_err(|e| e.to_string())
}

// =============================================================================
// API Endpoints
// =============================================================================

type AppState = Arc<Relay>;

#[derive(Serialize)]
struct HealthModel {
    status: String,
    board_size: usize,
    participants: usize,
}

async fn health(State(relay): State<AppState>) -> Json<HealthModel> {
    Json(HealthModel {
        status: "ok".to_string(),
        board_size: relay.board_size(),
        participants: relay.occupied(),
    })
}

async fn ws_handler(ws: WebSocketUpgrade, State(relay): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, relay))
}

fn encode(msg: &Message) -> Option<WsMessage> {
    match serde_json::to_string(msg) {
        Ok(text) => Some(WsMessage::Text(text.into())),
        Err(e) => {
            warn!(error = %e, "failed to encode message");
            None
        }
    }
}

#[instrument(skip_all)]
async fn handle_socket(socket: WebSocket, relay: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let Some(seat) = relay.join(tx) else {
        // only `full` is queued; the outbox is already closed
        while let Some(msg) = rx.recv().await {
            if let Some(frame) = encode(&msg) {
                let _ = sink.send(frame).await;
            }
        }
        let _ = sink.close().await;
        return;
    };

    let mut writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let Some(frame) = encode(&msg) else { continue };
            if sink.send(frame).await.is_err() {
                break;
            }
        }
        let _ = sink.close().await;
    });

    loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(WsMessage::Text(text))) => relay.handle_text(seat, text.as_str()),
                Some(Ok(WsMessage::Close(_))) | None => break,
                Some(Err(e)) => {
                    debug!(%seat, error = %e, "socket error");
                    break;
                }
                Some(Ok(_)) => {}
            },
            _ = &mut writer => break,
        }
    }

    relay.leave(seat);
    writer.abort();
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let state: AppState = Arc::new(Relay::new(cli.board_size));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind((cli.host.as_str(), cli.port)).await?;
    info!(host = %cli.host, port = cli.port, board_size = cli.board_size, "relay listening");
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["eqline-server"]);
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.port, 12345);
        assert_eq!(cli.board_size, 6);
    }

    #[test]
    fn test_cli_board_size_validated() {
        let cli = Cli::parse_from(["eqline-server", "--board-size", "10", "-p", "9000"]);
        assert_eq!(cli.board_size, 10);
        assert_eq!(cli.port, 9000);
        assert!(Cli::try_parse_from(["eqline-server", "--board-size", "3"]).is_err());
        assert!(Cli::try_parse_from(["eqline-server", "--board-size", "31"]).is_err());
        assert!(Cli::try_parse_from(["eqline-server", "--board-size", "six"]).is_err());
    }

    #[test]
    fn test_encode_frame() {
        let frame = encode(&Message::Reset).unwrap();
        assert_eq!(frame, WsMessage::Text(r#"{"type":"reset"}"#.into()));
    }
}
