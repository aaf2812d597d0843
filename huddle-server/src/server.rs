use crate::config::ServerConfig;
use crate::error::ConfigError;
use crate::http::router;
use crate::room::{RoomCodeGenerator, RoomRegistry, RoomState};
use crate::signaling::{RouterCommand, SignalingRouter, SignalingService};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;

/// Spawns the signaling router and returns the service that feeds it.
///
/// Must be called inside a tokio runtime.
pub fn start(config: &ServerConfig) -> Result<SignalingService, ConfigError> {
    config.validate()?;

    let codes = RoomCodeGenerator::new(&config.room_codes)?;
    let state = RoomState::new(RoomRegistry::new(codes));

    let (cmd_tx, cmd_rx) = mpsc::channel::<RouterCommand>(config.command_buffer);
    let signaling = SignalingService::new(cmd_tx);
    let router = SignalingRouter::new(state, cmd_rx, Arc::new(signaling.clone()));

    tokio::spawn(router.run());

    Ok(signaling)
}

/// Starts the router and serves HTTP on an already bound listener.
pub async fn serve_on(listener: TcpListener, config: &ServerConfig) -> Result<()> {
    let signaling = start(config).context("invalid server configuration")?;
    let addr = listener.local_addr().context("listener has no local address")?;

    info!("Signaling server listening on http://{}", addr);
    axum::serve(listener, router(signaling))
        .await
        .context("HTTP server failed")
}

/// Binds `config.bind` and serves until the process is stopped.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    serve_on(listener, &config).await
}
