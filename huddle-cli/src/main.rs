use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use huddle_server::ServerConfig;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "huddle")]
#[command(about = "WebRTC signaling relay for small voice rooms")]
struct Cli {
    /// TOML file with server settings. Flags given on the command line win.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on [default: 0.0.0.0]
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on [default: 8088]
    #[arg(short, long)]
    port: Option<u16>,

    /// Length of generated room codes [default: 6]
    #[arg(long)]
    code_length: Option<usize>,

    /// Characters room codes are drawn from [default: A-Z0-9]
    #[arg(long)]
    code_alphabet: Option<String>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "huddle_server=info")]
    log_level: String,
}

impl Cli {
    fn config(&self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };

        let host = self.host.unwrap_or(config.bind.ip());
        let port = self.port.unwrap_or(config.bind.port());
        config.bind = SocketAddr::new(host, port);

        if let Some(length) = self.code_length {
            config.room_codes.length = length;
        }
        if let Some(alphabet) = &self.code_alphabet {
            config.room_codes.alphabet = alphabet.clone();
        }

        config.validate().context("invalid server settings")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = cli.config()?;

    println!(
        "{} {}",
        "huddle".green().bold(),
        format!("signaling on ws://{}/ws", config.bind).cyan()
    );

    huddle_server::serve(config).await
}
