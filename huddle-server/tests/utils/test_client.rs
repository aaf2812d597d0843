use anyhow::{Context, Result};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use huddle_core::{ClientEvent, PeerId, ServerEvent};
use huddle_server::ServerConfig;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Starts a full server on an ephemeral local port.
pub async fn spawn_server() -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to bind test listener")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = huddle_server::serve_on(listener, &ServerConfig::default()).await {
            tracing::error!("Test server stopped: {:#}", e);
        }
    });

    Ok(addr)
}

/// Browser stand-in speaking the JSON protocol over a real WebSocket.
pub struct TestClient {
    /// Id the server announced in its `connected` frame.
    pub socket_id: PeerId,
    sink: SplitSink<Socket, Message>,
    stream: SplitStream<Socket>,
}

impl TestClient {
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let (socket, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws"))
            .await
            .context("WebSocket handshake failed")?;
        let (sink, stream) = socket.split();

        let mut client = Self {
            socket_id: PeerId::new(),
            sink,
            stream,
        };

        match client.recv(super::SIGNAL_TIMEOUT_MS).await? {
            ServerEvent::Connected { socket_id } => client.socket_id = socket_id,
            other => anyhow::bail!("Expected connected frame, got {:?}", other),
        }

        Ok(client)
    }

    pub async fn send(&mut self, event: &ClientEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        self.send_raw(&json).await
    }

    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.sink
            .send(Message::Text(text.to_owned().into()))
            .await
            .context("Failed to send frame")
    }

    /// Next server event, skipping control frames.
    pub async fn recv(&mut self, timeout_ms: u64) -> Result<ServerEvent> {
        let timeout = std::time::Duration::from_millis(timeout_ms);

        loop {
            let frame = tokio::time::timeout(timeout, self.stream.next())
                .await
                .context("Timeout waiting for server event")?
                .context("Socket closed")?
                .context("Socket error")?;

            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).context("Unparseable server event");
            }
        }
    }

    /// Succeeds if nothing arrives within `timeout_ms`.
    pub async fn expect_silence(&mut self, timeout_ms: u64) -> Result<()> {
        match self.recv(timeout_ms).await {
            Ok(event) => anyhow::bail!("Unexpected event {:?}", event),
            Err(_) => Ok(()),
        }
    }

    pub async fn close(mut self) -> Result<()> {
        self.sink
            .send(Message::Close(None))
            .await
            .context("Failed to close socket")
    }
}
