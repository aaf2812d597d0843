use crate::signaling::{RouterCommand, SignalingService};
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use huddle_core::{ClientEvent, PeerId, ServerEvent};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let peer_id = PeerId::new();
    info!("New WebSocket connection: {}", peer_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_peer(peer_id, tx);
    service.send_signal(peer_id, &ServerEvent::Connected { socket_id: peer_id });

    if let Err(e) = service.router_tx.send(RouterCommand::Connect { peer_id }).await {
        error!("Router died: {}", e);
        service.remove_peer(&peer_id);
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        let cmd = match ClientEvent::from_frame(&text) {
                            Ok(event) => RouterCommand::Event { peer_id, event },
                            Err(e) => match e.event() {
                                Some(event) => RouterCommand::Rejected {
                                    peer_id,
                                    event: event.to_owned(),
                                    reason: e.to_string(),
                                },
                                None => {
                                    warn!("Invalid frame from {}: {}", peer_id, e);
                                    continue;
                                }
                            },
                        };

                        if let Err(e) = service.router_tx.send(cmd).await {
                            error!("Router died: {}", e);
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // The only place a disconnect is issued for this connection.
    let _ = service
        .router_tx
        .send(RouterCommand::Disconnect { peer_id })
        .await;

    service.remove_peer(&peer_id);
    info!("WebSocket disconnected: {}", peer_id);
}
