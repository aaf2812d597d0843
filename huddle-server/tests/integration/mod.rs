pub mod messaging_tests;
pub mod multi_peer_tests;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::Level;

use huddle_server::{
    RoomCodeConfig, RoomCodeGenerator, RoomRegistry, RoomState, RouterCommand, SignalingRouter,
};

use crate::utils::MockSignalingOutput;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_router() -> (mpsc::Sender<RouterCommand>, MockSignalingOutput) {
    create_test_router_with(RoomCodeConfig::default())
}

pub fn create_test_router_with(
    codes: RoomCodeConfig,
) -> (mpsc::Sender<RouterCommand>, MockSignalingOutput) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<RouterCommand>(100);
    let signaling = MockSignalingOutput::new();
    let generator = RoomCodeGenerator::new(&codes).expect("Invalid room code config");
    let state = RoomState::new(RoomRegistry::new(generator));

    let router = SignalingRouter::new(state, cmd_rx, Arc::new(signaling.clone()));

    tokio::spawn(async move {
        router.run().await;
    });

    (cmd_tx, signaling)
}
