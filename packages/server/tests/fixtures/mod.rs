//! Test server fixture.

use std::{net::SocketAddr, sync::Arc};

use cityrunners_server::{serve, ui::state::AppState};
use tokio::{net::TcpListener, task::JoinHandle};

/// In-process server bound to an ephemeral port
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(location_capacity: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let state = Arc::new(AppState::new(location_capacity));
        let handle = tokio::spawn(async move {
            let _ = serve(listener, state).await;
        });
        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
