use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use autosteer_server::app::{AppState, create_app};
use autosteer_server::configs::Settings;
use autosteer_server::serve;

pub struct MockApp {
    pub state: AppState,
    pub router: Router,
}

impl MockApp {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let state = AppState::new(&Arc::new(settings));
        let router = create_app(state.clone());

        Self { state, router }
    }

    /// Serves the app on an ephemeral local port.
    pub async fn spawn(self) -> (SocketAddr, AppState) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let state = self.state.clone();

        tokio::spawn(async move {
            serve(listener, self.state).await.unwrap();
        });

        (address, state)
    }
}
