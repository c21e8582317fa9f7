use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::app::{AppState, create_app};
use crate::configs::Settings;
use crate::errors::ServerError;

pub mod app;
pub mod configs;
pub mod errors;
pub mod handles;
pub mod services;

pub async fn run(settings: &Arc<Settings>) -> Result<(), ServerError> {
    let ip_addr = settings.server.host.parse::<IpAddr>()?;

    let address = SocketAddr::from((ip_addr, settings.server.port));

    let listener = TcpListener::bind(&address).await?;

    tracing::info!("Listening to port {}", address.port());

    serve(listener, AppState::new(settings)).await
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), ServerError> {
    let app = create_app(state).into_make_service_with_connect_info::<SocketAddr>();

    axum::serve(listener, app).await?;

    Ok(())
}
