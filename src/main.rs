use std::net::SocketAddr;

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

use item_service::rest::{self, AppState};
use item_service::store::ItemStore;

const DEFAULT_PORT: u16 = 3000;

/// Resolve the listening port from the `PORT` environment variable,
/// defaulting to 3000 when unset or unparseable.
fn resolve_port(raw: Option<String>) -> u16 {
    raw.and_then(|value| value.parse().ok()).unwrap_or(DEFAULT_PORT)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let state = AppState::new(ItemStore::new());

    // CORS setup so browser clients can make requests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = rest::router().layer(cors).with_state(state);

    let port = resolve_port(std::env::var("PORT").ok());
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
