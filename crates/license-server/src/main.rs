//! License Dashboard Development Server
//!
//! Axum server exposing the license API from an in-memory store and serving
//! the WASM frontend.

mod handlers;
mod routes;
mod state;
mod store;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let state = AppState::seeded();
    tracing::info!(licenses = state.store.list().len(), "Seeded license store");

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into());
    let app = routes::app(state, &static_dir);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("License server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health");
    tracing::info!("  GET    /api/license");
    tracing::info!("  GET    /api/license/{{id}}");
    tracing::info!("  POST   /api/license/{{id}}/renew");
    tracing::info!("  POST   /api/license/{{id}}/payment");
    tracing::info!("  POST   /api/license/dashboard");
    tracing::info!("  DELETE /api/license/{{id}}/dashboard");
    tracing::info!("  GET    /api/project/list");
    tracing::info!("  Static files from {}", static_dir);

    axum::serve(listener, app).await?;

    Ok(())
}
