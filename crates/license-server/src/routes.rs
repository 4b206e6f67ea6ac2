//! Router

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{
    create_license, delete_license, health_check, license_detail, list_licenses, list_packages,
    list_projects, make_payment, renew_license,
};
use crate::state::AppState;

/// License API, mounted under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/license", get(list_licenses))
        .route("/license/dashboard", post(create_license))
        .route("/license/{id}", get(license_detail))
        .route("/license/{id}/renew", post(renew_license))
        .route("/license/{id}/payment", post(make_payment))
        .route("/license/{id}/dashboard", delete(delete_license))
        .route("/project/list", get(list_projects))
        .route("/package/list", get(list_packages))
}

/// Full application: health, API and the static WASM bundle
pub fn app(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
