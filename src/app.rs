use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{dashboard, fleet, health};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/dashboard", dashboard::router())
        .nest("/api/farms", dashboard::farms_router())
        .nest("/api/fleet", fleet::router())
        .nest("/api/windows", fleet::windows_router())
        .nest("/api/cache", fleet::cache_router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
