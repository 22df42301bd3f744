use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::adapters::{
    controllers::{compression_controller::CompressionController, health_controller::HealthController},
    middleware::request_id,
    state::AppState,
};

/// Builds the full HTTP surface: the compression endpoint, health report and
/// the static upload form as fallback.
pub fn build_router(app_state: AppState) -> Router {
    let config = app_state.config.clone();

    let cors = match &config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<HeaderValue> = allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    };

    let api_routes = Router::new()
        .route(
            "/compress",
            post(CompressionController::compress)
                .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .route("/api/v1/health", get(HealthController::health_check));

    Router::new()
        .merge(api_routes)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id))
        .with_state(app_state)
}
