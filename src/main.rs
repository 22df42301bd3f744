use pdfmagic_service::{build_router, services, AppConfig, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("ERROR: Invalid configuration");

    tracing::info!(
        "Starting pdfmagic-service (ghostscript: {}, temp dir: {}, static dir: {})",
        config.ghostscript_path,
        config.temp_dir.display(),
        config.static_dir.display()
    );

    let port = config.port;
    let compressor = services::create_compressor(&config);
    let app_state = AppState::new(config, compressor);
    let router = build_router(app_state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server running on http://localhost:{}", port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
