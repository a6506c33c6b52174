pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::controllers::{
    conversion::ConversionController, health, health::HealthController, languages,
};
use crate::infrastructure::config::Config;

/// Build the application router with all routes configured
pub fn build_router(conversion_controller: Arc<ConversionController>, config: &Config) -> Router {
    let health_controller = Arc::new(HealthController::new(
        conversion_controller.storage_backend(),
    ));

    // Conversion routes
    let conversion_routes = Router::new()
        .route("/api/convert", post(ConversionController::convert))
        .route("/play/:audio_id", get(ConversionController::play))
        .route("/download/:audio_id", get(ConversionController::download))
        .with_state(conversion_controller)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(HealthController::health_ready))
        .with_state(health_controller)
        .route("/api/languages", get(languages::list_languages))
        .merge(conversion_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(cors_layer()),
        )
}

/// Any origin may call the API and fetch audio
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION, header::HeaderName::from_static(X_REQUEST_ID)])
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    conversion_controller: Arc<ConversionController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(conversion_controller, &config);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
