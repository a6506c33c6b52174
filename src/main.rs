use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use speech_text_conversion::controllers::conversion::ConversionController;
use speech_text_conversion::domain::conversion::{ConversionService, StorageBackend};
use speech_text_conversion::domain::language::LinguaLanguageDetector;
use speech_text_conversion::infrastructure::config::{Config, LogFormat};
use speech_text_conversion::infrastructure::http::start_http_server;
use speech_text_conversion::infrastructure::repositories::{
    ArtifactRepository, DiskArtifactRepository, GoogleTranslationRepository, GoogleTtsRepository,
    MemoryArtifactRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting speech text conversion service on {}:{}",
        config.host,
        config.port
    );

    // Artifact store is chosen once for the lifetime of the process
    let artifact_repo: Arc<dyn ArtifactRepository> = match config.storage_backend() {
        StorageBackend::Memory => {
            tracing::info!("Ephemeral environment detected, keeping audio in memory");
            Arc::new(MemoryArtifactRepository::new())
        }
        StorageBackend::Disk => Arc::new(DiskArtifactRepository::new(config.storage_dir.clone())?),
    };

    tracing::info!("Initializing language detector...");
    let detector = Arc::new(LinguaLanguageDetector::new());

    let translation_repo = Arc::new(GoogleTranslationRepository::new(
        config.translate_api_url.clone(),
        config.http_timeout(),
    )?);
    let tts_repo = Arc::new(GoogleTtsRepository::new(
        config.tts_api_url.clone(),
        config.http_timeout(),
    )?);

    let conversion_service = Arc::new(ConversionService::new(
        detector,
        translation_repo,
        tts_repo,
        artifact_repo,
    ));
    let conversion_controller = Arc::new(ConversionController::new(conversion_service));

    start_http_server(Arc::new(config), conversion_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "speech_text_conversion=debug,tower_http=debug"
    } else {
        "speech_text_conversion=info,tower_http=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
