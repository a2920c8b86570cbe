use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use farmer_advisory::controllers::predict::PredictController;
use farmer_advisory::domain::advisory::AdvisoryService;
use farmer_advisory::domain::tts::{AudioAssembler, TextChunker, TtsService};
use farmer_advisory::infrastructure::config::{Config, LogFormat};
use farmer_advisory::infrastructure::http::start_http_server;
use farmer_advisory::infrastructure::repositories::{GeminiLlmRepository, GoogleTtsRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Farmer Advisory API on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        gemini_model = %config.gemini_model,
        tts_chunk_size = config.tts_chunk_size,
        tts_concurrency = config.tts_concurrency,
        tts_timeout_secs = config.tts_timeout_secs,
        request_timeout_secs = config.request_timeout_secs,
        allowed_origins = ?config.allowed_origins,
        "Configuration loaded"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (external collaborators)
    tracing::info!("Instantiating repositories...");
    let llm_repo = Arc::new(GeminiLlmRepository::new(
        config.google_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_base_url.clone(),
        config.llm_timeout(),
    )?);
    let tts_repo = Arc::new(GoogleTtsRepository::new(
        config.tts_base_url.clone(),
        config.tts_timeout(),
    )?);

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let tts_service = Arc::new(TtsService::new(
        TextChunker::new(config.tts_chunk_size),
        AudioAssembler::new(tts_repo, config.tts_concurrency, config.tts_timeout()),
    ));
    let advisory_service = Arc::new(AdvisoryService::new(
        llm_repo,
        tts_service,
        config.request_timeout(),
    ));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let predict_controller = Arc::new(PredictController::new(advisory_service));

    // Start HTTP server with all routes
    start_http_server(config, predict_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "farmer_advisory=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "farmer_advisory=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
