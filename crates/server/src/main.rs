//! Pat.io Server Entry Point

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use patio_config::Settings;
use patio_core::{LanguageModel, SpeechToText, TextToSpeech};
use patio_llm::{LanguageModelAdapter, OpenAIBackend, OpenAIConfig};
use patio_pipeline::{
    ChatPipeline, ChatPipelineConfig, GoogleSpeechToText, GoogleSttConfig, GoogleTextToSpeech,
    GoogleTtsConfig,
};
use patio_server::{create_router, init_metrics, load_server_settings, AppState};
use patio_text_processing::{create_translator, TranslationConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("PATIO_ENV").ok();
    let config = match load_server_settings("config", env.as_deref()) {
        Ok(settings) => {
            // Tracing not yet initialized
            eprintln!(
                "Loaded configuration from files (env: {})",
                env.as_deref().unwrap_or("default")
            );
            settings
        }
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    init_tracing(&config);

    tracing::info!("Starting Pat.io Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = ?config.environment,
        config_path = env.as_deref().unwrap_or("default"),
        "Configuration loaded"
    );

    let metrics_handle = if config.observability.metrics_enabled {
        let handle = init_metrics();
        if handle.is_some() {
            tracing::info!("Initialized Prometheus metrics at /metrics");
        }
        handle
    } else {
        None
    };

    let pipeline = match build_pipeline(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize chat pipeline");
            return Err(e);
        }
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, pipeline).with_metrics(metrics_handle);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Create the collaborators and wire them into the pipeline
fn build_pipeline(config: &Settings) -> Result<ChatPipeline, Box<dyn std::error::Error>> {
    let stt: Arc<dyn SpeechToText> =
        Arc::new(GoogleSpeechToText::new(GoogleSttConfig::from_settings(config))?);

    let translator = create_translator(&TranslationConfig::from_settings(config)?)?;

    let backend = OpenAIBackend::new(OpenAIConfig::from_settings(&config.llm))?;
    let llm: Arc<dyn LanguageModel> = Arc::new(
        LanguageModelAdapter::new(backend).with_strip_asterisks(config.llm.strip_asterisks),
    );

    let tts: Arc<dyn TextToSpeech> =
        Arc::new(GoogleTextToSpeech::new(GoogleTtsConfig::from_settings(config))?);

    let pipeline_config = ChatPipelineConfig::from_settings(config)?;
    tracing::info!(
        stt = stt.model_name(),
        translator = translator.name(),
        llm = llm.model_name(),
        tts = tts.model_name(),
        synthesize_audio = pipeline_config.synthesize_audio,
        "Chat pipeline ready"
    );

    Ok(ChatPipeline::new(stt, translator, llm, tts, pipeline_config))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        format!("patio={},tower_http=debug", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    subscriber.with(fmt_layer).init();
}
