use std::net::IpAddr;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use balss::application::ports::{ArtifactStore, ClipStore, ReportWriter};
use balss::application::services::{ClipLockMap, TranscriptionService};
use balss::infrastructure::observability::{TracingConfig, init_tracing};
use balss::infrastructure::reports::TabularReportWriter;
use balss::infrastructure::storage::{LocalArtifactStore, LocalClipStore};
use balss::infrastructure::transcribers::{RegistryConfig, TranscriberRegistryFactory};
use balss::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".to_string())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let settings = Settings::load(environment).context("failed to load configuration")?;

    init_tracing(
        TracingConfig {
            environment: environment.to_string(),
            json_format: settings.logging.json,
        },
        settings.server.port,
    );

    let registry = Arc::new(TranscriberRegistryFactory::initialize(RegistryConfig {
        speechmatics_key: settings.transcription.speechmatics_api_key.clone(),
        assemblyai_key: settings.transcription.assemblyai_api_key.clone(),
        google_key: settings.transcription.google_api_key.clone(),
        anthropic_key: settings.transcription.anthropic_api_key.clone(),
        language: settings.transcription.language.clone(),
        google_language: settings.transcription.google_language.clone(),
        whisper_enabled: settings.transcription.whisper_enabled,
        whisper_model: settings.transcription.whisper_model.clone(),
    }));

    if registry.is_empty() {
        tracing::error!("No transcription services available, check API keys and configuration");
    } else {
        tracing::info!(
            count = registry.len(),
            "Transcription services initialized"
        );
    }

    let clip_store: Arc<dyn ClipStore> =
        Arc::new(LocalClipStore::new(settings.storage.audio_dir.clone())
            .context("failed to open audio clip storage")?);
    let artifact_store: Arc<dyn ArtifactStore> =
        Arc::new(LocalArtifactStore::new(settings.storage.results_dir.clone())
            .context("failed to open transcription results storage")?);
    let report_writer: Arc<dyn ReportWriter> =
        Arc::new(TabularReportWriter::new(Arc::clone(&artifact_store)));

    let transcription_service = Arc::new(TranscriptionService::new(
        Arc::clone(&registry),
        Arc::clone(&clip_store),
        Arc::clone(&artifact_store),
        report_writer,
    ));

    let state = AppState {
        registry,
        transcription_service,
        clip_store,
        artifact_store,
        clip_locks: ClipLockMap::default(),
        settings: settings.clone(),
    };

    let router = create_router(state);

    let host: IpAddr = settings
        .server
        .host
        .parse()
        .context("invalid server host address")?;
    let addr = SocketAddr::from((host, settings.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
