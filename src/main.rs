use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use truthbot::application::services::{ImageStrategy, VerificationConfig, VerificationService};
use truthbot::infrastructure::llm::LlmClientFactory;
use truthbot::infrastructure::observability::{TracingConfig, init_tracing};
use truthbot::infrastructure::search::SearchProviderFactory;
use truthbot::infrastructure::text_processing::ExtractorFactory;
use truthbot::presentation::config::ImageStrategySetting;
use truthbot::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(&settings.logging, environment));

    let llm_client = LlmClientFactory::create(&settings.llm)?;
    let search_provider = SearchProviderFactory::create(&settings.search)?;

    let image_strategy = match settings.extraction.image_strategy {
        ImageStrategySetting::Vision => ImageStrategy::Vision,
        ImageStrategySetting::Ocr => ImageStrategy::Ocr,
    };

    let ocr_client = (image_strategy == ImageStrategy::Ocr).then(|| Arc::clone(&llm_client));
    let extractor = Arc::new(ExtractorFactory::create(ocr_client));

    let verification_service = Arc::new(VerificationService::new(
        extractor,
        llm_client,
        search_provider,
        VerificationConfig {
            max_prompt_chars: settings.extraction.max_prompt_chars,
            search_query_chars: settings.extraction.search_query_chars,
            image_strategy,
        },
    ));

    let state = AppState {
        verification_service,
        max_upload_size_bytes: settings.server.max_upload_size_mb * 1024 * 1024,
    };

    let router = create_router(state);

    let ip = settings
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server.host `{}`", settings.server.host))?;
    let addr = SocketAddr::new(ip, settings.server.port);
    tracing::info!(%addr, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
