use anyhow::Context;
use precis_core::ArticleService;
use precis_server::{AppState, ServerConfig, run_server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "precis_server=info,precis_core=info,tower_http=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env().context("Failed to read configuration")?;
    if config.precis.llm.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; summaries will fail until it is");
    }

    let service = ArticleService::from_config(&config.precis).context("Failed to build article service")?;
    let state = AppState::new(service, config.precis.batch.clone());

    run_server(state, &config).await
}
