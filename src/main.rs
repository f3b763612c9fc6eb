use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use whitewolf::assistant::AssistantService;
use whitewolf::catalog::Catalog;
use whitewolf::config::Config;
use whitewolf::genai::{GeminiClient, TextGenerator};
use whitewolf::insight::InsightGenerator;
use whitewolf::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("whitewolf=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().context("startup configuration")?;
    let catalog = Arc::new(Catalog::load().context("loading the studio catalog")?);

    // One client for the whole process; every consumer shares it.
    let generator: Arc<dyn TextGenerator> =
        Arc::new(GeminiClient::new(config.api_base.clone(), config.api_key.clone()));

    let state = AppState {
        catalog,
        assistant: Arc::new(AssistantService::new(generator.clone())),
        insights: Arc::new(InsightGenerator::new(generator)),
    };

    server::serve(config.bind_addr, state).await
}
