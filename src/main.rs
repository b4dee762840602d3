use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use salon_agent::config::AppConfig;
use salon_agent::handlers;
use salon_agent::services::booking::BookingService;
use salon_agent::services::dialogflow::DialogflowCxClient;
use salon_agent::services::knowledge::KnowledgeBase;
use salon_agent::services::web_search::GoogleSearchProvider;
use salon_agent::state::AppState;
use salon_agent::store::InMemoryAppointmentStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    if !std::path::Path::new(&config.knowledge_base_path).exists() {
        tracing::warn!(
            path = %config.knowledge_base_path,
            "knowledge base file not found, searches will report it as unavailable"
        );
    }
    if config.dialogflow_configured() {
        tracing::info!(
            "using Dialogflow CX agent {} ({})",
            config.dialogflow_agent_id,
            config.dialogflow_location
        );
    } else {
        tracing::warn!("DIALOGFLOW_PROJECT_ID / DIALOGFLOW_AGENT_ID not set, CX queries will fail");
    }
    if !config.web_search_configured() {
        tracing::warn!("GOOGLE_SEARCH_API_KEY / GOOGLE_SEARCH_ENGINE_ID not set, web search disabled");
    }

    let dialogflow = DialogflowCxClient::new(
        config.dialogflow_project_id.clone(),
        config.dialogflow_location.clone(),
        config.dialogflow_agent_id.clone(),
        config.dialogflow_language.clone(),
        config.dialogflow_access_token.clone(),
    );
    let web_search = GoogleSearchProvider::new(
        config.google_search_api_key.clone(),
        config.google_search_engine_id.clone(),
    );

    let state = Arc::new(AppState {
        knowledge: KnowledgeBase::new(&config.knowledge_base_path),
        booking: BookingService::new(Arc::new(InMemoryAppointmentStore::new())),
        web_search: Box::new(web_search),
        dialogflow: Box::new(dialogflow),
        config: config.clone(),
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
