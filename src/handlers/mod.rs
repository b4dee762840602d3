pub mod agents;
pub mod appointments;
pub mod health;
pub mod tools;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/agents", get(agents::list_agents))
        .route("/api/agents/:name", get(agents::get_agent))
        .route("/api/appointments", get(appointments::list_appointments))
        .route("/tools/search_knowledge_base", post(tools::search_knowledge_base))
        .route("/tools/book_appointment", post(tools::book_appointment))
        .route("/tools/check_availability", post(tools::check_availability))
        .route("/tools/search_web", post(tools::web_search))
        .route("/tools/query_dialogflow_cx", post(tools::dialogflow))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
