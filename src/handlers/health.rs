use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::state::AppState;

// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "dialogflow_configured": state.config.dialogflow_configured(),
        "web_search_configured": state.config.web_search_configured(),
    }))
}
