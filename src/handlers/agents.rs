use axum::extract::Path;
use axum::Json;

use crate::errors::AppError;
use crate::models::agent::{all_agents, find_agent};
use crate::models::AgentDefinition;

// GET /api/agents
pub async fn list_agents() -> Json<Vec<AgentDefinition>> {
    Json(all_agents())
}

// GET /api/agents/:name
pub async fn get_agent(Path(name): Path<String>) -> Result<Json<AgentDefinition>, AppError> {
    find_agent(&name)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("agent '{name}'")))
}
