use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::ToolState;
use crate::services::booking::confirmation_message;
use crate::services::dialogflow::{query_dialogflow_cx, CxSession};
use crate::services::web_search::search_web;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ToolResponse {
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ToolState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ToolResponse {
    fn text(result: impl Into<String>, state: Option<ToolState>) -> Json<Self> {
        Json(Self {
            result: result.into(),
            state,
            session_id: None,
        })
    }
}

// POST /tools/search_knowledge_base
#[derive(Deserialize)]
pub struct KnowledgeQuery {
    pub query: String,
    #[serde(default)]
    pub state: Option<ToolState>,
}

pub async fn search_knowledge_base(
    State(state): State<Arc<AppState>>,
    Json(req): Json<KnowledgeQuery>,
) -> Json<ToolResponse> {
    let outcome = state.knowledge.search(&req.query).await;
    ToolResponse::text(outcome.to_string(), req.state)
}

// POST /tools/book_appointment
#[derive(Deserialize)]
pub struct BookAppointmentRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub appointment_date: String,
    #[serde(default)]
    pub appointment_time: String,
    pub stylist_name: Option<String>,
    #[serde(default)]
    pub state: Option<ToolState>,
}

pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookAppointmentRequest>,
) -> Json<ToolResponse> {
    let mut tool_state = req.state;
    let result = state.booking.book(
        &req.customer_name,
        &req.appointment_date,
        &req.appointment_time,
        req.stylist_name.as_deref(),
    );

    let reply = match result {
        Ok(appointment) => {
            let reply = confirmation_message(&appointment, &req.appointment_date);
            if let Some(ts) = tool_state.as_mut() {
                ts.record_booking(&appointment, &req.appointment_date);
            }
            reply
        }
        Err(e) => {
            tracing::info!(reason = %e, "booking not completed");
            e.to_string()
        }
    };

    ToolResponse::text(reply, tool_state)
}

// POST /tools/check_availability
#[derive(Deserialize)]
pub struct AvailabilityRequest {
    #[serde(default)]
    pub appointment_date: String,
    pub stylist_name: Option<String>,
    #[serde(default)]
    pub state: Option<ToolState>,
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AvailabilityRequest>,
) -> Json<ToolResponse> {
    let reply = match state.booking.check_availability(
        &req.appointment_date,
        req.stylist_name.as_deref(),
    ) {
        Ok(free) => free.to_string(),
        Err(e) => e.to_string(),
    };
    ToolResponse::text(reply, req.state)
}

// POST /tools/search_web
#[derive(Deserialize)]
pub struct WebSearchRequest {
    pub query: String,
    #[serde(default)]
    pub state: Option<ToolState>,
}

pub async fn web_search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WebSearchRequest>,
) -> Json<ToolResponse> {
    let mut tool_state = req.state;
    let reply = search_web(state.web_search.as_ref(), &req.query, tool_state.as_mut()).await;
    ToolResponse::text(reply, tool_state)
}

// POST /tools/query_dialogflow_cx
#[derive(Deserialize)]
pub struct DialogflowRequest {
    pub user_message: String,
    pub session_id: Option<String>,
}

pub async fn dialogflow(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DialogflowRequest>,
) -> Json<ToolResponse> {
    let session = match req.session_id.filter(|s| !s.trim().is_empty()) {
        Some(id) => CxSession::resume(id),
        None => CxSession::new(),
    };

    let reply = query_dialogflow_cx(state.dialogflow.as_ref(), &req.user_message, &session).await;

    Json(ToolResponse {
        result: reply,
        state: None,
        session_id: Some(session.id),
    })
}
