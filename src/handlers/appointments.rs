use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AppointmentsQuery {
    pub date: Option<String>,
}

#[derive(Serialize)]
pub struct AppointmentResponse {
    customer_name: String,
    date: String,
    time: String,
    stylist: String,
}

// GET /api/appointments
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AppointmentsQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let store = state.booking.store();
    let appointments = match query.date.as_deref().filter(|d| !d.is_empty()) {
        Some(d) => {
            let date = NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest(format!("invalid date '{d}', expected YYYY-MM-DD")))?;
            store.list_by_date(date)?
        }
        None => store.list_all()?,
    };

    let response = appointments
        .into_iter()
        .map(|a| AppointmentResponse {
            stylist: a.stylist_label().to_string(),
            customer_name: a.customer_name,
            date: a.date.format("%Y-%m-%d").to_string(),
            time: a.time,
        })
        .collect();

    Ok(Json(response))
}
