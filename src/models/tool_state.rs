use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use super::Appointment;

/// Advisory context the orchestrator passes along with a tool call and gets
/// back afterwards. Keys this service doesn't know about are preserved, and
/// known keys accept whatever shape the orchestrator last stored in them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_appointment: Option<Value>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "list_or_empty"
    )]
    pub searches: Vec<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// A non-list `searches` value starts a fresh history instead of failing the call.
fn list_or_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}

impl ToolState {
    /// Stores the booking with the date as the caller wrote it and the
    /// stylist as a display label ("No preference" when none was asked for).
    pub fn record_booking(&mut self, appointment: &Appointment, requested_date: &str) {
        self.last_appointment = Some(json!({
            "customer_name": appointment.customer_name,
            "date": requested_date,
            "time": appointment.time,
            "stylist": appointment.stylist_label(),
        }));
    }

    pub fn record_web_search(&mut self, query: &str) {
        self.searches
            .push(json!({ "query": query, "type": "web_search" }));
    }
}
