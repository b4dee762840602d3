pub mod agent;
pub mod appointment;
pub mod tool_state;

pub use agent::{AgentDefinition, ToolDeclaration, ToolParameter};
pub use appointment::{is_time_slot, Appointment, Stylist, TIME_SLOTS};
pub use tool_state::ToolState;
