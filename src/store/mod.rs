//! Appointment storage.
//!
//! [`AppointmentStore`] is the seam between the booking service and wherever
//! appointments live. The only backend today is [`memory::InMemoryAppointmentStore`],
//! which keeps everything for the lifetime of the process.

pub mod memory;

use chrono::NaiveDate;

use crate::models::{Appointment, Stylist};

pub use memory::InMemoryAppointmentStore;

pub trait AppointmentStore: Send + Sync {
    fn add(&self, appointment: Appointment) -> anyhow::Result<()>;

    /// First existing appointment that a request for `(date, time, stylist)`
    /// would collide with.
    fn find_conflict(
        &self,
        date: NaiveDate,
        time: &str,
        stylist: Option<Stylist>,
    ) -> anyhow::Result<Option<Appointment>>;

    fn list_by_date(&self, date: NaiveDate) -> anyhow::Result<Vec<Appointment>>;

    fn list_all(&self) -> anyhow::Result<Vec<Appointment>>;
}
