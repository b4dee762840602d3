use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;

use crate::models::{Appointment, Stylist};

use super::AppointmentStore;

/// Insertion-ordered appointment list behind an `RwLock`.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.appointments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AppointmentStore for InMemoryAppointmentStore {
    fn add(&self, appointment: Appointment) -> anyhow::Result<()> {
        self.appointments
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(appointment);
        Ok(())
    }

    fn find_conflict(
        &self,
        date: NaiveDate,
        time: &str,
        stylist: Option<Stylist>,
    ) -> anyhow::Result<Option<Appointment>> {
        let appointments = self
            .appointments
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(appointments
            .iter()
            .find(|a| a.collides_with(date, time, stylist))
            .cloned())
    }

    fn list_by_date(&self, date: NaiveDate) -> anyhow::Result<Vec<Appointment>> {
        let appointments = self
            .appointments
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(appointments
            .iter()
            .filter(|a| a.date == date)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> anyhow::Result<Vec<Appointment>> {
        Ok(self
            .appointments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
