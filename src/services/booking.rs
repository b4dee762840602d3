use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Local, NaiveDate};

use crate::models::{is_time_slot, Appointment, Stylist, TIME_SLOTS};
use crate::store::AppointmentStore;

pub const SALON_NAME: &str = "Elegance Hair Salon & Spa";

/// How many catalog entries to quote back when a requested time isn't offered.
const SUGGESTED_SLOTS: usize = 7;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Hmm, I need your name, appointment date, and time to book. Could you please provide that?")]
    MissingInfo,

    #[error("Hmm, {requested} is not available. Available stylists are: {}.", Stylist::roster())]
    UnknownStylist { requested: String },

    #[error("Hmm, I couldn't understand the date '{date}'. Please use the format YYYY-MM-DD.")]
    InvalidDate { date: String },

    #[error("Hmm, {date} is in the past. Could you please choose a future date?")]
    PastDate { date: String },

    #[error("Hmm, {time} is not available. Available times are: {}, etc.", TIME_SLOTS[..SUGGESTED_SLOTS].join(", "))]
    UnavailableTime { time: String },

    #[error(
        "Hmm, {time} on {date} with {} is already booked. Please choose another time.",
        .stylist.map(|s| s.as_str()).unwrap_or("any stylist")
    )]
    Conflict {
        date: String,
        time: String,
        stylist: Option<Stylist>,
    },

    #[error("Hmm, I couldn't save your booking right now. Please try again.")]
    Storage(#[source] anyhow::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Hmm, I couldn't understand the date '{date}'.")]
    InvalidDate { date: String },

    #[error("Hmm, {date} is in the past. Please choose a future date.")]
    PastDate { date: String },

    #[error("Hmm, I couldn't check the schedule right now. Please try again.")]
    Storage(#[source] anyhow::Error),
}

/// Free slots on a date, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeSlots {
    pub date: String,
    pub stylist: Option<String>,
    pub slots: Vec<&'static str>,
}

impl std::fmt::Display for FreeSlots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.slots.is_empty() {
            return write!(
                f,
                "Hmm, no time slots are available on {}. Would you like to try another date?",
                self.date
            );
        }
        let stylist_info = self
            .stylist
            .as_deref()
            .map(|s| format!(" with {s}"))
            .unwrap_or_default();
        write!(
            f,
            "Available time slots{stylist_info} on {}: {}",
            self.date,
            self.slots.join(", ")
        )
    }
}

/// `requested_date` is echoed as the caller wrote it, matching the wording of
/// the rejection messages.
pub fn confirmation_message(appointment: &Appointment, requested_date: &str) -> String {
    format!(
        "Great! I've booked your appointment at {SALON_NAME}.\n\
         Name: {}\n\
         Date: {}\n\
         Time: {}\n\
         Stylist: {}\n\
         Is there anything else I can help you with?",
        appointment.customer_name,
        requested_date,
        appointment.time,
        appointment.stylist_label(),
    )
}

pub struct BookingService {
    store: Arc<dyn AppointmentStore>,
    // Held across the conflict check and the insert.
    booking_lock: Mutex<()>,
}

impl BookingService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self {
            store,
            booking_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn AppointmentStore> {
        &self.store
    }

    pub fn book(
        &self,
        customer_name: &str,
        date: &str,
        time: &str,
        stylist: Option<&str>,
    ) -> Result<Appointment, BookingError> {
        self.book_on(customer_name, date, time, stylist, today())
    }

    pub fn book_on(
        &self,
        customer_name: &str,
        date: &str,
        time: &str,
        stylist: Option<&str>,
        today: NaiveDate,
    ) -> Result<Appointment, BookingError> {
        if customer_name.is_empty() || date.is_empty() || time.is_empty() {
            return Err(BookingError::MissingInfo);
        }

        let stylist = match stylist.filter(|s| !s.is_empty()) {
            Some(requested) => Some(Stylist::from_name(requested).ok_or_else(|| {
                BookingError::UnknownStylist {
                    requested: requested.to_string(),
                }
            })?),
            None => None,
        };

        let appointment_date =
            parse_date(date).ok_or_else(|| BookingError::InvalidDate {
                date: date.to_string(),
            })?;
        if appointment_date < today {
            return Err(BookingError::PastDate {
                date: date.to_string(),
            });
        }

        if !is_time_slot(time) {
            return Err(BookingError::UnavailableTime {
                time: time.to_string(),
            });
        }

        let _guard = self
            .booking_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let conflict = self
            .store
            .find_conflict(appointment_date, time, stylist)
            .map_err(BookingError::Storage)?;
        if let Some(existing) = conflict {
            tracing::info!(
                date = %appointment_date,
                time,
                existing_stylist = existing.stylist_label(),
                "booking rejected: slot already taken"
            );
            return Err(BookingError::Conflict {
                date: date.to_string(),
                time: time.to_string(),
                stylist,
            });
        }

        let appointment = Appointment {
            customer_name: customer_name.to_string(),
            date: appointment_date,
            time: time.to_string(),
            stylist,
        };
        self.store
            .add(appointment.clone())
            .map_err(BookingError::Storage)?;

        tracing::info!(
            date = %appointment.date,
            time = %appointment.time,
            stylist = appointment.stylist_label(),
            "appointment booked"
        );

        Ok(appointment)
    }

    pub fn check_availability(
        &self,
        date: &str,
        stylist: Option<&str>,
    ) -> Result<FreeSlots, AvailabilityError> {
        self.check_availability_on(date, stylist, today())
    }

    pub fn check_availability_on(
        &self,
        date: &str,
        stylist: Option<&str>,
        today: NaiveDate,
    ) -> Result<FreeSlots, AvailabilityError> {
        let appointment_date = parse_date(date).ok_or_else(|| AvailabilityError::InvalidDate {
            date: date.to_string(),
        })?;
        if appointment_date < today {
            return Err(AvailabilityError::PastDate {
                date: date.to_string(),
            });
        }

        // Roster names are shown in canonical casing; anything else is kept
        // verbatim and simply matches no booking.
        let requested = stylist.filter(|s| !s.is_empty());
        let roster_match = requested.and_then(Stylist::from_name);
        let stylist_label = requested.map(|s| {
            roster_match
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| s.to_string())
        });

        let booked: Vec<String> = self
            .store
            .list_by_date(appointment_date)
            .map_err(AvailabilityError::Storage)?
            .into_iter()
            .filter(|a| requested.is_none() || (roster_match.is_some() && a.stylist == roster_match))
            .map(|a| a.time)
            .collect();

        let slots = TIME_SLOTS
            .iter()
            .copied()
            .filter(|slot| !booked.iter().any(|b| b == slot))
            .collect();

        Ok(FreeSlots {
            date: date.to_string(),
            stylist: stylist_label,
            slots,
        })
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryAppointmentStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn setup() -> (BookingService, Arc<InMemoryAppointmentStore>) {
        let store = Arc::new(InMemoryAppointmentStore::new());
        (BookingService::new(store.clone()), store)
    }

    #[test]
    fn test_successful_booking_confirmation() {
        let (svc, store) = setup();
        let appt = svc
            .book_on("Asha Khan", "2099-01-25", "10:00 AM", Some("Rohan"), today())
            .unwrap();
        let msg = confirmation_message(&appt, "2099-01-25");
        assert_eq!(
            msg,
            "Great! I've booked your appointment at Elegance Hair Salon & Spa.\n\
             Name: Asha Khan\n\
             Date: 2099-01-25\n\
             Time: 10:00 AM\n\
             Stylist: Rohan\n\
             Is there anything else I can help you with?"
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_info() {
        let (svc, store) = setup();
        for (name, date, time) in [
            ("", "2099-01-25", "10:00 AM"),
            ("Asha", "", "10:00 AM"),
            ("Asha", "2099-01-25", ""),
        ] {
            let err = svc.book_on(name, date, time, None, today()).unwrap_err();
            assert!(matches!(err, BookingError::MissingInfo));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_stylist_normalized() {
        let (svc, _) = setup();
        let appt = svc
            .book_on("Asha", "2099-01-25", "9:00 AM", Some("sHrUtI"), today())
            .unwrap();
        assert_eq!(appt.stylist, Some(Stylist::Shruti));
        assert!(confirmation_message(&appt, "2099-01-25").contains("Stylist: Shruti"));
    }

    #[test]
    fn test_empty_stylist_means_no_preference() {
        let (svc, _) = setup();
        let appt = svc
            .book_on("Asha", "2099-01-25", "9:00 AM", Some(""), today())
            .unwrap();
        assert_eq!(appt.stylist, None);
        assert!(confirmation_message(&appt, "2099-01-25").contains("Stylist: No preference"));
    }

    #[test]
    fn test_unknown_stylist() {
        let (svc, store) = setup();
        let err = svc
            .book_on("Asha", "2099-01-25", "9:00 AM", Some("Priya"), today())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hmm, Priya is not available. Available stylists are: Shruti, Rohan, Aasha."
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_unknown_stylist_checked_before_date() {
        let (svc, _) = setup();
        let err = svc
            .book_on("Asha", "not-a-date", "9:00 AM", Some("Priya"), today())
            .unwrap_err();
        assert!(matches!(err, BookingError::UnknownStylist { .. }));
    }

    #[test]
    fn test_padded_stylist_is_not_on_roster() {
        let (svc, store) = setup();
        let err = svc
            .book_on("Asha", "2099-01-25", "9:00 AM", Some(" Rohan"), today())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hmm,  Rohan is not available. Available stylists are: Shruti, Rohan, Aasha."
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_confirmation_echoes_requested_date() {
        let (svc, _) = setup();
        let appt = svc
            .book_on("Asha", "2099-1-5", "9:00 AM", None, today())
            .unwrap();
        assert_eq!(appt.date, NaiveDate::from_ymd_opt(2099, 1, 5).unwrap());
        assert!(confirmation_message(&appt, "2099-1-5").contains("Date: 2099-1-5\n"));
    }

    #[test]
    fn test_invalid_and_past_dates() {
        let (svc, _) = setup();
        let err = svc
            .book_on("Asha", "25/01/2099", "9:00 AM", None, today())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hmm, I couldn't understand the date '25/01/2099'. Please use the format YYYY-MM-DD."
        );

        let err = svc
            .book_on("Asha", "2020-01-01", "9:00 AM", None, today())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hmm, 2020-01-01 is in the past. Could you please choose a future date?"
        );
    }

    #[test]
    fn test_today_is_bookable() {
        let (svc, _) = setup();
        assert!(svc
            .book_on("Asha", "2026-10-19", "9:00 AM", None, today())
            .is_ok());
    }

    #[test]
    fn test_time_not_in_catalog() {
        let (svc, _) = setup();
        let err = svc
            .book_on("Asha", "2099-01-25", "1:00 PM", None, today())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hmm, 1:00 PM is not available. Available times are: 9:00 AM, 9:30 AM, 10:00 AM, 10:30 AM, 11:00 AM, 11:30 AM, 2:00 PM, etc."
        );
    }

    #[test]
    fn test_double_booking_same_stylist() {
        let (svc, store) = setup();
        svc.book_on("Asha Khan", "2099-01-25", "10:00 AM", Some("Rohan"), today())
            .unwrap();
        let err = svc
            .book_on("Jane Doe", "2099-01-25", "10:00 AM", Some("rohan"), today())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hmm, 10:00 AM on 2099-01-25 with Rohan is already booked. Please choose another time."
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_different_stylists_share_a_slot() {
        let (svc, store) = setup();
        for stylist in ["Shruti", "Rohan", "Aasha"] {
            svc.book_on("Client", "2099-01-25", "11:00 AM", Some(stylist), today())
                .unwrap();
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_no_stylist_conflicts_with_any_booking() {
        let (svc, _) = setup();
        svc.book_on("Asha", "2099-01-25", "3:00 PM", Some("Aasha"), today())
            .unwrap();
        let err = svc
            .book_on("Jane", "2099-01-25", "3:00 PM", None, today())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hmm, 3:00 PM on 2099-01-25 with any stylist is already booked. Please choose another time."
        );
    }

    #[test]
    fn test_availability_excludes_booked_times() {
        let (svc, _) = setup();
        svc.book_on("Asha Khan", "2099-01-25", "10:00 AM", Some("Rohan"), today())
            .unwrap();
        svc.book_on("Jane", "2099-01-25", "2:00 PM", Some("Shruti"), today())
            .unwrap();

        let free = svc
            .check_availability_on("2099-01-25", Some("Rohan"), today())
            .unwrap();
        assert!(!free.slots.contains(&"10:00 AM"));
        assert!(free.slots.contains(&"2:00 PM"));
        assert_eq!(free.slots.len(), TIME_SLOTS.len() - 1);
        assert!(free
            .to_string()
            .starts_with("Available time slots with Rohan on 2099-01-25: 9:00 AM, 9:30 AM, 10:30 AM"));

        let all = svc
            .check_availability_on("2099-01-25", None, today())
            .unwrap();
        assert!(!all.slots.contains(&"10:00 AM"));
        assert!(!all.slots.contains(&"2:00 PM"));
        assert!(all.to_string().starts_with("Available time slots on 2099-01-25: "));
    }

    #[test]
    fn test_availability_fully_booked() {
        let (svc, _) = setup();
        for slot in TIME_SLOTS {
            svc.book_on("Client", "2099-02-01", slot, None, today())
                .unwrap();
        }
        let free = svc
            .check_availability_on("2099-02-01", None, today())
            .unwrap();
        assert!(free.slots.is_empty());
        assert_eq!(
            free.to_string(),
            "Hmm, no time slots are available on 2099-02-01. Would you like to try another date?"
        );
    }

    #[test]
    fn test_availability_date_errors() {
        let (svc, _) = setup();
        let err = svc
            .check_availability_on("2020-01-01", None, today())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hmm, 2020-01-01 is in the past. Please choose a future date."
        );
        let err = svc
            .check_availability_on("tomorrow", None, today())
            .unwrap_err();
        assert_eq!(err.to_string(), "Hmm, I couldn't understand the date 'tomorrow'.");
    }

    #[test]
    fn test_availability_for_unlisted_stylist_shows_everything() {
        let (svc, _) = setup();
        svc.book_on("Asha", "2099-01-25", "9:00 AM", Some("Rohan"), today())
            .unwrap();
        let free = svc
            .check_availability_on("2099-01-25", Some("Priya"), today())
            .unwrap();
        assert_eq!(free.slots.len(), TIME_SLOTS.len());
        assert_eq!(free.stylist.as_deref(), Some("Priya"));
    }

    #[test]
    fn test_concurrent_bookings_for_same_slot() {
        let (svc, store) = setup();
        let svc = Arc::new(svc);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let svc = Arc::clone(&svc);
                std::thread::spawn(move || {
                    svc.book_on(
                        &format!("Client {i}"),
                        "2099-05-05",
                        "4:00 PM",
                        Some("Aasha"),
                        today(),
                    )
                    .is_ok()
                })
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }
}
