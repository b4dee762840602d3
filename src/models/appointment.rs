use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const TIME_SLOTS: [&str; 14] = [
    "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "2:00 PM", "2:30 PM", "3:00 PM", "3:30 PM", "4:00 PM", "4:30 PM", "5:00 PM", "5:30 PM",
];

pub fn is_time_slot(time: &str) -> bool {
    TIME_SLOTS.contains(&time)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Stylist {
    Shruti,
    Rohan,
    Aasha,
}

impl Stylist {
    pub const ALL: [Stylist; 3] = [Stylist::Shruti, Stylist::Rohan, Stylist::Aasha];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stylist::Shruti => "Shruti",
            Stylist::Rohan => "Rohan",
            Stylist::Aasha => "Aasha",
        }
    }

    /// Case-insensitive lookup against the roster.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name))
    }

    pub fn roster() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Stylist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub customer_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub stylist: Option<Stylist>,
}

impl Appointment {
    pub fn stylist_label(&self) -> &'static str {
        self.stylist.map(|s| s.as_str()).unwrap_or("No preference")
    }

    /// Whether a request for `stylist` at this appointment's slot collides
    /// with it. No requested stylist collides with every booking.
    pub fn collides_with(&self, date: NaiveDate, time: &str, stylist: Option<Stylist>) -> bool {
        self.date == date
            && self.time == time
            && match stylist {
                None => true,
                Some(s) => self.stylist == Some(s),
            }
    }
}
