use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STATUS: &str = "Active";
pub const NOT_PROVIDED: &str = "Not provided";

/// A scheduled patient visit. `name` is the only patient identifier the
/// backend knows about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub name: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Appointment {
    pub fn new(name: impl Into<String>, date: NaiveDate, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date,
            time: time.into(),
            description: None,
            email: None,
            contact: None,
            status: None,
        }
    }

    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn status_label(&self) -> &str {
        non_empty(&self.status).unwrap_or(DEFAULT_STATUS)
    }

    pub fn description_label(&self) -> &str {
        non_empty(&self.description).unwrap_or("")
    }

    pub fn email_label(&self) -> &str {
        non_empty(&self.email).unwrap_or(NOT_PROVIDED)
    }

    pub fn contact_label(&self) -> &str {
        non_empty(&self.contact).unwrap_or(NOT_PROVIDED)
    }

    /// Long form used on patient cards, e.g. `Fri Mar 15 2024`.
    pub fn formatted_date(&self) -> String {
        self.date.format("%a %b %d %Y").to_string()
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Body of `POST /api/appointments/update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotUpdate {
    pub name: String,
    pub date: NaiveDate,
    pub time: String,
}
