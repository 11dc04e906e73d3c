use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DashboardError;
use crate::models::Appointment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Date,
    Time,
    Description,
    Email,
    Contact,
}

impl DraftField {
    pub const ALL: [DraftField; 6] = [
        DraftField::Name,
        DraftField::Date,
        DraftField::Time,
        DraftField::Description,
        DraftField::Email,
        DraftField::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Date => "date",
            DraftField::Time => "time",
            DraftField::Description => "description",
            DraftField::Email => "email",
            DraftField::Contact => "contact",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "name" => Some(DraftField::Name),
            "date" => Some(DraftField::Date),
            "time" => Some(DraftField::Time),
            "description" => Some(DraftField::Description),
            "email" => Some(DraftField::Email),
            "contact" => Some(DraftField::Contact),
            _ => None,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, DraftField::Name | DraftField::Date | DraftField::Time)
    }
}

/// The add-appointment form as typed so far. Nothing is sent until
/// [`AppointmentDraft::validate`] succeeds and the caller submits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub name: String,
    pub date: String,
    pub time: String,
    pub description: String,
    pub email: String,
    pub contact: String,
}

impl AppointmentDraft {
    /// Returns a copy of the draft with `field` replaced by `value`.
    pub fn with(mut self, field: DraftField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = value.into();
        self
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Date => &self.date,
            DraftField::Time => &self.time,
            DraftField::Description => &self.description,
            DraftField::Email => &self.email,
            DraftField::Contact => &self.contact,
        }
    }

    pub fn is_empty(&self) -> bool {
        DraftField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        DraftField::ALL
            .iter()
            .filter(|f| f.is_required() && self.get(**f).is_empty())
            .map(|f| f.as_str())
            .collect()
    }

    /// Checks the required fields and builds the record to post. Values are
    /// sent exactly as typed.
    pub fn validate(&self) -> Result<Appointment, DashboardError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(DashboardError::MissingFields(missing));
        }

        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| DashboardError::InvalidDate(self.date.clone()))?;

        Ok(Appointment {
            name: self.name.clone(),
            date,
            time: self.time.clone(),
            description: optional(&self.description),
            email: optional(&self.email),
            contact: optional(&self.contact),
            status: None,
        })
    }

    fn slot_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Name => &mut self.name,
            DraftField::Date => &mut self.date,
            DraftField::Time => &mut self.time,
            DraftField::Description => &mut self.description,
            DraftField::Email => &mut self.email,
            DraftField::Contact => &mut self.contact,
        }
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
