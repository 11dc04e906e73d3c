use chrono::NaiveDate;

use crate::errors::DashboardError;
use crate::models::{Appointment, AppointmentDraft, DraftField, SlotUpdate};
use crate::services::agenda::DayAgenda;
use crate::services::backend::AppointmentBackend;
use crate::services::calendar::{CalendarMonth, MonthGrid};
use crate::services::roster::distinct_patients;

/// Confirmation shown to the user after a mutating action succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AppointmentAdded,
    CalendarCleared,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::AppointmentAdded => "Appointment added!",
            Notice::CalendarCleared => "All appointments cleared!",
        }
    }
}

/// View state for the therapist's appointment dashboard.
///
/// The backend is the only source of truth: every navigation re-fetches the
/// day-scoped list (`patients`) and the month-scoped list used for calendar
/// markers (`appointments`). Fetch results are tagged with the date or month
/// they were requested for and dropped if the selection moved on meanwhile.
pub struct Dashboard {
    backend: Box<dyn AppointmentBackend>,
    selected_date: NaiveDate,
    patients: Vec<Appointment>,
    appointments: Vec<Appointment>,
    all_patients: Vec<Appointment>,
    draft: AppointmentDraft,
    roster_open: bool,
}

impl Dashboard {
    pub fn new(backend: Box<dyn AppointmentBackend>, today: NaiveDate) -> Self {
        Self {
            backend,
            selected_date: today,
            patients: Vec::new(),
            appointments: Vec::new(),
            all_patients: Vec::new(),
            draft: AppointmentDraft::default(),
            roster_open: false,
        }
    }

    // ── Accessors ──

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn displayed_month(&self) -> CalendarMonth {
        CalendarMonth::of(self.selected_date)
    }

    pub fn month_label(&self) -> String {
        self.displayed_month().label()
    }

    pub fn patients(&self) -> &[Appointment] {
        &self.patients
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn all_patients(&self) -> &[Appointment] {
        &self.all_patients
    }

    pub fn draft(&self) -> &AppointmentDraft {
        &self.draft
    }

    pub fn roster_open(&self) -> bool {
        self.roster_open
    }

    pub fn month_grid(&self) -> MonthGrid {
        MonthGrid::build(self.displayed_month(), self.selected_date, &self.appointments)
    }

    pub fn agenda(&self) -> DayAgenda {
        DayAgenda::build(self.selected_date, &self.patients)
    }

    // ── Navigation ──

    /// Fetches everything for the current selection.
    pub async fn load(&mut self) -> Result<(), DashboardError> {
        self.refresh().await
    }

    pub async fn select_date(&mut self, date: NaiveDate) -> Result<(), DashboardError> {
        self.selected_date = date;
        self.refresh().await
    }

    /// Selects `day` within the displayed month.
    pub async fn select_day(&mut self, day: u32) -> Result<(), DashboardError> {
        let month = self.displayed_month();
        let date = month.date_of(day).ok_or_else(|| DashboardError::InvalidDay {
            day,
            month: month.label(),
        })?;
        self.select_date(date).await
    }

    pub async fn previous_month(&mut self) -> Result<(), DashboardError> {
        let first = self.displayed_month().previous().first_day();
        self.select_date(first).await
    }

    pub async fn next_month(&mut self) -> Result<(), DashboardError> {
        let first = self.displayed_month().next().first_day();
        self.select_date(first).await
    }

    /// Re-fetches the day list and the month markers. Both requests are
    /// always issued; the first failure is returned.
    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        let day = self.fetch_day().await;
        let month = self.fetch_month().await;
        day.and(month)
    }

    pub async fn fetch_day(&mut self) -> Result<(), DashboardError> {
        let requested = self.selected_date;
        match self.backend.appointments_on(requested).await {
            Ok(list) => {
                self.apply_day_appointments(requested, list);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, date = %requested, "day fetch failed");
                Err(e)
            }
        }
    }

    pub async fn fetch_month(&mut self) -> Result<(), DashboardError> {
        let requested = self.displayed_month();
        match self.backend.appointments_in(requested).await {
            Ok(list) => {
                self.apply_month_appointments(requested, list);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, month = %requested, "monthly fetch failed");
                Err(e)
            }
        }
    }

    /// Stores a day-scoped fetch result. Returns `false` and leaves state
    /// untouched when `requested` is no longer the selected date.
    pub fn apply_day_appointments(&mut self, requested: NaiveDate, list: Vec<Appointment>) -> bool {
        if requested != self.selected_date {
            tracing::debug!(%requested, selected = %self.selected_date, "discarding stale day response");
            return false;
        }
        self.patients = list;
        true
    }

    /// Stores a month-scoped fetch result. Returns `false` when the displayed
    /// month has changed since the request was issued.
    pub fn apply_month_appointments(
        &mut self,
        requested: CalendarMonth,
        list: Vec<Appointment>,
    ) -> bool {
        if requested != self.displayed_month() {
            tracing::debug!(%requested, "discarding stale month response");
            return false;
        }
        self.appointments = list;
        true
    }

    // ── Add appointment form ──

    pub fn update_draft(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft = std::mem::take(&mut self.draft).with(field, value);
    }

    /// Validates and posts the draft. On success the draft is reset and only
    /// the month markers are refreshed; the day list is left as it was.
    pub async fn submit_draft(&mut self) -> Result<Notice, DashboardError> {
        let appointment = self.draft.validate()?;

        if let Err(e) = self.backend.add(&appointment).await {
            tracing::error!(error = %e, name = %appointment.name, "add error");
            return Err(e);
        }
        tracing::info!(name = %appointment.name, date = %appointment.date, "appointment added");

        self.draft = AppointmentDraft::default();
        if let Err(e) = self.fetch_month().await {
            tracing::warn!(error = %e, "appointment added but calendar markers not refreshed");
        }
        Ok(Notice::AppointmentAdded)
    }

    // ── Time slots ──

    /// Moves `name`'s appointment on the selected date to `time`, then
    /// re-fetches the month markers and the day list.
    pub async fn reschedule(&mut self, name: &str, time: &str) -> Result<(), DashboardError> {
        let update = SlotUpdate {
            name: name.to_string(),
            date: self.selected_date,
            time: time.to_string(),
        };

        if let Err(e) = self.backend.update_time(&update).await {
            tracing::error!(error = %e, name = %update.name, "update error");
            return Err(e);
        }
        tracing::info!(name = %update.name, date = %update.date, time = %update.time, "appointment rescheduled");

        let month = self.fetch_month().await;
        let day = self.fetch_day().await;
        month.and(day)
    }

    /// Slot-button behaviour: reschedules the first listed appointment of
    /// the day. Returns `Ok(false)` without any request when the day is empty.
    pub async fn choose_slot(&mut self, time: &str) -> Result<bool, DashboardError> {
        let Some(target) = self.patients.first().map(|p| p.name.clone()) else {
            return Ok(false);
        };
        if self.patients.iter().filter(|p| p.name == target).count() > 1 {
            tracing::warn!(name = %target, "several appointments share this name, updating the first");
        }
        self.reschedule(&target, time).await?;
        Ok(true)
    }

    // ── Roster ──

    /// Shows or hides the patient roster. Opening it takes a fresh snapshot
    /// of every appointment, reduced to one entry per patient.
    pub async fn toggle_roster(&mut self) -> Result<(), DashboardError> {
        self.roster_open = !self.roster_open;
        if !self.roster_open {
            return Ok(());
        }

        match self.backend.all_appointments().await {
            Ok(all) => {
                self.all_patients = distinct_patients(all);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching all patients");
                Err(e)
            }
        }
    }

    // ── Clear ──

    /// Deletes every appointment on the backend and empties both local lists
    /// without re-fetching.
    pub async fn clear_calendar(&mut self) -> Result<Notice, DashboardError> {
        if let Err(e) = self.backend.reset().await {
            tracing::error!(error = %e, "reset error");
            return Err(e);
        }
        self.appointments.clear();
        self.patients.clear();
        Ok(Notice::CalendarCleared)
    }
}
