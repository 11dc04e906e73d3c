pub mod http;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::DashboardError;
use crate::models::{Appointment, SlotUpdate};
use crate::services::calendar::CalendarMonth;

/// The appointments REST backend as seen by the dashboard.
#[async_trait]
pub trait AppointmentBackend: Send + Sync {
    /// `GET /api/appointments?date=yyyy-mm-dd`
    async fn appointments_on(&self, date: NaiveDate) -> Result<Vec<Appointment>, DashboardError>;

    /// `GET /api/appointments/month?year=yyyy&month=mm`
    async fn appointments_in(&self, month: CalendarMonth)
        -> Result<Vec<Appointment>, DashboardError>;

    /// `GET /api/appointments`
    async fn all_appointments(&self) -> Result<Vec<Appointment>, DashboardError>;

    /// `POST /api/appointments/add`
    async fn add(&self, appointment: &Appointment) -> Result<(), DashboardError>;

    /// `POST /api/appointments/update`
    async fn update_time(&self, update: &SlotUpdate) -> Result<(), DashboardError>;

    /// `POST /api/appointments/reset`
    async fn reset(&self) -> Result<(), DashboardError>;
}
