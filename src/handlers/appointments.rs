use std::sync::{Arc, MutexGuard};

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Appointment, SlotUpdate};
use crate::services::calendar::CalendarMonth;
use crate::state::AppState;

fn lock_db(state: &AppState) -> Result<MutexGuard<'_, Connection>, AppError> {
    state
        .db
        .lock()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("database lock poisoned")))
}

// GET /api/appointments
#[derive(Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DayQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let date = match query.date.as_deref().filter(|d| !d.is_empty()) {
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest(format!("invalid date: {raw}")))?,
        ),
        None => None,
    };

    let db = lock_db(&state)?;
    let appointments = match date {
        Some(d) => queries::get_appointments_on(&db, &d)?,
        None => queries::get_all_appointments(&db)?,
    };
    Ok(Json(appointments))
}

// GET /api/appointments/month
#[derive(Deserialize)]
pub struct MonthQuery {
    pub year: Option<String>,
    pub month: Option<String>,
}

impl MonthQuery {
    fn calendar_month(&self) -> Result<CalendarMonth, AppError> {
        let year: i32 = self
            .year
            .as_deref()
            .and_then(|y| y.trim().parse().ok())
            .ok_or_else(|| AppError::BadRequest("year must be a number".to_string()))?;
        let month: u32 = self
            .month
            .as_deref()
            .and_then(|m| m.trim().parse().ok())
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| AppError::BadRequest("month must be between 1 and 12".to_string()))?;
        Ok(CalendarMonth { year, month })
    }
}

pub async fn list_month_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let month = query.calendar_month()?;
    let db = lock_db(&state)?;
    let appointments = queries::get_appointments_with_prefix(&db, &month.key_prefix())?;
    Ok(Json(appointments))
}

// POST /api/appointments/add
pub async fn add_appointment(
    State(state): State<Arc<AppState>>,
    Json(appointment): Json<Appointment>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = {
        let db = lock_db(&state)?;
        queries::insert_appointment(&db, &appointment)?
    };
    tracing::info!(id, name = %appointment.name, date = %appointment.date, "appointment added");

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": appointment,
    })))
}

// POST /api/appointments/update
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SlotUpdate>,
) -> Result<Json<serde_json::Value>, AppError> {
    let updated = {
        let db = lock_db(&state)?;
        queries::update_appointment_time(&db, &update)?
    };

    if !updated {
        return Err(AppError::NotFound("Appointment not found".to_string()));
    }
    tracing::info!(name = %update.name, date = %update.date, time = %update.time, "appointment updated");

    Ok(Json(serde_json::json!({ "message": "Appointment updated" })))
}

// POST /api/appointments/reset
pub async fn reset_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = {
        let db = lock_db(&state)?;
        queries::delete_all_appointments(&db)?
    };
    tracing::info!(removed, "all appointments cleared");

    Ok(Json(serde_json::json!({ "message": "All appointments cleared." })))
}
