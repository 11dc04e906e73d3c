use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::models::{Appointment, SlotUpdate};

const SELECT_APPOINTMENT: &str =
    "SELECT name, date, time, description, email, contact, status FROM appointments";

// ── Appointments ──

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO appointments (name, date, time, description, email, contact, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            appt.name,
            appt.date_key(),
            appt.time,
            appt.description,
            appt.email,
            appt.contact,
            appt.status,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_all_appointments(conn: &Connection) -> anyhow::Result<Vec<Appointment>> {
    let mut stmt = conn.prepare(&format!("{SELECT_APPOINTMENT} ORDER BY id ASC"))?;
    let rows = stmt.query_map([], |row| Ok(parse_appointment_row(row)))?;

    let mut appointments = vec![];
    for row in rows {
        appointments.push(row??);
    }
    Ok(appointments)
}

pub fn get_appointments_on(conn: &Connection, date: &NaiveDate) -> anyhow::Result<Vec<Appointment>> {
    let date_str = date.format("%Y-%m-%d").to_string();
    let mut stmt = conn.prepare(&format!("{SELECT_APPOINTMENT} WHERE date = ?1 ORDER BY id ASC"))?;
    let rows = stmt.query_map(params![date_str], |row| Ok(parse_appointment_row(row)))?;

    let mut appointments = vec![];
    for row in rows {
        appointments.push(row??);
    }
    Ok(appointments)
}

/// Appointments whose date string starts with `prefix` (`yyyy-mm`).
pub fn get_appointments_with_prefix(
    conn: &Connection,
    prefix: &str,
) -> anyhow::Result<Vec<Appointment>> {
    let pattern = format!("{}%", prefix.replace('%', "").replace('_', ""));
    let mut stmt =
        conn.prepare(&format!("{SELECT_APPOINTMENT} WHERE date LIKE ?1 ORDER BY id ASC"))?;
    let rows = stmt.query_map(params![pattern], |row| Ok(parse_appointment_row(row)))?;

    let mut appointments = vec![];
    for row in rows {
        appointments.push(row??);
    }
    Ok(appointments)
}

/// Sets the time of the earliest-inserted appointment matching name and
/// date. Returns whether a record was updated.
pub fn update_appointment_time(conn: &Connection, update: &SlotUpdate) -> anyhow::Result<bool> {
    let date_str = update.date.format("%Y-%m-%d").to_string();
    let count = conn.execute(
        "UPDATE appointments SET time = ?1
         WHERE id = (SELECT id FROM appointments WHERE name = ?2 AND date = ?3 ORDER BY id ASC LIMIT 1)",
        params![update.time, update.name, date_str],
    )?;
    Ok(count > 0)
}

pub fn delete_all_appointments(conn: &Connection) -> anyhow::Result<usize> {
    let count = conn.execute("DELETE FROM appointments", [])?;
    Ok(count)
}

fn parse_appointment_row(row: &rusqlite::Row) -> anyhow::Result<Appointment> {
    let name: String = row.get(0)?;
    let date_str: String = row.get(1)?;
    let time: String = row.get(2)?;
    let description: Option<String> = row.get(3)?;
    let email: Option<String> = row.get(4)?;
    let contact: Option<String> = row.get(5)?;
    let status: Option<String> = row.get(6)?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid stored date {date_str:?}: {e}"))?;

    Ok(Appointment {
        name,
        date,
        time,
        description,
        email,
        contact,
        status,
    })
}
