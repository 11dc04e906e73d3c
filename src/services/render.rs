use std::fmt::Write;

use chrono::{Datelike, Weekday};

use crate::models::{Appointment, AppointmentDraft, DraftField};
use crate::services::agenda::DayAgenda;
use crate::services::calendar::MonthGrid;
use crate::services::dashboard::Dashboard;

pub fn render_header(therapist: &str) -> String {
    format!("Hey \"{therapist}\", which patient are you tending to today?")
}

/// Renders the month as rows of seven, Monday first. The selected day is
/// bracketed and days with appointments carry a `*`.
pub fn render_month_grid(grid: &MonthGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:^35}", grid.month.label());
    let _ = writeln!(out, " Mon  Tue  Wed  Thu  Fri  Sat  Sun");

    let offset = grid
        .cells
        .first()
        .map(|c| c.date.weekday().num_days_from_monday() as usize)
        .unwrap_or(0);
    let mut line = "     ".repeat(offset);

    for cell in &grid.cells {
        let marker = if cell.has_appointment { '*' } else { ' ' };
        let label = if cell.selected {
            format!("[{:>2}]{marker}", cell.day)
        } else {
            format!(" {:>2} {marker}", cell.day)
        };
        line.push_str(&label);

        if cell.date.weekday() == Weekday::Sun {
            let _ = writeln!(out, "{}", line.trim_end());
            line.clear();
        }
    }
    if !line.trim().is_empty() {
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

pub fn render_patient_card(p: &Appointment) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {}", p.name);
    let _ = writeln!(out, "    status:  {}", p.status_label());
    if !p.description_label().is_empty() {
        let _ = writeln!(out, "    notes:   {}", p.description_label());
    }
    let _ = writeln!(out, "    date:    {}", p.formatted_date());
    let _ = writeln!(out, "    time:    {}", p.time);
    let _ = writeln!(out, "    email:   {}", p.email_label());
    let _ = writeln!(out, "    contact: {}", p.contact_label());
    out
}

pub fn render_agenda(agenda: &DayAgenda) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", agenda.date.format("%a %b %d %Y"));

    if agenda.is_empty() {
        let _ = writeln!(out, "  No appointments scheduled.");
    } else {
        for card in &agenda.cards {
            out.push_str(&render_patient_card(card));
        }
    }

    let slots: Vec<String> = agenda
        .slots
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if s.selected {
                format!("{}) [{}]", i + 1, s.time)
            } else {
                format!("{}) {}", i + 1, s.time)
            }
        })
        .collect();
    let _ = writeln!(out, "  slots: {}", slots.join("  "));
    out
}

pub fn render_roster(patients: &[Appointment]) -> String {
    let mut out = String::from("All Patients\n");
    if patients.is_empty() {
        out.push_str("  No patients found.\n");
        return out;
    }
    for p in patients {
        let _ = writeln!(out, "  {} ({} {})", p.name, p.date_key(), p.time);
        if !p.description_label().is_empty() {
            let _ = writeln!(out, "    {}", p.description_label());
        }
    }
    out
}

pub fn render_draft(draft: &AppointmentDraft) -> String {
    let mut out = String::from("Add Appointment\n");
    for field in DraftField::ALL {
        let required = if field.is_required() { "*" } else { " " };
        let _ = writeln!(out, "  {:<12}{required} {}", field.as_str(), draft.get(field));
    }
    out
}

/// Full screen: calendar, agenda, roster (when open) and the add form.
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    out.push_str(&render_month_grid(&dashboard.month_grid()));
    out.push('\n');
    out.push_str(&render_agenda(&dashboard.agenda()));
    if dashboard.roster_open() {
        out.push('\n');
        out.push_str(&render_roster(dashboard.all_patients()));
    }
    out.push('\n');
    out.push_str(&render_draft(dashboard.draft()));
    out
}
