use chrono::NaiveDate;
use clap::Parser;

use crate::models::DraftField;
use crate::services::agenda::{resolve_slot, TIME_SLOTS};
use crate::services::dashboard::Dashboard;
use crate::services::render;

#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "Terminal dashboard for therapist appointments")]
pub struct Args {
    /// Base URL of the appointments backend. Falls back to `AppConfig::backend_url`.
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Name shown in the greeting.
    #[arg(long, default_value = "Therapist Name")]
    pub therapist: String,

    /// Day to open on, yyyy-mm-dd. Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Prev,
    Next,
    Day(u32),
    Date(NaiveDate),
    Set(DraftField, String),
    Submit,
    Slot(&'static str),
    Move { name: String, time: String },
    Patients,
    Clear,
    Show,
    Logout,
    Help,
    Quit,
}

pub const HELP: &str = "Commands:
  prev | next                 previous / next month
  day <n>                     select a day of the displayed month
  date <yyyy-mm-dd>           jump to a date
  set <field> <value>         edit the new appointment (name, date, time, description, email, contact)
  submit                      add the new appointment
  slot <1-4 | time>           move the day's first appointment to a slot
  move <slot|time> <name>     move a named patient's appointment on this day
  patients                    show / hide all patients
  clear                       delete every appointment
  show                        redraw
  logout | help | quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let parts: Vec<&str> = line.splitn(2, ' ').collect();
        let command = parts[0].to_lowercase();
        let arg = parts.get(1).map(|s| s.trim()).filter(|s| !s.is_empty());

        match (command.as_str(), arg) {
            ("prev", None) => Ok(Command::Prev),
            ("next", None) => Ok(Command::Next),
            ("day", Some(n)) => n
                .parse()
                .map(Command::Day)
                .map_err(|_| format!("not a day number: {n}")),
            ("day", None) => Err("Usage: day <n>".to_string()),
            ("date", Some(d)) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map(Command::Date)
                .map_err(|_| format!("not a date (yyyy-mm-dd): {d}")),
            ("date", None) => Err("Usage: date <yyyy-mm-dd>".to_string()),
            ("set", Some(rest)) => {
                let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
                let field = DraftField::parse(field).ok_or_else(|| format!("unknown field: {field}"))?;
                Ok(Command::Set(field, value.trim().to_string()))
            }
            ("set", None) => Err("Usage: set <field> <value>".to_string()),
            ("submit", None) => Ok(Command::Submit),
            ("slot", Some(s)) => resolve_slot(s)
                .map(Command::Slot)
                .ok_or_else(|| format!("unknown slot, pick 1-4 or one of: {}", TIME_SLOTS.join(", "))),
            ("slot", None) => Err("Usage: slot <1-4 | time>".to_string()),
            ("move", Some(rest)) => {
                let (slot, name) = rest
                    .split_once(' ')
                    .ok_or_else(|| "Usage: move <slot|time> <name>".to_string())?;
                let time = resolve_slot(slot).map(|s| s.to_string()).unwrap_or_else(|| slot.to_string());
                Ok(Command::Move {
                    name: name.trim().to_string(),
                    time,
                })
            }
            ("move", None) => Err("Usage: move <slot|time> <name>".to_string()),
            ("patients", None) => Ok(Command::Patients),
            ("clear", None) => Ok(Command::Clear),
            ("show", None) | ("", None) => Ok(Command::Show),
            ("logout", None) => Ok(Command::Logout),
            ("help", _) => Ok(Command::Help),
            ("quit", None) | ("exit", None) => Ok(Command::Quit),
            _ => Err(format!("Unknown command: {line}. Type help for the list.")),
        }
    }
}

/// Runs one command against the dashboard and returns what to print.
pub async fn execute(dashboard: &mut Dashboard, command: Command) -> String {
    let result = match command {
        Command::Prev => dashboard.previous_month().await.map(|_| None),
        Command::Next => dashboard.next_month().await.map(|_| None),
        Command::Day(day) => dashboard.select_day(day).await.map(|_| None),
        Command::Date(date) => dashboard.select_date(date).await.map(|_| None),
        Command::Set(field, value) => {
            dashboard.update_draft(field, value);
            Ok(Some(render::render_draft(dashboard.draft())))
        }
        Command::Submit => dashboard
            .submit_draft()
            .await
            .map(|notice| Some(notice.message().to_string())),
        Command::Slot(time) => match dashboard.choose_slot(time).await {
            Ok(true) => Ok(None),
            Ok(false) => Ok(Some("No appointment to move on this day.".to_string())),
            Err(e) => Err(e),
        },
        Command::Move { name, time } => dashboard.reschedule(&name, &time).await.map(|_| None),
        Command::Patients => dashboard.toggle_roster().await.map(|_| {
            if dashboard.roster_open() {
                Some(render::render_roster(dashboard.all_patients()))
            } else {
                Some("Patient list hidden.".to_string())
            }
        }),
        Command::Clear => dashboard.clear_calendar().await.map(|notice| {
            Some(format!("{}\n\n{}", notice.message(), render::render_dashboard(dashboard)))
        }),
        Command::Show => Ok(None),
        Command::Logout => Ok(Some("Log out is not available yet.".to_string())),
        Command::Help | Command::Quit => Ok(Some(HELP.to_string())),
    };

    match result {
        Ok(Some(text)) => text,
        Ok(None) => render::render_dashboard(dashboard),
        Err(e) => format!("error: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_backend_url_is_optional() {
        let args = Args::try_parse_from(["dashboard"]).unwrap();
        assert!(args.backend_url.is_none());
        assert_eq!(args.therapist, "Therapist Name");
        assert!(args.date.is_none());

        let args = Args::try_parse_from([
            "dashboard",
            "--backend-url",
            "http://10.0.0.5:8000",
            "--date",
            "2024-03-15",
        ])
        .unwrap();
        assert_eq!(args.backend_url.as_deref(), Some("http://10.0.0.5:8000"));
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 3, 15));
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(Command::parse("prev"), Ok(Command::Prev));
        assert_eq!(Command::parse("  NEXT "), Ok(Command::Next));
        assert_eq!(Command::parse("day 15"), Ok(Command::Day(15)));
        assert!(Command::parse("day fifteen").is_err());
        assert_eq!(
            Command::parse("date 2024-03-15"),
            Ok(Command::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()))
        );
    }

    #[test]
    fn test_parse_set_keeps_spaces_in_value() {
        assert_eq!(
            Command::parse("set description first session, intake"),
            Ok(Command::Set(DraftField::Description, "first session, intake".to_string()))
        );
        assert_eq!(
            Command::parse("set email"),
            Ok(Command::Set(DraftField::Email, String::new()))
        );
        assert!(Command::parse("set phone 555").is_err());
    }

    #[test]
    fn test_parse_slots() {
        assert_eq!(Command::parse("slot 2"), Ok(Command::Slot("7:30 PM")));
        assert_eq!(Command::parse("slot 9:30 pm"), Ok(Command::Slot("9:30 PM")));
        assert!(Command::parse("slot 7").is_err());
        assert_eq!(
            Command::parse("move 3 Jane Doe"),
            Ok(Command::Move {
                name: "Jane Doe".to_string(),
                time: "8:30 PM".to_string()
            })
        );
        assert_eq!(
            Command::parse("move 17:00 Jane"),
            Ok(Command::Move {
                name: "Jane".to_string(),
                time: "17:00".to_string()
            })
        );
    }

    #[test]
    fn test_parse_unknown() {
        let err = Command::parse("launch").unwrap_err();
        assert!(err.contains("Unknown command"));
        assert_eq!(Command::parse(""), Ok(Command::Show));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
    }
}
