use std::collections::HashSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::models::Appointment;

/// A displayed calendar month. `month` is 1-based like chrono's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
}

impl CalendarMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Builds a month from a zero-indexed month number. Values outside
    /// `0..12` roll into the neighbouring years.
    pub fn from_zero_indexed(year: i32, month0: i32) -> Self {
        let total = year * 12 + month0;
        Self {
            year: total.div_euclid(12),
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn zero_indexed(&self) -> i32 {
        self.month as i32 - 1
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last valid day of the month: the day before the first of the next month.
    pub fn days_in_month(&self) -> u32 {
        self.next().first_day().pred_opt().map(|d| d.day()).unwrap_or(31)
    }

    pub fn previous(&self) -> Self {
        Self::from_zero_indexed(self.year, self.zero_indexed() - 1)
    }

    pub fn next(&self) -> Self {
        Self::from_zero_indexed(self.year, self.zero_indexed() + 1)
    }

    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// e.g. `March 2024`
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// `(year, month)` query values for the month-scoped fetch, month zero padded.
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("year", self.year.to_string()),
            ("month", format!("{:02}", self.month)),
        ]
    }

    /// `yyyy-mm` prefix shared by every date string in the month.
    pub fn key_prefix(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub selected: bool,
    pub has_appointment: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: CalendarMonth,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// One cell per day of `month`. A cell is marked when its date appears in
    /// the month-scoped appointment list.
    pub fn build(month: CalendarMonth, selected: NaiveDate, appointments: &[Appointment]) -> Self {
        let marked: HashSet<String> = appointments.iter().map(|a| a.date_key()).collect();

        let cells = (1..=month.days_in_month())
            .filter_map(|day| month.date_of(day).map(|date| (day, date)))
            .map(|(day, date)| DayCell {
                day,
                date,
                selected: date == selected,
                has_appointment: marked.contains(&date.format("%Y-%m-%d").to_string()),
            })
            .collect();

        Self { month, cells }
    }

    pub fn marked_days(&self) -> Vec<u32> {
        self.cells
            .iter()
            .filter(|c| c.has_appointment)
            .map(|c| c.day)
            .collect()
    }

    pub fn selected_day(&self) -> Option<u32> {
        self.cells.iter().find(|c| c.selected).map(|c| c.day)
    }
}
