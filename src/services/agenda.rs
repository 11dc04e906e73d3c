use chrono::NaiveDate;

use crate::models::Appointment;

/// Fixed evening slots offered for rescheduling.
pub const TIME_SLOTS: [&str; 4] = ["6:30 PM", "7:30 PM", "8:30 PM", "9:30 PM"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotButton {
    pub time: &'static str,
    pub selected: bool,
}

/// The selected day's patient cards and slot buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAgenda {
    pub date: NaiveDate,
    pub cards: Vec<Appointment>,
    pub slots: Vec<SlotButton>,
    first: Option<Appointment>,
}

impl DayAgenda {
    /// `patients` is the day-scoped fetch result. Cards are re-filtered to
    /// `date` in case the backend returned other days; slot highlighting
    /// follows the first entry of the unfiltered list.
    pub fn build(date: NaiveDate, patients: &[Appointment]) -> Self {
        let cards: Vec<Appointment> = patients.iter().filter(|p| p.date == date).cloned().collect();
        let first = patients.first().cloned();
        let first_time = first.as_ref().map(|p| p.time.as_str());

        let slots = TIME_SLOTS
            .iter()
            .map(|&time| SlotButton {
                time,
                selected: first_time == Some(time),
            })
            .collect();

        Self {
            date,
            cards,
            slots,
            first,
        }
    }

    /// True when the day-scoped fetch returned nothing at all.
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// The appointment the slot buttons reschedule.
    pub fn first_appointment(&self) -> Option<&Appointment> {
        self.first.as_ref()
    }

    pub fn selected_slot(&self) -> Option<&'static str> {
        self.slots.iter().find(|s| s.selected).map(|s| s.time)
    }
}

/// Resolves a slot given either its 1-based position or its label.
pub fn resolve_slot(input: &str) -> Option<&'static str> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| TIME_SLOTS.get(i)).copied();
    }
    TIME_SLOTS
        .iter()
        .find(|s| s.eq_ignore_ascii_case(input))
        .copied()
}
