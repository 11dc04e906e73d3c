use std::collections::HashSet;

use crate::models::Appointment;

/// Reduces appointment records to one entry per patient name. The first
/// record seen for a name wins and the input order is kept.
pub fn distinct_patients(records: Vec<Appointment>) -> Vec<Appointment> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.name.clone()))
        .collect()
}
