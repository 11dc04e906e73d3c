pub mod appointment;
pub mod draft;

pub use appointment::{Appointment, SlotUpdate};
pub use draft::{AppointmentDraft, DraftField};
