pub mod agenda;
pub mod backend;
pub mod calendar;
pub mod dashboard;
pub mod render;
pub mod roster;
