//! HTTP handler implementations, one module per resource.

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod leads;
pub mod reminders;
pub mod roster;
pub mod sweep;
