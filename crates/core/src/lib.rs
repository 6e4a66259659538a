//! Domain logic for the LeadFlow CRM.
//!
//! Everything in this crate is pure: lead classification types, the
//! assignment policy with its round-robin cursor, the idle-lead sweep
//! planner, reminder predicates, and the after-care appointment schedule.
//! No I/O happens here -- the `leadflow-api` crate wires these decisions to
//! the repositories in `leadflow-db`.

pub mod appointments;
pub mod assignment;
pub mod error;
pub mod lead;
pub mod reminders;
pub mod roles;
pub mod roster;
pub mod sweep;
pub mod types;
