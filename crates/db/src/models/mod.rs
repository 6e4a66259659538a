pub mod appointment;
pub mod lead;
pub mod sales_person;
pub mod session;
pub mod stats;
