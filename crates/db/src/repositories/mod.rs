mod appointment_repo;
mod lead_repo;
mod sales_person_repo;
mod session_repo;
mod stats_repo;

pub use appointment_repo::AppointmentRepo;
pub use lead_repo::LeadRepo;
pub use sales_person_repo::SalesPersonRepo;
pub use session_repo::SessionRepo;
pub use stats_repo::StatsRepo;
