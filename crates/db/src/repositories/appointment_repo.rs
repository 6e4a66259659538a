//! Repository for the `appointments` table.

use sqlx::{PgPool, QueryBuilder};

use crate::models::appointment::{Appointment, CreateAppointment};

const COLUMNS: &str =
    "id, customer_name, appointment_date, follow_up_type, assigned_to, lead_id, created_at";

/// Provides batch-insert and listing for after-care appointments.
pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Insert a batch of appointments in a single multi-row statement so
    /// the schedule is created atomically.
    pub async fn insert_batch(
        pool: &PgPool,
        inputs: &[CreateAppointment],
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::new(
            "INSERT INTO appointments \
             (customer_name, appointment_date, follow_up_type, assigned_to, lead_id) ",
        );
        builder.push_values(inputs, |mut row, input| {
            row.push_bind(&input.customer_name)
                .push_bind(input.appointment_date)
                .push_bind(&input.follow_up_type)
                .push_bind(&input.assigned_to)
                .push_bind(input.lead_id);
        });
        builder.push(" RETURNING ");
        builder.push(COLUMNS);

        builder
            .build_query_as::<Appointment>()
            .fetch_all(pool)
            .await
    }

    /// List all appointments, soonest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointments ORDER BY appointment_date ASC, id ASC"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .fetch_all(pool)
            .await
    }
}
