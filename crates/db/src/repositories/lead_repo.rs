//! Repository for the `leads` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use leadflow_core::lead::CallStatus;
use leadflow_core::types::{DbId, Timestamp};

use crate::models::lead::{CreateLead, Lead, UpdateLead};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, phone, birth_date, address, \
                       program_id, status_id, assigned_sales_id, assigned_sales_name, \
                       sale_value, notes, follow_up_date, appointment_date, \
                       admin_submitter, created_at, updated_at";

/// Provides CRUD and scanner queries for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead, returning the created row.
    ///
    /// New leads always start in the initial call status.
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (first_name, last_name, phone, birth_date, address, \
                                program_id, status_id, assigned_sales_id, \
                                assigned_sales_name, admin_submitter)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.phone)
            .bind(input.birth_date)
            .bind(&input.address)
            .bind(input.program_id)
            .bind(CallStatus::INITIAL.id())
            .bind(input.assigned_sales_id)
            .bind(&input.assigned_sales_name)
            .bind(&input.admin_submitter)
            .fetch_one(pool)
            .await
    }

    /// Find a lead by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Duplicate-phone pre-check: find a lead holding this exact phone.
    pub async fn find_by_phone(pool: &PgPool, phone: &str) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE phone = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// List all leads, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads ORDER BY created_at DESC");
        sqlx::query_as::<_, Lead>(&query).fetch_all(pool).await
    }

    /// List a salesperson's open pipeline (terminal statuses excluded),
    /// newest first.
    pub async fn list_open_for_sales(
        pool: &PgPool,
        sales_id: DbId,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads
             WHERE assigned_sales_id = $1 AND status_id NOT IN ($2, $3)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(sales_id)
            .bind(CallStatus::ClosedWon.id())
            .bind(CallStatus::ClosedLost.id())
            .fetch_all(pool)
            .await
    }

    /// Update workflow fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLead,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET
                status_id = COALESCE($2, status_id),
                notes = COALESCE($3, notes),
                sale_value = COALESCE($4, sale_value),
                follow_up_date = COALESCE($5, follow_up_date),
                appointment_date = COALESCE($6, appointment_date),
                address = COALESCE($7, address),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(input.status_id)
            .bind(&input.notes)
            .bind(input.sale_value)
            .bind(input.follow_up_date)
            .bind(input.appointment_date)
            .bind(&input.address)
            .fetch_optional(pool)
            .await
    }

    /// Move a lead to a new owner. Returns `true` if the row was updated.
    pub async fn reassign(
        pool: &PgPool,
        id: DbId,
        new_sales_id: DbId,
        new_sales_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE leads SET
                assigned_sales_id = $2,
                assigned_sales_name = $3,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(new_sales_id)
        .bind(new_sales_name)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a lead (explicit admin action only).
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Scanner: leads still `Uncalled` created before `cutoff`, oldest first.
    pub async fn list_stale_uncalled(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads
             WHERE status_id = $1 AND created_at < $2
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(CallStatus::Uncalled.id())
            .bind(cutoff)
            .fetch_all(pool)
            .await
    }

    /// Scanner: non-terminal leads whose follow-up is due on `today`.
    pub async fn list_due_follow_ups(
        pool: &PgPool,
        today: NaiveDate,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads
             WHERE follow_up_date = $1 AND status_id NOT IN ($2, $3)
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(today)
            .bind(CallStatus::ClosedWon.id())
            .bind(CallStatus::ClosedLost.id())
            .fetch_all(pool)
            .await
    }

    /// Scanner: leads whose birthday (month + day, year ignored) matches.
    pub async fn list_birthdays_on(
        pool: &PgPool,
        month: u32,
        day: u32,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads
             WHERE birth_date IS NOT NULL
               AND EXTRACT(MONTH FROM birth_date) = $1
               AND EXTRACT(DAY FROM birth_date) = $2
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(month as i32)
            .bind(day as i32)
            .fetch_all(pool)
            .await
    }

    /// Scanner: leads whose birthday falls anywhere in `month`.
    pub async fn list_birthdays_in_month(
        pool: &PgPool,
        month: u32,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads
             WHERE birth_date IS NOT NULL
               AND EXTRACT(MONTH FROM birth_date) = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(month as i32)
            .fetch_all(pool)
            .await
    }
}
