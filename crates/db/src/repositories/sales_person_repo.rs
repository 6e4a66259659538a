//! Repository for the `sales_persons` table.

use sqlx::PgPool;

use leadflow_core::lead::LookupId;
use leadflow_core::roles::ROLE_SALES;
use leadflow_core::roster::{AgentSnapshot, AgentStatus};
use leadflow_core::types::DbId;

use crate::models::sales_person::{CreateSalesPerson, SalesPerson};

const COLUMNS: &str = "id, name, email, password_hash, role, status_id, created_at, updated_at";

/// Provides account and roster queries for sales persons.
pub struct SalesPersonRepo;

impl SalesPersonRepo {
    /// Insert a new account. New members start offline.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSalesPerson,
    ) -> Result<SalesPerson, sqlx::Error> {
        let query = format!(
            "INSERT INTO sales_persons (name, email, password_hash, role, status_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SalesPerson>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(AgentStatus::Offline.id())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SalesPerson>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sales_persons WHERE id = $1");
        sqlx::query_as::<_, SalesPerson>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by email for login. Emails are unique.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<SalesPerson>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sales_persons WHERE email = $1");
        sqlx::query_as::<_, SalesPerson>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List every account, stable order.
    pub async fn list(pool: &PgPool) -> Result<Vec<SalesPerson>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sales_persons ORDER BY id ASC");
        sqlx::query_as::<_, SalesPerson>(&query)
            .fetch_all(pool)
            .await
    }

    /// Snapshot the assignment roster: every sales-role member in stable
    /// registration order. Rotation fairness depends on this ordering
    /// staying identical between consecutive calls.
    pub async fn list_roster(pool: &PgPool) -> Result<Vec<AgentSnapshot>, sqlx::Error> {
        let rows: Vec<(DbId, String, LookupId)> = sqlx::query_as(
            "SELECT id, name, status_id FROM sales_persons
             WHERE role = $1
             ORDER BY id ASC",
        )
        .bind(ROLE_SALES)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, status_id)| {
                let online = AgentStatus::from_id(status_id) == Some(AgentStatus::Online);
                AgentSnapshot::new(id, name, online)
            })
            .collect())
    }

    /// Flip a member's online/offline status. Returns `true` if a row changed.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: AgentStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sales_persons SET status_id = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove an account. Assigned leads keep their snapshot name; the FK
    /// nulls their `assigned_sales_id`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sales_persons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
