//! Repository for the `quotes` table.

use sqlx::{PgConnection, PgExecutor, PgPool};

use ermel_core::quote_status::OrderStatus;
use ermel_core::scheduling::INSTALLATION_SCHEDULE_LOCK_ID;
use ermel_core::submission::ValidatedQuote;
use ermel_core::types::Date;

use crate::models::quote::Quote;

/// Column list for `quotes` queries.
const COLUMNS: &str = "\
    id, customer, project, material, glass_type, dimensions, \
    estimated_cost, approved_cost, status, created_date, scheduled_date, \
    phone, phone_hash, email, notes, paid, payment_uploaded, address, \
    project_category_other, glass_type_other, color, color_other, \
    measurement_unit, width_m, height_m, width_cm, height_cm, width_ft, height_ft, \
    created_at, updated_at";

/// Provides CRUD operations for quotes.
pub struct QuoteRepo;

impl QuoteRepo {
    /// Insert a validated submission as a new `inquiry`, returning the row.
    pub async fn create(
        pool: &PgPool,
        id: &str,
        created_date: Date,
        input: &ValidatedQuote,
    ) -> Result<Quote, sqlx::Error> {
        let query = format!(
            "INSERT INTO quotes \
                (id, customer, project, material, glass_type, dimensions, \
                 estimated_cost, status, created_date, phone, phone_hash, \
                 email, notes, address, project_category_other, glass_type_other, \
                 color, color_other, measurement_unit, \
                 width_m, height_m, width_cm, height_cm, width_ft, height_ft) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
                     $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .bind(&input.customer)
            .bind(&input.project)
            .bind(&input.material)
            .bind(&input.glass_type)
            .bind(&input.dimensions)
            .bind(input.estimate.estimated_cost)
            .bind(OrderStatus::Inquiry.as_str())
            .bind(created_date)
            .bind(&input.phone)
            .bind(&input.phone_hash)
            .bind(&input.email)
            .bind(&input.notes)
            .bind(&input.address)
            .bind(&input.project_category_other)
            .bind(&input.glass_type_other)
            .bind(&input.color)
            .bind(&input.color_other)
            .bind(input.unit.as_str())
            .bind(input.width.m)
            .bind(input.height.m)
            .bind(input.width.cm)
            .bind(input.height.cm)
            .bind(input.width.ft)
            .bind(input.height.ft)
            .fetch_one(pool)
            .await
    }

    /// Find a quote by its order id.
    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<Quote>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM quotes WHERE id = $1");
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a quote and hold its row lock until the surrounding
    /// transaction ends.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: &str,
    ) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotes WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Serialize installation bookings until the surrounding transaction ends.
    pub async fn lock_installation_schedule(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(INSTALLATION_SCHEDULE_LOCK_ID)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// List quotes with an optional status filter, newest first.
    pub async fn list_filtered(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Quote>, sqlx::Error> {
        let (where_clause, param_idx) = if status.is_some() {
            ("WHERE status = $1", 2)
        } else {
            ("", 1)
        };

        let query = format!(
            "SELECT {COLUMNS} FROM quotes {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Quote>(&query);
        if let Some(s) = status {
            q = q.bind(s);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Every quote, ordered for the board: newest first within a stage.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Quote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotes ORDER BY created_at DESC");
        sqlx::query_as::<_, Quote>(&query).fetch_all(pool).await
    }

    /// Quotes already in `installation` on the given date.
    pub async fn list_installations_on<'e, E>(
        executor: E,
        date: Date,
    ) -> Result<Vec<Quote>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM quotes \
             WHERE status = $1 AND scheduled_date = $2 \
             ORDER BY id"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(OrderStatus::Installation.as_str())
            .bind(date)
            .fetch_all(executor)
            .await
    }

    /// Move a quote to `status`, optionally setting a new scheduled date.
    ///
    /// A `None` date keeps the stored one.
    pub async fn update_status<'e, E>(
        executor: E,
        id: &str,
        status: OrderStatus,
        scheduled_date: Option<Date>,
    ) -> Result<Option<Quote>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE quotes \
             SET status = $1, scheduled_date = COALESCE($2, scheduled_date), updated_at = NOW() \
             WHERE id = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(status.as_str())
            .bind(scheduled_date)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Record the admin-approved price.
    ///
    /// Both `paid` and `payment_uploaded` are cleared: a proof sent for an
    /// earlier price does not cover the new one.
    pub async fn approve_cost(
        pool: &PgPool,
        id: &str,
        approved_cost: f64,
    ) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!(
            "UPDATE quotes \
             SET approved_cost = $1, paid = FALSE, payment_uploaded = FALSE, updated_at = NOW() \
             WHERE id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(approved_cost)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flag that the customer uploaded a proof of payment.
    pub async fn mark_payment_uploaded(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!(
            "UPDATE quotes SET payment_uploaded = TRUE, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flag that the admin confirmed the payment.
    pub async fn mark_paid(pool: &PgPool, id: &str) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!(
            "UPDATE quotes SET paid = TRUE, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
