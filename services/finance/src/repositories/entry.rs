//! PostgreSQL entry repository

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use tracing::{debug, info};

use super::EntryRepository;
use crate::models::{Entry, EntryStatus, EntryType};

const ENTRY_COLUMNS: &str =
    "id, description, month, year, user_id, amount, registered_on, type, status";

/// Entry repository
#[derive(Clone)]
pub struct PgEntryRepository {
    pool: PgPool,
}

impl PgEntryRepository {
    /// Create a new entry repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, entry: &Entry) -> DatabaseResult<Entry> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO entries (description, month, year, user_id, amount, registered_on, type, status)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, CURRENT_DATE), $7, $8)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(&entry.description)
        .bind(entry.month)
        .bind(entry.year)
        .bind(entry.user_id)
        .bind(entry.amount)
        .bind(entry.registered_on)
        .bind(entry.entry_type.map(|t| t.as_str()))
        .bind(entry.status.map(|s| s.as_str()))
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        entry_from_row(&row)
    }

    async fn update(&self, id: i64, entry: &Entry) -> DatabaseResult<Entry> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(&format!(
            r#"
            UPDATE entries
            SET description = $2, month = $3, year = $4, user_id = $5, amount = $6,
                registered_on = COALESCE($7, registered_on), type = $8, status = $9
            WHERE id = $1
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&entry.description)
        .bind(entry.month)
        .bind(entry.year)
        .bind(entry.user_id)
        .bind(entry.amount)
        .bind(entry.registered_on)
        .bind(entry.entry_type.map(|t| t.as_str()))
        .bind(entry.status.map(|s| s.as_str()))
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Err(DatabaseError::NotFound(format!("entry {}", id)));
        };
        tx.commit().await?;

        entry_from_row(&row)
    }
}

fn entry_from_row(row: &PgRow) -> DatabaseResult<Entry> {
    let entry_type = row
        .try_get::<Option<String>, _>("type")?
        .map(|t| t.parse::<EntryType>())
        .transpose()
        .map_err(|e| DatabaseError::Decode(e.to_string()))?;
    let status = row
        .try_get::<Option<String>, _>("status")?
        .map(|s| s.parse::<EntryStatus>())
        .transpose()
        .map_err(|e| DatabaseError::Decode(e.to_string()))?;

    Ok(Entry {
        id: Some(row.try_get("id")?),
        description: row.try_get("description")?,
        month: row.try_get("month")?,
        year: row.try_get("year")?,
        user_id: row.try_get("user_id")?,
        amount: row.try_get("amount")?,
        registered_on: row.try_get("registered_on")?,
        entry_type,
        status,
    })
}

/// Append `AND column = value` for every attribute set on the filter
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Entry) {
    if let Some(id) = filter.id {
        builder.push(" AND id = ").push_bind(id);
    }
    if let Some(description) = &filter.description {
        builder
            .push(" AND description = ")
            .push_bind(description.clone());
    }
    if let Some(month) = filter.month {
        builder.push(" AND month = ").push_bind(month);
    }
    if let Some(year) = filter.year {
        builder.push(" AND year = ").push_bind(year);
    }
    if let Some(user_id) = filter.user_id {
        builder.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(amount) = filter.amount {
        builder.push(" AND amount = ").push_bind(amount);
    }
    if let Some(registered_on) = filter.registered_on {
        builder.push(" AND registered_on = ").push_bind(registered_on);
    }
    if let Some(entry_type) = filter.entry_type {
        builder.push(" AND type = ").push_bind(entry_type.as_str());
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
}

#[async_trait]
impl EntryRepository for PgEntryRepository {
    async fn save(&self, entry: &Entry) -> DatabaseResult<Entry> {
        match entry.id {
            Some(id) => {
                info!("Updating entry: {}", id);
                self.update(id, entry).await
            }
            None => {
                info!("Creating new entry for user: {:?}", entry.user_id);
                self.insert(entry).await
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Entry>> {
        info!("Finding entry by ID: {}", id);

        let row = sqlx::query(&format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(entry_from_row).transpose()
    }

    async fn find_all(&self) -> DatabaseResult<Vec<Entry>> {
        let rows = sqlx::query(&format!("SELECT {ENTRY_COLUMNS} FROM entries ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(entry_from_row).collect()
    }

    async fn find_by_filter(&self, filter: &Entry) -> DatabaseResult<Vec<Entry>> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE TRUE"));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY id");

        debug!("Searching entries: {}", builder.sql());

        let rows = builder.build().fetch_all(&self.pool).await?;

        rows.iter().map(entry_from_row).collect()
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        info!("Deleting entry: {}", id);

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn balance_by_user_type_and_status(
        &self,
        user_id: i64,
        entry_type: EntryType,
        status: EntryStatus,
    ) -> DatabaseResult<Option<Decimal>> {
        let sum: Option<Option<Decimal>> = sqlx::query_scalar(
            r#"
            SELECT SUM(e.amount)
            FROM entries e
            JOIN users u ON u.id = e.user_id
            WHERE u.id = $1 AND e.type = $2 AND e.status = $3
            GROUP BY u.id
            "#,
        )
        .bind(user_id)
        .bind(entry_type.as_str())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(sum.flatten())
    }
}
