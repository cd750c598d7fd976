use crate::DbError;
use chrono::NaiveDate;
use core_types::{DateRange, Observation};
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use std::collections::BTreeMap;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// A row of the `life` table.
#[derive(Debug, Clone, FromRow)]
pub struct DbObservation {
    pub id: i64,
    pub date: NaiveDate,
    pub index: i16,
}

impl From<DbObservation> for Observation {
    fn from(row: DbObservation) -> Self {
        Observation {
            date: row.date,
            value: i32::from(row.index),
        }
    }
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends one observation and returns its row id.
    ///
    /// Values outside [-10, 10] are rejected before the database is touched.
    pub async fn save_observation(&self, date: NaiveDate, value: i32) -> Result<i64, DbError> {
        let obs = Observation::new(date, value)?;
        let id: i64 = sqlx::query_scalar(r#"INSERT INTO life (date, "index") VALUES ($1, $2) RETURNING id"#)
            .bind(obs.date)
            .bind(obs.value as i16)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(id, date = %obs.date, value = obs.value, "Observation recorded.");
        Ok(id)
    }

    /// Fetches every valid observation whose date falls in any of `ranges`, ordered by date.
    /// Rows matched by overlapping ranges are returned once.
    pub async fn fetch_observations(&self, ranges: &[DateRange]) -> Result<Vec<Observation>, DbError> {
        let mut rows: BTreeMap<i64, DbObservation> = BTreeMap::new();

        for range in ranges {
            let fetched = sqlx::query_as::<_, DbObservation>(
                r#"
                SELECT id, date, "index"
                FROM life
                WHERE date BETWEEN $1 AND $2
                  AND "index" BETWEEN -10 AND 10
                "#,
            )
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&self.pool)
            .await?;

            rows.extend(fetched.into_iter().map(|row| (row.id, row)));
        }

        let mut observations: Vec<Observation> = rows.into_values().map(Observation::from).collect();
        observations.sort_by_key(|o| o.date);
        tracing::debug!(count = observations.len(), "Fetched observations.");
        Ok(observations)
    }

    /// Fetches the whole history, ordered by date.
    pub async fn fetch_all_observations(&self) -> Result<Vec<Observation>, DbError> {
        let rows = sqlx::query_as::<_, DbObservation>(
            r#"SELECT id, date, "index" FROM life WHERE "index" BETWEEN -10 AND 10 ORDER BY date, id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Observation::from).collect())
    }

    /// Replaces every row inside `range` with `observations` in one transaction.
    /// Returns the number of rows deleted.
    pub async fn replace_range(
        &self,
        range: DateRange,
        observations: &[Observation],
    ) -> Result<u64, DbError> {
        if let Some(bad) = observations.iter().find(|o| !o.is_valid() || !range.contains(o.date)) {
            return Err(DbError::InvalidObservation(core_types::CoreError::InvalidInput(
                "seed observation".to_string(),
                format!("{} on {} does not fit {} ..= {}", bad.value, bad.date, range.start, range.end),
            )));
        }

        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM life WHERE date BETWEEN $1 AND $2")
            .bind(range.start)
            .bind(range.end)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        for obs in observations {
            sqlx::query(r#"INSERT INTO life (date, "index") VALUES ($1, $2)"#)
                .bind(obs.date)
                .bind(obs.value as i16)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        tracing::info!(deleted, inserted = observations.len(), "Replaced observations in range.");
        Ok(deleted)
    }
}
