pub mod models;
pub mod schema;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::EcoBotError;
use models::{split_keywords, NewViolation, ViolationRecord};

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, EcoBotError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Database { pool })
    }

    /// Every connection to `sqlite::memory:` opens a fresh database, so the
    /// pool is pinned to a single connection that never expires.
    pub async fn new_in_memory() -> Result<Self, EcoBotError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;
        let database = Database { pool };
        database.run_migrations().await?;
        Ok(database)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<(), EcoBotError> {
        sqlx::query(schema::VIOLATIONS_SCHEMA)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Inserts catalog entries, skipping any whose violation type is already
    /// stored. Returns the number of rows actually inserted.
    pub async fn seed_violations(&self, violations: &[NewViolation]) -> Result<u64, EcoBotError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for violation in violations {
            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO violations
                (violation_type, description, law_article, punishment, authority, appeal_tips, keywords)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&violation.violation_type)
            .bind(&violation.description)
            .bind(&violation.law_article)
            .bind(&violation.punishment)
            .bind(&violation.authority)
            .bind(&violation.appeal_tips)
            .bind(violation.keywords_at_rest())
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                debug!("Violation '{}' already seeded", violation.violation_type);
            }
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        info!(
            "Seeded violation catalog: {} new of {} entries",
            inserted,
            violations.len()
        );
        Ok(inserted)
    }

    /// All records in insertion order.
    pub async fn list_violations(&self) -> Result<Vec<ViolationRecord>, EcoBotError> {
        let rows = sqlx::query(
            r#"
            SELECT id, violation_type, description, law_article, punishment,
                   authority, appeal_tips, keywords
            FROM violations
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_violation).collect())
    }

    pub async fn count_violations(&self) -> Result<i64, EcoBotError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM violations")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("total"))
    }
}

fn row_to_violation(row: &sqlx::sqlite::SqliteRow) -> ViolationRecord {
    let keywords: String = row.get("keywords");
    ViolationRecord {
        id: row.get("id"),
        violation_type: row.get("violation_type"),
        description: row.get("description"),
        law_article: row.get("law_article"),
        punishment: row.get("punishment"),
        authority: row.get("authority"),
        appeal_tips: row.get("appeal_tips"),
        keywords: split_keywords(&keywords),
    }
}
