use chrono::NaiveDate;
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

use crate::api::error::{ApiError, ApiResult};

mod absence;
mod absence_type;
mod employee;
mod holiday;
mod state;

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(20)
            .min_connections(5)
            .connect(database_url)
            .await?;

        // Enable foreign keys for SQLite
        if database_url.starts_with("sqlite") {
            sqlx::query("PRAGMA foreign_keys = ON")
                .execute(&pool)
                .await?;
        }

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("migrations/sqlite").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}

/// Dates are stored as `YYYY-MM-DD` text; a row that fails to parse is a
/// data corruption, not a caller error.
pub(crate) fn parse_stored_date(value: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::Internal(format!("Invalid date stored in database: {}", value)))
}

pub(crate) fn date_to_stored(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
