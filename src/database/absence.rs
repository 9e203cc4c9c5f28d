use chrono::NaiveDate;
use sqlx::any::AnyRow;
use sqlx::Row;

use crate::{
    api::error::ApiResult,
    database::absence_type::row_to_absence_type,
    database::{date_to_stored, parse_stored_date, Database},
    models::{AbsenceDay, AbsenceTypeCount},
};

fn row_to_absence_day(row: &AnyRow) -> ApiResult<AbsenceDay> {
    Ok(AbsenceDay {
        id: row.try_get("id")?,
        absence_date: parse_stored_date(&row.try_get::<String, _>("absence_date")?)?,
        absence_type_id: row.try_get("absence_type_id")?,
        employee_id: row.try_get("employee_id")?,
        version: row.try_get("version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

const ABSENCE_COLUMNS: &str =
    "id, absence_date, absence_type_id, employee_id, version, created_at, updated_at";

impl Database {
    /// Insert a single absence record. The unique index on
    /// (employee_id, absence_date) backstops the duplicate invariant and
    /// surfaces as a conflict.
    pub async fn create_absence_day(&self, absence: &AbsenceDay) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO absence_day (id, absence_date, absence_type_id, employee_id, version, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&absence.id)
        .bind(date_to_stored(absence.absence_date))
        .bind(&absence.absence_type_id)
        .bind(&absence.employee_id)
        .bind(absence.version)
        .bind(&absence.created_at)
        .bind(&absence.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a validated batch in one transaction; any failure rolls the
    /// whole batch back.
    pub async fn create_absence_days(&self, absences: &[AbsenceDay]) -> ApiResult<()> {
        let mut tx = self.pool.begin().await?;

        for absence in absences {
            sqlx::query(
                "INSERT INTO absence_day (id, absence_date, absence_type_id, employee_id, version, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&absence.id)
            .bind(date_to_stored(absence.absence_date))
            .bind(&absence.absence_type_id)
            .bind(&absence.employee_id)
            .bind(absence.version)
            .bind(&absence.created_at)
            .bind(&absence.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    pub async fn get_absence_day(&self, id: &str) -> ApiResult<Option<AbsenceDay>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM absence_day WHERE id = ?",
            ABSENCE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_absence_day).transpose()
    }

    /// Compare-and-swap update; returns false when no row matched the
    /// expected version (stale read or missing row).
    pub async fn update_absence_day(
        &self,
        absence: &AbsenceDay,
        expected_version: i64,
    ) -> ApiResult<bool> {
        let result = sqlx::query(
            "UPDATE absence_day
             SET absence_date = ?, absence_type_id = ?, employee_id = ?,
                 version = version + 1, updated_at = ?
             WHERE id = ? AND version = ?",
        )
        .bind(date_to_stored(absence.absence_date))
        .bind(&absence.absence_type_id)
        .bind(&absence.employee_id)
        .bind(&absence.updated_at)
        .bind(&absence.id)
        .bind(expected_version)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_absence_day(&self, id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM absence_day WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn absences_by_employee(&self, employee_id: &str) -> ApiResult<Vec<AbsenceDay>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM absence_day WHERE employee_id = ? ORDER BY absence_date ASC",
            ABSENCE_COLUMNS
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_absence_day).collect()
    }

    pub async fn absences_by_employee_between(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ApiResult<Vec<AbsenceDay>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM absence_day
             WHERE employee_id = ? AND absence_date >= ? AND absence_date <= ?
             ORDER BY absence_date ASC",
            ABSENCE_COLUMNS
        ))
        .bind(employee_id)
        .bind(date_to_stored(start))
        .bind(date_to_stored(end))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_absence_day).collect()
    }

    pub async fn absences_by_employee_and_type(
        &self,
        employee_id: &str,
        absence_type_id: &str,
    ) -> ApiResult<Vec<AbsenceDay>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM absence_day
             WHERE employee_id = ? AND absence_type_id = ?
             ORDER BY absence_date ASC",
            ABSENCE_COLUMNS
        ))
        .bind(employee_id)
        .bind(absence_type_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_absence_day).collect()
    }

    pub async fn absences_by_employee_and_year(
        &self,
        employee_id: &str,
        year: i32,
    ) -> ApiResult<Vec<AbsenceDay>> {
        // Dates are stored as YYYY-MM-DD text; the year is the first 4 chars
        let rows = sqlx::query(&format!(
            "SELECT {} FROM absence_day
             WHERE employee_id = ? AND substr(absence_date, 1, 4) = ?
             ORDER BY absence_date ASC",
            ABSENCE_COLUMNS
        ))
        .bind(employee_id)
        .bind(format!("{:04}", year))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_absence_day).collect()
    }

    /// Duplicate check: is there an absence for (employee, date), other than
    /// the record identified by `excluding_id`?
    pub async fn exists_for_employee_on(
        &self,
        employee_id: &str,
        date: NaiveDate,
        excluding_id: Option<&str>,
    ) -> ApiResult<bool> {
        let count = match excluding_id {
            Some(excluded) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM absence_day
                     WHERE employee_id = ? AND absence_date = ? AND id != ?",
                )
                .bind(employee_id)
                .bind(date_to_stored(date))
                .bind(excluded)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM absence_day
                     WHERE employee_id = ? AND absence_date = ?",
                )
                .bind(employee_id)
                .bind(date_to_stored(date))
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(count > 0)
    }

    /// Absence-day counts grouped by type for one employee, optionally
    /// scoped to a calendar year.
    pub async fn count_absences_by_type(
        &self,
        employee_id: &str,
        year: Option<i32>,
    ) -> ApiResult<Vec<AbsenceTypeCount>> {
        let type_columns = "at.id AS id, at.name AS name, at.label AS label, at.hours AS hours, \
             at.is_holiday AS is_holiday, at.share_of_day AS share_of_day, \
             at.version AS version, at.created_at AS created_at, at.updated_at AS updated_at";

        let rows = match year {
            Some(year) => {
                sqlx::query(&format!(
                    "SELECT {}, COUNT(*) AS day_count
                     FROM absence_day ad
                     JOIN absence_type at ON at.id = ad.absence_type_id
                     WHERE ad.employee_id = ? AND substr(ad.absence_date, 1, 4) = ?
                     GROUP BY at.id, at.name, at.label, at.hours, at.is_holiday,
                              at.share_of_day, at.version, at.created_at, at.updated_at
                     ORDER BY at.name ASC",
                    type_columns
                ))
                .bind(employee_id)
                .bind(format!("{:04}", year))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {}, COUNT(*) AS day_count
                     FROM absence_day ad
                     JOIN absence_type at ON at.id = ad.absence_type_id
                     WHERE ad.employee_id = ?
                     GROUP BY at.id, at.name, at.label, at.hours, at.is_holiday,
                              at.share_of_day, at.version, at.created_at, at.updated_at
                     ORDER BY at.name ASC",
                    type_columns
                ))
                .bind(employee_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let mut counts = Vec::with_capacity(rows.len());
        for row in &rows {
            counts.push(AbsenceTypeCount {
                absence_type: row_to_absence_type(row)?,
                count: row.try_get("day_count")?,
            });
        }

        Ok(counts)
    }
}
