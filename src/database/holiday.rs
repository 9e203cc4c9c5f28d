use sqlx::any::AnyRow;
use sqlx::Row;

use crate::{
    api::error::{ApiError, ApiResult},
    database::{date_to_stored, parse_stored_date, Database},
    models::{PublicHoliday, StateHoliday, StateSelection},
};
use chrono::NaiveDate;

fn row_to_holiday(row: &AnyRow) -> ApiResult<PublicHoliday> {
    Ok(PublicHoliday {
        id: row.try_get("id")?,
        date: parse_stored_date(&row.try_get::<String, _>("date")?)?,
        name: row.try_get("name")?,
        is_fixed_date: row.try_get::<i64, _>("is_fixed_date")? != 0,
        sequence_no: row.try_get("sequence_no")?,
        version: row.try_get("version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

const HOLIDAY_COLUMNS: &str =
    "id, date, name, is_fixed_date, sequence_no, version, created_at, updated_at";

impl Database {
    /// Create a new public holiday
    pub async fn create_public_holiday(&self, holiday: &PublicHoliday) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO public_holiday (id, date, name, is_fixed_date, sequence_no, version, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&holiday.id)
        .bind(date_to_stored(holiday.date))
        .bind(&holiday.name)
        .bind(holiday.is_fixed_date)
        .bind(holiday.sequence_no)
        .bind(holiday.version)
        .bind(&holiday.created_at)
        .bind(&holiday.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a public holiday by ID
    pub async fn get_public_holiday(&self, id: &str) -> ApiResult<Option<PublicHoliday>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM public_holiday WHERE id = ?",
            HOLIDAY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_holiday).transpose()
    }

    /// All holidays ordered by display name
    pub async fn list_public_holidays_by_name(&self) -> ApiResult<Vec<PublicHoliday>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM public_holiday ORDER BY name ASC",
            HOLIDAY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_holiday).collect()
    }

    /// All holidays in display order (sequence number)
    pub async fn list_public_holidays_by_sequence(
        &self,
        descending: bool,
    ) -> ApiResult<Vec<PublicHoliday>> {
        let order = if descending { "DESC" } else { "ASC" };
        let rows = sqlx::query(&format!(
            "SELECT {} FROM public_holiday ORDER BY sequence_no {}",
            HOLIDAY_COLUMNS, order
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_holiday).collect()
    }

    /// Highest sequence number in use, 0 when the table is empty
    pub async fn max_sequence_no(&self) -> ApiResult<i64> {
        let max = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(sequence_no), 0) FROM public_holiday",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(max)
    }

    /// Compare-and-swap update; returns false when no row matched the
    /// expected version (stale read or missing row).
    pub async fn update_public_holiday(
        &self,
        holiday: &PublicHoliday,
        expected_version: i64,
    ) -> ApiResult<bool> {
        let result = sqlx::query(
            "UPDATE public_holiday
             SET name = ?, date = ?, is_fixed_date = ?, sequence_no = ?,
                 version = version + 1, updated_at = ?
             WHERE id = ? AND version = ?",
        )
        .bind(&holiday.name)
        .bind(date_to_stored(holiday.date))
        .bind(holiday.is_fixed_date)
        .bind(holiday.sequence_no)
        .bind(&holiday.updated_at)
        .bind(&holiday.id)
        .bind(expected_version)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a holiday; state links go with it (FK cascade)
    pub async fn delete_public_holiday(&self, id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM public_holiday WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Exact-date holidays in the inclusive range, in calendar order
    pub async fn holidays_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ApiResult<Vec<PublicHoliday>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM public_holiday WHERE date >= ? AND date <= ? ORDER BY date ASC, id ASC",
            HOLIDAY_COLUMNS
        ))
        .bind(date_to_stored(start))
        .bind(date_to_stored(end))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_holiday).collect()
    }

    /// Holidays that recur on the same month/day every year
    pub async fn fixed_holidays(&self) -> ApiResult<Vec<PublicHoliday>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM public_holiday WHERE is_fixed_date = 1 ORDER BY date ASC, id ASC",
            HOLIDAY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_holiday).collect()
    }

    /// The holiday on a given date, if any. Checks the exact date first,
    /// then fixed-date recurrence (same month-day). When more than one
    /// holiday was stored on a date, the lowest id wins.
    pub async fn holiday_on(&self, date: NaiveDate) -> ApiResult<Option<PublicHoliday>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM public_holiday WHERE date = ? ORDER BY id ASC LIMIT 1",
            HOLIDAY_COLUMNS
        ))
        .bind(date_to_stored(date))
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return Ok(Some(row_to_holiday(&row)?));
        }

        // Extract month-day from date (YYYY-MM-DD -> MM-DD)
        let month_day = date.format("%m-%d").to_string();

        let row = sqlx::query(&format!(
            "SELECT {} FROM public_holiday
             WHERE is_fixed_date = 1 AND substr(date, 6) = ?
             ORDER BY id ASC LIMIT 1",
            HOLIDAY_COLUMNS
        ))
        .bind(&month_day)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_holiday).transpose()
    }

    /// Replace the set of states observing a holiday: delete all existing
    /// links, insert one per given state id. Runs in a single transaction
    /// so readers never see a partially applied selection.
    pub async fn replace_state_selection(
        &self,
        holiday_id: &str,
        state_ids: &[String],
    ) -> ApiResult<()> {
        let mut tx = self.pool.begin().await?;

        let holiday_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM public_holiday WHERE id = ?")
                .bind(holiday_id)
                .fetch_one(&mut *tx)
                .await?;

        if holiday_count == 0 {
            return Err(ApiError::NotFound(format!(
                "PublicHoliday not found with id: {}",
                holiday_id
            )));
        }

        sqlx::query("DELETE FROM state_holiday WHERE public_holiday_id = ?")
            .bind(holiday_id)
            .execute(&mut *tx)
            .await?;

        for state_id in state_ids {
            let state_count =
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM state WHERE id = ?")
                    .bind(state_id)
                    .fetch_one(&mut *tx)
                    .await?;

            if state_count == 0 {
                return Err(ApiError::NotFound(format!("State not found: {}", state_id)));
            }

            let link = StateHoliday::new(holiday_id.to_string(), state_id.clone());
            sqlx::query(
                "INSERT INTO state_holiday (id, public_holiday_id, state_id, is_holiday)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&link.id)
            .bind(&link.public_holiday_id)
            .bind(&link.state_id)
            .bind(link.is_holiday)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Full state catalog annotated with whether each state observes the
    /// holiday, ordered by state name.
    pub async fn state_selection_view(&self, holiday_id: &str) -> ApiResult<Vec<StateSelection>> {
        let holiday_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM public_holiday WHERE id = ?")
                .bind(holiday_id)
                .fetch_one(&self.pool)
                .await?;

        if holiday_count == 0 {
            return Err(ApiError::NotFound(format!(
                "PublicHoliday not found with id: {}",
                holiday_id
            )));
        }

        let rows = sqlx::query(
            "SELECT s.id AS state_id, s.name AS state_name, COALESCE(sh.is_holiday, 0) AS is_holiday
             FROM state s
             LEFT JOIN state_holiday sh
               ON sh.state_id = s.id AND sh.public_holiday_id = ?
             ORDER BY s.name ASC",
        )
        .bind(holiday_id)
        .fetch_all(&self.pool)
        .await?;

        let mut selections = Vec::with_capacity(rows.len());
        for row in &rows {
            selections.push(StateSelection {
                state_id: row.try_get("state_id")?,
                state_name: row.try_get("state_name")?,
                selected: row.try_get::<i64, _>("is_holiday")? != 0,
            });
        }

        Ok(selections)
    }
}
