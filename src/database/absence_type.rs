use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::Row;

use crate::{
    api::error::ApiResult,
    database::Database,
    domain::ports::AbsenceTypeLookup,
    models::AbsenceType,
};

pub(crate) fn row_to_absence_type(row: &AnyRow) -> ApiResult<AbsenceType> {
    Ok(AbsenceType {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        label: row.try_get("label")?,
        hours: row.try_get("hours")?,
        is_holiday: row.try_get::<i64, _>("is_holiday")? != 0,
        share_of_day: row.try_get("share_of_day")?,
        version: row.try_get("version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

const ABSENCE_TYPE_COLUMNS: &str =
    "id, name, label, hours, is_holiday, share_of_day, version, created_at, updated_at";

impl Database {
    pub async fn create_absence_type(&self, absence_type: &AbsenceType) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO absence_type (id, name, label, hours, is_holiday, share_of_day, version, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&absence_type.id)
        .bind(&absence_type.name)
        .bind(&absence_type.label)
        .bind(absence_type.hours)
        .bind(absence_type.is_holiday)
        .bind(absence_type.share_of_day)
        .bind(absence_type.version)
        .bind(&absence_type.created_at)
        .bind(&absence_type.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_absence_type(&self, id: &str) -> ApiResult<Option<AbsenceType>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM absence_type WHERE id = ?",
            ABSENCE_TYPE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_absence_type).transpose()
    }

    pub async fn list_absence_types(&self) -> ApiResult<Vec<AbsenceType>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM absence_type ORDER BY name ASC",
            ABSENCE_TYPE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_absence_type).collect()
    }

    pub async fn update_absence_type(
        &self,
        absence_type: &AbsenceType,
        expected_version: i64,
    ) -> ApiResult<bool> {
        let result = sqlx::query(
            "UPDATE absence_type
             SET name = ?, label = ?, hours = ?, is_holiday = ?, share_of_day = ?,
                 version = version + 1, updated_at = ?
             WHERE id = ? AND version = ?",
        )
        .bind(&absence_type.name)
        .bind(&absence_type.label)
        .bind(absence_type.hours)
        .bind(absence_type.is_holiday)
        .bind(absence_type.share_of_day)
        .bind(&absence_type.updated_at)
        .bind(&absence_type.id)
        .bind(expected_version)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_absence_type(&self, id: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM absence_type WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AbsenceTypeLookup for Database {
    async fn find_absence_type_by_id(&self, id: &str) -> ApiResult<Option<AbsenceType>> {
        self.get_absence_type(id).await
    }
}
