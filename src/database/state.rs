use sqlx::any::AnyRow;
use sqlx::Row;

use crate::{api::error::ApiResult, database::Database, models::State};

fn row_to_state(row: &AnyRow) -> ApiResult<State> {
    Ok(State {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl Database {
    pub async fn create_state(&self, state: &State) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO state (id, name, created_at, updated_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&state.id)
        .bind(&state.name)
        .bind(&state.created_at)
        .bind(&state.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_state(&self, id: &str) -> ApiResult<Option<State>> {
        let row = sqlx::query("SELECT id, name, created_at, updated_at FROM state WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_state).transpose()
    }

    pub async fn list_states(&self) -> ApiResult<Vec<State>> {
        let rows =
            sqlx::query("SELECT id, name, created_at, updated_at FROM state ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(row_to_state).collect()
    }

    pub async fn count_states(&self) -> ApiResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM state")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
