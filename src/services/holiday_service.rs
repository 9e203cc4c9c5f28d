use std::sync::Arc;

use crate::{
    api::error::{ApiError, ApiResult},
    database::Database,
    models::{
        CreateHolidayRequest, PublicHoliday, State, StateSelection, UpdateHolidayRequest,
    },
};

/// Sort order for the holiday catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidaySort {
    Name,
    Sequence,
    SequenceDesc,
}

/// Administration of the holiday catalog and the per-state observance
/// selection.
#[derive(Clone)]
pub struct HolidayService {
    db: Arc<Database>,
}

impl HolidayService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn create_holiday(&self, req: CreateHolidayRequest) -> ApiResult<PublicHoliday> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest(
                "Holiday name cannot be empty".to_string(),
            ));
        }

        let sequence_no = match req.sequence_no {
            Some(n) => n,
            None => self.next_sequence_no().await?,
        };

        let holiday = PublicHoliday::new(name.to_string(), req.date, req.is_fixed_date, sequence_no);
        self.db.create_public_holiday(&holiday).await?;

        tracing::info!("Created public holiday {} on {}", holiday.name, holiday.date);

        Ok(holiday)
    }

    pub async fn get_holiday(&self, id: &str) -> ApiResult<PublicHoliday> {
        self.db
            .get_public_holiday(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("PublicHoliday not found with id: {}", id)))
    }

    pub async fn list_holidays(&self, sort: HolidaySort) -> ApiResult<Vec<PublicHoliday>> {
        match sort {
            HolidaySort::Name => self.db.list_public_holidays_by_name().await,
            HolidaySort::Sequence => self.db.list_public_holidays_by_sequence(false).await,
            HolidaySort::SequenceDesc => self.db.list_public_holidays_by_sequence(true).await,
        }
    }

    /// Next free display position: max in use + 1, starting at 1.
    pub async fn next_sequence_no(&self) -> ApiResult<i64> {
        Ok(self.db.max_sequence_no().await? + 1)
    }

    pub async fn update_holiday(
        &self,
        id: &str,
        req: UpdateHolidayRequest,
    ) -> ApiResult<PublicHoliday> {
        let existing = self.get_holiday(id).await?;

        if let Some(name) = &req.name {
            if name.trim().is_empty() {
                return Err(ApiError::BadRequest(
                    "Holiday name cannot be empty".to_string(),
                ));
            }
        }

        let expected_version = req.version.unwrap_or(existing.version);

        let updated = PublicHoliday {
            id: existing.id.clone(),
            date: req.date.unwrap_or(existing.date),
            name: req.name.map(|n| n.trim().to_string()).unwrap_or(existing.name),
            is_fixed_date: req.is_fixed_date.unwrap_or(existing.is_fixed_date),
            sequence_no: req.sequence_no.unwrap_or(existing.sequence_no),
            version: expected_version,
            created_at: existing.created_at,
            updated_at: chrono::Utc::now().to_rfc3339(),
        };

        if !self.db.update_public_holiday(&updated, expected_version).await? {
            return Err(match self.db.get_public_holiday(id).await? {
                Some(_) => ApiError::Conflict(
                    "PublicHoliday was modified by another user, refresh and retry".to_string(),
                ),
                None => ApiError::NotFound(format!("PublicHoliday not found with id: {}", id)),
            });
        }

        tracing::info!("Updated public holiday {}", updated.name);

        Ok(PublicHoliday {
            version: expected_version + 1,
            ..updated
        })
    }

    pub async fn delete_holiday(&self, id: &str) -> ApiResult<()> {
        if !self.db.delete_public_holiday(id).await? {
            return Err(ApiError::NotFound(format!(
                "PublicHoliday not found with id: {}",
                id
            )));
        }

        tracing::info!("Deleted public holiday {}", id);

        Ok(())
    }

    /// State catalog annotated with the current observance selection.
    pub async fn get_state_selection(&self, holiday_id: &str) -> ApiResult<Vec<StateSelection>> {
        self.db.state_selection_view(holiday_id).await
    }

    /// Atomically replace which states observe the holiday.
    pub async fn save_state_selection(
        &self,
        holiday_id: &str,
        state_ids: &[String],
    ) -> ApiResult<()> {
        self.db.replace_state_selection(holiday_id, state_ids).await?;

        tracing::info!(
            "Replaced state selection for holiday {} ({} states)",
            holiday_id,
            state_ids.len()
        );

        Ok(())
    }

    pub async fn list_states(&self) -> ApiResult<Vec<State>> {
        self.db.list_states().await
    }

    pub async fn get_state(&self, id: &str) -> ApiResult<State> {
        self.db
            .get_state(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("State not found with id: {}", id)))
    }
}
