use std::sync::Arc;

use crate::{
    api::error::{ApiError, ApiResult},
    database::Database,
    models::{AbsenceType, CreateAbsenceTypeRequest, UpdateAbsenceTypeRequest},
};

/// CRUD for the absence-type catalog (vacation, sick leave, ...).
#[derive(Clone)]
pub struct AbsenceTypeService {
    db: Arc<Database>,
}

impl AbsenceTypeService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: CreateAbsenceTypeRequest) -> ApiResult<AbsenceType> {
        if req.name.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "AbsenceType name cannot be empty".to_string(),
            ));
        }
        validate_share_of_day(req.share_of_day)?;

        let absence_type = AbsenceType::new(
            req.name.trim().to_string(),
            req.label,
            req.hours,
            req.is_holiday,
            req.share_of_day,
        );
        self.db.create_absence_type(&absence_type).await?;

        tracing::info!("Created absence type {}", absence_type.name);

        Ok(absence_type)
    }

    pub async fn get(&self, id: &str) -> ApiResult<AbsenceType> {
        self.db
            .get_absence_type(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("AbsenceType not found with id: {}", id)))
    }

    pub async fn list(&self) -> ApiResult<Vec<AbsenceType>> {
        self.db.list_absence_types().await
    }

    pub async fn update(&self, id: &str, req: UpdateAbsenceTypeRequest) -> ApiResult<AbsenceType> {
        let existing = self.get(id).await?;

        if let Some(share) = req.share_of_day {
            validate_share_of_day(share)?;
        }

        let expected_version = req.version.unwrap_or(existing.version);

        let updated = AbsenceType {
            id: existing.id.clone(),
            name: req.name.unwrap_or(existing.name),
            label: req.label.unwrap_or(existing.label),
            hours: req.hours.unwrap_or(existing.hours),
            is_holiday: req.is_holiday.unwrap_or(existing.is_holiday),
            share_of_day: req.share_of_day.unwrap_or(existing.share_of_day),
            version: expected_version,
            created_at: existing.created_at,
            updated_at: chrono::Utc::now().to_rfc3339(),
        };

        if !self.db.update_absence_type(&updated, expected_version).await? {
            return Err(match self.db.get_absence_type(id).await? {
                Some(_) => ApiError::Conflict(
                    "AbsenceType was modified by another user, refresh and retry".to_string(),
                ),
                None => ApiError::NotFound(format!("AbsenceType not found with id: {}", id)),
            });
        }

        Ok(AbsenceType {
            version: expected_version + 1,
            ..updated
        })
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        if !self.db.delete_absence_type(id).await? {
            return Err(ApiError::NotFound(format!(
                "AbsenceType not found with id: {}",
                id
            )));
        }

        tracing::info!("Deleted absence type {}", id);

        Ok(())
    }
}

fn validate_share_of_day(share: f64) -> ApiResult<()> {
    if !(share > 0.0 && share <= 1.0) {
        return Err(ApiError::BadRequest(
            "Share of day must be within (0, 1]".to_string(),
        ));
    }
    Ok(())
}
