use chrono::NaiveDate;
use std::sync::Arc;

use crate::{
    api::error::{ApiError, ApiResult},
    database::Database,
    domain::ports::{AbsenceTypeLookup, EmployeeLookup},
    models::{
        AbsenceDay, AbsenceFilter, AbsenceTypeCount, CreateAbsenceRequest, UpdateAbsenceRequest,
    },
};

/// Books and maintains absence records while enforcing the two core
/// invariants: one absence per (employee, date), and never on a public
/// holiday. Every write runs the same pipeline: validate inputs, check the
/// holiday exclusion, check for duplicates, resolve references, persist.
#[derive(Clone)]
pub struct AbsenceService {
    db: Arc<Database>,
    employees: Arc<dyn EmployeeLookup>,
    absence_types: Arc<dyn AbsenceTypeLookup>,
}

impl AbsenceService {
    pub fn new(
        db: Arc<Database>,
        employees: Arc<dyn EmployeeLookup>,
        absence_types: Arc<dyn AbsenceTypeLookup>,
    ) -> Self {
        Self {
            db,
            employees,
            absence_types,
        }
    }

    pub async fn create_absence(&self, req: CreateAbsenceRequest) -> ApiResult<AbsenceDay> {
        let absence = self.validate_and_build(&req).await?;

        self.db.create_absence_day(&absence).await?;

        tracing::info!(
            "Booked absence for employee {} on {}",
            absence.employee_id,
            absence.absence_date
        );

        Ok(absence)
    }

    /// Validate every entry up front, then insert the whole batch in one
    /// transaction. One bad entry aborts the entire request.
    pub async fn create_absences_bulk(
        &self,
        requests: Vec<CreateAbsenceRequest>,
    ) -> ApiResult<Vec<AbsenceDay>> {
        if requests.is_empty() {
            return Err(ApiError::BadRequest(
                "Absence list cannot be empty".to_string(),
            ));
        }

        let mut absences = Vec::with_capacity(requests.len());
        for req in &requests {
            absences.push(self.validate_and_build(req).await?);
        }

        self.db.create_absence_days(&absences).await?;

        tracing::info!("Booked {} absences in bulk", absences.len());

        Ok(absences)
    }

    pub async fn get_absence(&self, id: &str) -> ApiResult<AbsenceDay> {
        self.db
            .get_absence_day(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("AbsenceDay not found with id: {}", id)))
    }

    /// Partial update. The holiday check re-runs only when the date changes,
    /// the duplicate check only when date or employee changes; an unchanged
    /// record never conflicts with itself.
    pub async fn update_absence(
        &self,
        id: &str,
        req: UpdateAbsenceRequest,
    ) -> ApiResult<AbsenceDay> {
        let existing = self.get_absence(id).await?;

        let target_date = req.absence_date.unwrap_or(existing.absence_date);
        let target_employee = req
            .employee_id
            .clone()
            .unwrap_or_else(|| existing.employee_id.clone());
        let target_type = req
            .absence_type_id
            .clone()
            .unwrap_or_else(|| existing.absence_type_id.clone());

        let date_changed = target_date != existing.absence_date;
        let employee_changed = target_employee != existing.employee_id;

        if date_changed {
            self.ensure_not_public_holiday(target_date).await?;
        }

        if date_changed || employee_changed {
            if self
                .db
                .exists_for_employee_on(&target_employee, target_date, Some(id))
                .await?
            {
                return Err(ApiError::Conflict(format!(
                    "Absence already exists for employee {} on date {}",
                    target_employee, target_date
                )));
            }
        }

        // Resolve references whenever the request names them
        if req.employee_id.is_some() {
            self.employees
                .find_employee_by_id(&target_employee)
                .await?
                .ok_or_else(|| {
                    ApiError::NotFound(format!("Employee not found with id: {}", target_employee))
                })?;
        }

        if req.absence_type_id.is_some() {
            self.absence_types
                .find_absence_type_by_id(&target_type)
                .await?
                .ok_or_else(|| {
                    ApiError::NotFound(format!("AbsenceType not found with id: {}", target_type))
                })?;
        }

        let expected_version = req.version.unwrap_or(existing.version);

        let updated = AbsenceDay {
            id: existing.id.clone(),
            absence_date: target_date,
            absence_type_id: target_type,
            employee_id: target_employee,
            version: expected_version,
            created_at: existing.created_at.clone(),
            updated_at: chrono::Utc::now().to_rfc3339(),
        };

        if !self.db.update_absence_day(&updated, expected_version).await? {
            return Err(match self.db.get_absence_day(id).await? {
                Some(_) => ApiError::Conflict(
                    "AbsenceDay was modified by another user, refresh and retry".to_string(),
                ),
                None => ApiError::NotFound(format!("AbsenceDay not found with id: {}", id)),
            });
        }

        tracing::info!(
            "Updated absence {} for employee {} on {}",
            updated.id,
            updated.employee_id,
            updated.absence_date
        );

        Ok(AbsenceDay {
            version: expected_version + 1,
            ..updated
        })
    }

    pub async fn delete_absence(&self, id: &str) -> ApiResult<()> {
        if !self.db.delete_absence_day(id).await? {
            return Err(ApiError::NotFound(format!(
                "AbsenceDay not found with id: {}",
                id
            )));
        }

        tracing::info!("Deleted absence {}", id);

        Ok(())
    }

    /// Filter cascade: date range, then year, then absence type, then the
    /// plain per-employee listing. The employee id is always required.
    pub async fn list_absences(&self, filter: AbsenceFilter) -> ApiResult<Vec<AbsenceDay>> {
        let employee_id = filter.employee_id.ok_or_else(|| {
            ApiError::BadRequest("At least employee_id must be specified for filtering".to_string())
        })?;

        match (filter.start, filter.end) {
            (Some(start), Some(end)) => {
                if start > end {
                    return Err(ApiError::BadRequest(
                        "Start date cannot be after end date".to_string(),
                    ));
                }
                self.db
                    .absences_by_employee_between(&employee_id, start, end)
                    .await
            }
            (Some(_), None) | (None, Some(_)) => Err(ApiError::BadRequest(
                "Both start and end must be specified for a date range".to_string(),
            )),
            (None, None) => {
                if let Some(year) = filter.year {
                    validate_year(year)?;
                    self.db
                        .absences_by_employee_and_year(&employee_id, year)
                        .await
                } else if let Some(type_id) = filter.absence_type_id {
                    self.db
                        .absences_by_employee_and_type(&employee_id, &type_id)
                        .await
                } else {
                    self.db.absences_by_employee(&employee_id).await
                }
            }
        }
    }

    /// Absence-day counts per type for one employee, optionally scoped to a
    /// calendar year.
    pub async fn count_absences_by_type(
        &self,
        employee_id: &str,
        year: Option<i32>,
    ) -> ApiResult<Vec<AbsenceTypeCount>> {
        if let Some(year) = year {
            validate_year(year)?;
        }

        self.db.count_absences_by_type(employee_id, year).await
    }

    // ----- validation pipeline -----

    async fn validate_and_build(&self, req: &CreateAbsenceRequest) -> ApiResult<AbsenceDay> {
        let date = req
            .absence_date
            .ok_or_else(|| ApiError::BadRequest("Absence date must be specified".to_string()))?;
        let employee_id = req
            .employee_id
            .as_deref()
            .ok_or_else(|| ApiError::BadRequest("Employee must be specified".to_string()))?;
        let absence_type_id = req
            .absence_type_id
            .as_deref()
            .ok_or_else(|| ApiError::BadRequest("AbsenceType must be specified".to_string()))?;

        self.ensure_not_public_holiday(date).await?;

        if self
            .db
            .exists_for_employee_on(employee_id, date, None)
            .await?
        {
            return Err(ApiError::Conflict(format!(
                "Absence already exists for employee {} on date {}",
                employee_id, date
            )));
        }

        let employee = self
            .employees
            .find_employee_by_id(employee_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("Employee not found with id: {}", employee_id))
            })?;

        let absence_type = self
            .absence_types
            .find_absence_type_by_id(absence_type_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("AbsenceType not found with id: {}", absence_type_id))
            })?;

        Ok(AbsenceDay::new(date, absence_type.id, employee.id))
    }

    async fn ensure_not_public_holiday(&self, date: NaiveDate) -> ApiResult<()> {
        if let Some(holiday) = self.db.holiday_on(date).await? {
            return Err(ApiError::BadRequest(format!(
                "Cannot create absence on public holiday: {} ({})",
                date, holiday.name
            )));
        }
        Ok(())
    }
}

fn validate_year(year: i32) -> ApiResult<()> {
    if year <= 0 {
        return Err(ApiError::BadRequest(
            "Year must be a positive number".to_string(),
        ));
    }
    Ok(())
}
