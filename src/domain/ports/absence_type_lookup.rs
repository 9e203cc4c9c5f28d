use crate::api::error::ApiResult;
use crate::models::AbsenceType;
use async_trait::async_trait;

/// Resolves absence-type references for the absence core.
#[async_trait]
pub trait AbsenceTypeLookup: Send + Sync {
    async fn find_absence_type_by_id(&self, id: &str) -> ApiResult<Option<AbsenceType>>;
}
