use crate::api::error::ApiResult;
use crate::models::Employee;
use async_trait::async_trait;

/// Resolves employee references for the absence core. The full employee
/// module lives outside this service; only id-based lookup crosses the seam.
#[async_trait]
pub trait EmployeeLookup: Send + Sync {
    async fn find_employee_by_id(&self, id: &str) -> ApiResult<Option<Employee>>;
}
