use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::Row;

use crate::{
    api::error::ApiResult, database::Database, domain::ports::EmployeeLookup, models::Employee,
};

fn row_to_employee(row: &AnyRow) -> ApiResult<Employee> {
    Ok(Employee {
        id: row.try_get("id")?,
        employee_no: row.try_get("employee_no")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

const EMPLOYEE_COLUMNS: &str =
    "id, employee_no, first_name, last_name, email, created_at, updated_at";

impl Database {
    pub async fn create_employee(&self, employee: &Employee) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO employee (id, employee_no, first_name, last_name, email, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&employee.id)
        .bind(employee.employee_no)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(&employee.created_at)
        .bind(&employee.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_employee(&self, id: &str) -> ApiResult<Option<Employee>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM employee WHERE id = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_employee).transpose()
    }

    pub async fn list_employees(&self) -> ApiResult<Vec<Employee>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM employee ORDER BY last_name ASC, first_name ASC",
            EMPLOYEE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_employee).collect()
    }
}

#[async_trait]
impl EmployeeLookup for Database {
    async fn find_employee_by_id(&self, id: &str) -> ApiResult<Option<Employee>> {
        self.get_employee(id).await
    }
}
