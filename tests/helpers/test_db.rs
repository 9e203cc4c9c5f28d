use std::sync::Arc;

use workdesk::database::Database;
use workdesk::domain::ports::{AbsenceTypeLookup, EmployeeLookup};
use workdesk::services::AbsenceService;

pub async fn setup_test_db() -> Arc<Database> {
    // Install drivers for AnyPool (required for tests)
    sqlx::any::install_default_drivers();

    // Use file-based SQLite for tests (unique UUID per test for parallel execution)
    use uuid::Uuid;
    let temp_file = format!("test_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", temp_file);

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    setup_schema(&db).await;
    seed_test_data(&db).await;

    Arc::new(db)
}

pub fn build_absence_service(db: &Arc<Database>) -> AbsenceService {
    AbsenceService::new(
        db.clone(),
        db.clone() as Arc<dyn EmployeeLookup>,
        db.clone() as Arc<dyn AbsenceTypeLookup>,
    )
}

async fn setup_schema(db: &Database) {
    let pool = db.pool();

    sqlx::query(
        "CREATE TABLE state (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create state table");

    sqlx::query(
        "CREATE TABLE public_holiday (
            id TEXT PRIMARY KEY,
            date TEXT NOT NULL,
            name TEXT NOT NULL,
            is_fixed_date INTEGER NOT NULL DEFAULT 0,
            sequence_no INTEGER NOT NULL DEFAULT 0,
            version INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create public_holiday table");

    sqlx::query("CREATE INDEX idx_public_holiday_date ON public_holiday(date)")
        .execute(pool)
        .await
        .ok();

    sqlx::query(
        "CREATE TABLE state_holiday (
            id TEXT PRIMARY KEY,
            public_holiday_id TEXT NOT NULL,
            state_id TEXT NOT NULL,
            is_holiday INTEGER NOT NULL DEFAULT 1,
            FOREIGN KEY (public_holiday_id) REFERENCES public_holiday(id) ON DELETE CASCADE,
            FOREIGN KEY (state_id) REFERENCES state(id) ON DELETE CASCADE,
            UNIQUE(public_holiday_id, state_id)
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create state_holiday table");

    sqlx::query(
        "CREATE TABLE absence_type (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            label TEXT NOT NULL,
            hours REAL NOT NULL DEFAULT 8.0,
            is_holiday INTEGER NOT NULL DEFAULT 0,
            share_of_day REAL NOT NULL DEFAULT 1.0,
            version INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create absence_type table");

    sqlx::query(
        "CREATE TABLE employee (
            id TEXT PRIMARY KEY,
            employee_no INTEGER,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create employee table");

    sqlx::query(
        "CREATE TABLE absence_day (
            id TEXT PRIMARY KEY,
            absence_date TEXT NOT NULL,
            absence_type_id TEXT NOT NULL,
            employee_id TEXT NOT NULL,
            version INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (absence_type_id) REFERENCES absence_type(id) ON DELETE RESTRICT,
            FOREIGN KEY (employee_id) REFERENCES employee(id) ON DELETE CASCADE,
            UNIQUE(employee_id, absence_date)
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create absence_day table");

    sqlx::query("CREATE INDEX idx_absence_day_employee ON absence_day(employee_id)")
        .execute(pool)
        .await
        .ok();
}

async fn seed_test_data(db: &Database) {
    let pool = db.pool();

    // Insert a small state catalog
    sqlx::query(
        "INSERT INTO state (id, name, created_at, updated_at) VALUES
        ('state-bavaria', 'Bavaria', datetime('now'), datetime('now')),
        ('state-berlin', 'Berlin', datetime('now'), datetime('now')),
        ('state-hamburg', 'Hamburg', datetime('now'), datetime('now')),
        ('state-saxony', 'Saxony', datetime('now'), datetime('now'))",
    )
    .execute(pool)
    .await
    .expect("Failed to seed states");

    // Insert absence types
    sqlx::query(
        "INSERT INTO absence_type (id, name, label, hours, is_holiday, share_of_day, version, created_at, updated_at) VALUES
        ('type-vacation', 'Vacation', 'VAC', 8.0, 0, 1.0, 1, datetime('now'), datetime('now')),
        ('type-sick', 'Sick Leave', 'SICK', 8.0, 0, 1.0, 1, datetime('now'), datetime('now')),
        ('type-half-day', 'Half Day', 'HALF', 4.0, 0, 0.5, 1, datetime('now'), datetime('now'))",
    )
    .execute(pool)
    .await
    .expect("Failed to seed absence types");

    // Insert test employees
    sqlx::query(
        "INSERT INTO employee (id, employee_no, first_name, last_name, email, created_at, updated_at) VALUES
        ('emp-001', 1, 'Erika', 'Musterfrau', 'erika@example.com', datetime('now'), datetime('now')),
        ('emp-002', 2, 'Max', 'Mustermann', 'max@example.com', datetime('now'), datetime('now'))",
    )
    .execute(pool)
    .await
    .expect("Failed to seed employees");
}

pub async fn teardown_test_db(db: Arc<Database>) {
    // Close the connection
    drop(db);
    // Note: Test database files will be cleaned up manually or by .gitignore
}
