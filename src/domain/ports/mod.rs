pub mod absence_type_lookup;
pub mod employee_lookup;

pub use absence_type_lookup::AbsenceTypeLookup;
pub use employee_lookup::EmployeeLookup;
