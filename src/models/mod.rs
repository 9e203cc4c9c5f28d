pub mod absence;
pub mod absence_type;
pub mod calendar;
pub mod employee;
pub mod holiday;
pub mod state;

pub use absence::*;
pub use absence_type::*;
pub use calendar::*;
pub use employee::*;
pub use holiday::*;
pub use state::*;
