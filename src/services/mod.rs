pub mod absence_service;
pub mod absence_type_service;
pub mod calendar_service;
pub mod holiday_service;

pub use absence_service::AbsenceService;
pub use absence_type_service::AbsenceTypeService;
pub use calendar_service::CalendarService;
pub use holiday_service::{HolidayService, HolidaySort};
