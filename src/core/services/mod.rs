pub mod calendar_service;
pub mod schedule_service;

pub use calendar_service::CalendarService;
pub use schedule_service::ScheduleService;

use crate::errors::{ScheduleError, StoreError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
