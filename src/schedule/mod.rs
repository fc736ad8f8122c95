//! Recurrence expansion and calendar arithmetic for payment schedules.

pub mod calendar;
pub mod local_date;
pub mod plan;
pub mod recurrence;

pub use calendar::{add_months, week_start, Granularity, MonthKey, PeriodKey, WeekKey};
pub use local_date::parse_local_date;
pub use plan::{ChargePlan, PlanForm, DEFAULT_MAX_INSTALLMENTS};
pub use recurrence::{final_date, generate_schedule, RecurrenceKind};
