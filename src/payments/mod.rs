//! Payment events, their counterparties, and calendar grouping.

pub mod bucketing;
pub mod color;
pub mod counterparty;
pub mod event;

pub use bucketing::{
    bucket_by_month, bucket_by_week, calendar_buckets, open_total, spanning_periods, sum_amount,
    CalendarBucket,
};
pub use color::ColorTag;
pub use counterparty::Counterparty;
pub use event::{LifecycleStatus, OwnerId, PaymentEvent, SeriesDraft};
