#![doc(test(attr(deny(warnings))))]

//! Commish Core expands commission charges into dated payment events and
//! groups them into calendar weeks and months with per-period totals.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod display;
pub mod documents;
pub mod errors;
pub mod payments;
pub mod schedule;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Commish core tracing initialized.");
    });
}
