#![doc(test(attr(deny(warnings))))]

//! Execution Report ties the report engine crates together behind a single
//! error type, tracing setup, and an interactive shell for filling in
//! quarterly financial execution reports.

pub mod cli;
pub mod errors;
pub mod utils;

pub use errors::ReportError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter.
pub fn init() {
    init_with_filter(None);
}

/// Initializes global tracing, preferring `filter` over the built-in
/// directive. Only the first call has any effect.
pub fn init_with_filter(filter: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::info!("Execution report tracing initialized.");
    });
}
