//! report-domain
//!
//! Pure data types for quarterly execution reports: the line-item tree,
//! report payloads, drafts, and the templates a new report starts from.
//! No I/O, no timers, no storage.

pub mod catalog;
pub mod report;
pub mod row;
pub mod template;

pub use catalog::*;
pub use report::*;
pub use row::*;
pub use template::*;
