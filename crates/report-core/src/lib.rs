//! report-core
//!
//! Report logic: totals rollup, edit application, display flattening, draft
//! persistence, and the edit session that ties them together.
//! Depends on report-domain. No terminal I/O and no concrete storage medium
//! beyond the in-memory one.

pub mod autosave;
pub mod draft;
pub mod edit;
pub mod error;
pub mod format;
pub mod presentation;
pub mod session;
pub mod time;
pub mod totals;

pub use autosave::AutosaveTimer;
pub use draft::{derive_key, DraftKey, DraftMedium, DraftStore, MemoryMedium};
pub use edit::{apply_edit, parse_amount, EditRejection, RowEdit};
pub use error::{CoreError, StorageError, SubmitError};
pub use format::{format_amount, quarter_labels};
pub use presentation::{flatten, DisplayRow, ExpandedRows, FlattenedRows};
pub use session::{
    EditSession, EditState, NavigationDecision, NavigationTarget, Notice, ReportSubmitter,
    SessionOptions,
};
pub use time::{Clock, ManualClock, SystemClock};
pub use totals::{calculate_hierarchical_totals, report_totals, QuarterTotals};
