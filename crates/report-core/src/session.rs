//! The edit session: owns the report tree while a user works on it and
//! decides when it is persisted.
//!
//! A session is `Clean` until the first accepted edit and `Dirty` from then on
//! until a permanent save succeeds. While dirty, every edit pushes the
//! autosave deadline back; the embedding event loop calls
//! [`EditSession::poll_autosave`] and the draft is written once the deadline
//! passes. Outcomes the user should hear about are queued as [`Notice`]s.

use std::sync::Arc;

use chrono::Duration;
use report_domain::{
    duplicate_ids, generate_empty_template, FinancialReportData, FinancialRow, ReportHeader,
    ReportMetadata, Selection,
};
use uuid::Uuid;

use crate::{
    autosave::{AutosaveTimer, DEFAULT_AUTOSAVE_DELAY_SECS},
    draft::{derive_key, DraftKey, DraftStore},
    edit::{apply_edit, EditRejection, RowEdit},
    error::{CoreError, SubmitError},
    presentation::{flatten, ExpandedRows, FlattenedRows},
    time::Clock,
    totals::calculate_hierarchical_totals,
};

pub const DEFAULT_FISCAL_YEAR: &str = "2023";

/// Receives finished reports.
pub trait ReportSubmitter {
    fn submit(&mut self, report: &FinancialReportData) -> Result<(), SubmitError>;
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Starting rows; the empty template for `fiscal_year` when `None`.
    pub rows: Option<Vec<FinancialRow>>,
    pub fiscal_year: String,
    pub read_only: bool,
    pub selection: Selection,
    pub header: ReportHeader,
    /// Route the session is displayed on; leaving it is guarded.
    pub route: String,
    pub autosave_delay: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            rows: None,
            fiscal_year: DEFAULT_FISCAL_YEAR.to_string(),
            read_only: false,
            selection: Selection::default(),
            header: ReportHeader::default(),
            route: "/".to_string(),
            autosave_delay: Duration::seconds(DEFAULT_AUTOSAVE_DELAY_SECS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Clean,
    Dirty,
}

/// User-visible outcome of a session operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    DraftSaved,
    Autosaved,
    DraftSaveFailed(String),
    DraftLoadFailed(String),
    DraftRestored { timestamp: i64 },
    Saved,
    SaveFailed(String),
    DraftRemoveFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    /// The whole program is going away.
    Unload,
    Route(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    ConfirmRequired,
}

pub struct EditSession {
    id: Uuid,
    rows: Vec<FinancialRow>,
    expanded: ExpandedRows,
    state: EditState,
    read_only: bool,
    fiscal_year: String,
    selection: Selection,
    header: ReportHeader,
    route: String,
    form_visible: bool,
    closed: bool,
    drafts: DraftStore,
    clock: Arc<dyn Clock>,
    autosave: AutosaveTimer,
    notices: Vec<Notice>,
}

impl EditSession {
    /// Opens a session. Unless read-only, a live draft for the current
    /// selection replaces the starting rows.
    pub fn open(
        options: SessionOptions,
        drafts: DraftStore,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CoreError> {
        let SessionOptions {
            rows,
            fiscal_year,
            read_only,
            selection,
            header,
            route,
            autosave_delay,
        } = options;

        let initial = rows.unwrap_or_else(|| generate_empty_template(&fiscal_year));
        ensure_unique_ids(&initial)?;

        let mut session = Self {
            id: Uuid::new_v4(),
            rows: calculate_hierarchical_totals(&initial),
            expanded: ExpandedRows::new(),
            state: EditState::Clean,
            read_only,
            fiscal_year,
            selection,
            header,
            route,
            form_visible: read_only,
            closed: false,
            drafts,
            clock,
            autosave: AutosaveTimer::new(autosave_delay),
            notices: Vec::new(),
        };
        tracing::info!(
            session = %session.id,
            read_only,
            fiscal_year = %session.fiscal_year,
            "edit session opened"
        );
        session.restore_draft();
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn rows(&self) -> &[FinancialRow] {
        &self.rows
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == EditState::Dirty
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn fiscal_year(&self) -> &str {
        &self.fiscal_year
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn header(&self) -> &ReportHeader {
        &self.header
    }

    pub fn title(&self) -> String {
        self.header.title(&self.fiscal_year)
    }

    pub fn expanded(&self) -> &ExpandedRows {
        &self.expanded
    }

    pub fn autosave(&self) -> &AutosaveTimer {
        &self.autosave
    }

    /// Draft key for the current selection.
    pub fn draft_key(&self) -> DraftKey {
        derive_key(
            self.selection.health_center.as_deref(),
            self.selection.reporting_period.as_deref(),
        )
    }

    /// Applies a user edit, recomputes totals and pushes the autosave back.
    pub fn apply(&mut self, edit: RowEdit) -> Result<(), EditRejection> {
        if self.closed {
            return Err(EditRejection::SessionClosed);
        }
        if self.read_only {
            return Err(EditRejection::ReadOnlySession);
        }
        let edited = apply_edit(&self.rows, &edit).map_err(|rejection| {
            tracing::warn!(session = %self.id, row = edit.row_id(), %rejection, "edit rejected");
            rejection
        })?;
        self.rows = calculate_hierarchical_totals(&edited);
        self.state = EditState::Dirty;
        self.autosave.reschedule(self.clock.now());
        tracing::debug!(session = %self.id, row = edit.row_id(), "edit applied");
        Ok(())
    }

    /// Writes the draft if the autosave deadline has passed. Returns whether
    /// a write was attempted.
    pub fn poll_autosave(&mut self) -> bool {
        if self.closed || self.read_only {
            return false;
        }
        if !self.autosave.take_due(self.clock.now()) {
            return false;
        }
        self.write_draft(Notice::Autosaved);
        true
    }

    /// Writes the draft now. The session stays dirty and the autosave
    /// deadline is left as it is.
    pub fn save_draft(&mut self) -> Result<(), CoreError> {
        if self.closed {
            return Err(CoreError::SessionClosed);
        }
        if self.read_only {
            return Err(CoreError::ReadOnly);
        }
        self.write_draft(Notice::DraftSaved);
        Ok(())
    }

    /// Hands the report to `submitter`. On success the session is clean and
    /// the draft is gone; on failure nothing changes.
    pub fn save_permanently(
        &mut self,
        submitter: &mut dyn ReportSubmitter,
    ) -> Result<(), CoreError> {
        if self.closed {
            return Err(CoreError::SessionClosed);
        }
        if self.read_only {
            return Err(CoreError::ReadOnly);
        }
        let report = self.report_data();
        if let Err(err) = submitter.submit(&report) {
            tracing::warn!(session = %self.id, error = %err, "permanent save failed");
            self.notices.push(Notice::SaveFailed(err.to_string()));
            return Err(CoreError::SaveFailed(err));
        }

        self.state = EditState::Clean;
        self.autosave.cancel();
        let key = self.draft_key();
        if let Err(err) = self.drafts.remove(&key) {
            tracing::warn!(session = %self.id, key = %key, error = %err, "failed to remove draft");
            self.notices.push(Notice::DraftRemoveFailed(err.to_string()));
        }
        tracing::info!(session = %self.id, key = %key, "report saved");
        self.notices.push(Notice::Saved);
        Ok(())
    }

    /// Snapshot handed to the permanent-save collaborator.
    pub fn report_data(&self) -> FinancialReportData {
        FinancialReportData {
            table_data: self.rows.clone(),
            metadata: ReportMetadata {
                health_center: self.selection.health_center.clone(),
                district: self.header.district.clone(),
                project: self.header.project.clone(),
                reporting_period: self.selection.reporting_period.clone(),
                fiscal_year: Some(self.fiscal_year.clone()),
            },
        }
    }

    /// Takes a new facility/period selection. Losing a complete selection
    /// hides the form but keeps the rows.
    pub fn update_selection(&mut self, selection: Selection) {
        self.selection = selection;
        if !self.read_only && self.form_visible && !self.selection.is_complete() {
            tracing::debug!(session = %self.id, "selection reset; hiding form");
            self.form_visible = false;
        }
    }

    /// Shows the form once the selection is complete. A clean session picks
    /// up a live draft for the new selection.
    pub fn confirm_selection(&mut self) -> bool {
        if self.closed {
            return false;
        }
        if self.read_only || self.selection.is_complete() {
            if !self.form_visible && self.state == EditState::Clean {
                self.restore_draft();
            }
            self.form_visible = true;
        }
        self.form_visible
    }

    pub fn toggle_row(&mut self, row_id: &str) -> bool {
        self.expanded.toggle(row_id)
    }

    pub fn expand_all(&mut self) {
        self.expanded.expand_all(&self.rows);
    }

    pub fn collapse_all(&mut self) {
        self.expanded.collapse_all();
    }

    pub fn visible_rows(&self) -> FlattenedRows<'_> {
        flatten(&self.rows, &self.expanded)
    }

    /// Whether leaving for `target` needs the user to confirm first.
    pub fn guard_navigation(&self, target: &NavigationTarget) -> NavigationDecision {
        if self.closed || self.read_only || !self.is_dirty() {
            return NavigationDecision::Proceed;
        }
        match target {
            NavigationTarget::Unload => NavigationDecision::ConfirmRequired,
            NavigationTarget::Route(route) if *route != self.route => {
                NavigationDecision::ConfirmRequired
            }
            NavigationTarget::Route(_) => NavigationDecision::Proceed,
        }
    }

    /// Leaves the session. When confirmation is needed and was not given the
    /// session stays open and `false` is returned. A dirty session writes its
    /// draft on the way out and stays dirty.
    pub fn leave(&mut self, target: &NavigationTarget, confirmed: bool) -> bool {
        if self.guard_navigation(target) == NavigationDecision::ConfirmRequired && !confirmed {
            return false;
        }
        if !self.closed && !self.read_only && self.is_dirty() {
            self.write_draft(Notice::DraftSaved);
        }
        self.close();
        true
    }

    /// Tears the session down. Later edits and polls do nothing.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.autosave.cancel();
        self.closed = true;
        tracing::info!(session = %self.id, dirty = self.is_dirty(), "edit session closed");
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn restore_draft(&mut self) {
        if self.read_only {
            return;
        }
        let key = self.draft_key();
        match self.drafts.load(&key) {
            Ok(Some(record)) => {
                if let Some(duplicate) = duplicate_ids(&record.form_data).into_iter().next() {
                    tracing::warn!(session = %self.id, key = %key, %duplicate, "draft has duplicate row ids");
                    self.notices.push(Notice::DraftLoadFailed(
                        CoreError::DuplicateRowId(duplicate).to_string(),
                    ));
                    return;
                }
                self.rows = calculate_hierarchical_totals(&record.form_data);
                tracing::info!(session = %self.id, key = %key, timestamp = record.timestamp, "draft restored");
                self.notices.push(Notice::DraftRestored {
                    timestamp: record.timestamp,
                });
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(session = %self.id, key = %key, error = %err, "failed to load draft");
                self.notices.push(Notice::DraftLoadFailed(err.to_string()));
            }
        }
    }

    fn write_draft(&mut self, success: Notice) {
        let key = self.draft_key();
        match self.drafts.save(&key, &self.rows) {
            Ok(_) => self.notices.push(success),
            Err(err) => {
                tracing::warn!(session = %self.id, key = %key, error = %err, "failed to save draft");
                self.notices.push(Notice::DraftSaveFailed(err.to_string()));
            }
        }
    }
}

fn ensure_unique_ids(rows: &[FinancialRow]) -> Result<(), CoreError> {
    match duplicate_ids(rows).into_iter().next() {
        Some(duplicate) => Err(CoreError::DuplicateRowId(duplicate)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{draft::MemoryMedium, error::StorageError, time::ManualClock, DraftMedium};
    use chrono::{TimeZone, Utc};
    use report_domain::{find_row, Quarter};

    struct Recorder {
        fail: bool,
        reports: Vec<FinancialReportData>,
    }

    impl ReportSubmitter for Recorder {
        fn submit(&mut self, report: &FinancialReportData) -> Result<(), SubmitError> {
            if self.fail {
                return Err(SubmitError::new("endpoint unavailable"));
            }
            self.reports.push(report.clone());
            Ok(())
        }
    }

    struct Fixture {
        medium: Arc<MemoryMedium>,
        clock: Arc<ManualClock>,
        store: DraftStore,
    }

    fn fixture() -> Fixture {
        let medium = Arc::new(MemoryMedium::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap(),
        ));
        let store = DraftStore::new(medium.clone(), clock.clone());
        Fixture {
            medium,
            clock,
            store,
        }
    }

    fn options() -> SessionOptions {
        SessionOptions {
            fiscal_year: "2024".into(),
            selection: Selection::new(Some("HC01"), Some("Q1")),
            route: "/reports/execution".into(),
            ..SessionOptions::default()
        }
    }

    fn open(fx: &Fixture, options: SessionOptions) -> EditSession {
        EditSession::open(options, fx.store.clone(), fx.clock.clone()).unwrap()
    }

    #[test]
    fn opens_clean_with_totalled_template() {
        let fx = fixture();
        let session = open(&fx, options());
        assert_eq!(session.state(), EditState::Clean);
        assert!(!session.is_form_visible());
        assert_eq!(session.rows()[0].q1, Some(0.0));
        assert!(!session.autosave().is_armed());
    }

    #[test]
    fn accepted_edit_marks_dirty_and_arms_autosave() {
        let fx = fixture();
        let mut session = open(&fx, options());
        session
            .apply(RowEdit::value("a1", Quarter::Q1, "100"))
            .unwrap();
        assert!(session.is_dirty());
        assert_eq!(find_row(session.rows(), "a").unwrap().q1, Some(100.0));
        assert_eq!(
            session.autosave().deadline(),
            Some(fx.clock.now() + Duration::seconds(30))
        );
    }

    #[test]
    fn oversized_autosave_delay_does_not_break_editing() {
        let fx = fixture();
        let mut session = open(
            &fx,
            SessionOptions {
                autosave_delay: Duration::seconds(i64::MAX / 1_000_000),
                ..options()
            },
        );
        session
            .apply(RowEdit::value("a1", Quarter::Q1, "5"))
            .unwrap();
        assert!(session.is_dirty());
        assert!(!session.autosave().is_armed());
        session.save_draft().unwrap();
        assert!(fx.store.load(&session.draft_key()).unwrap().is_some());
    }

    #[test]
    fn rejected_edits_leave_state_untouched() {
        let fx = fixture();
        let mut session = open(&fx, options());
        let before = session.rows().to_vec();
        assert!(session.apply(RowEdit::value("a", Quarter::Q1, "5")).is_err());
        assert!(session.apply(RowEdit::value("c", Quarter::Q1, "5")).is_err());
        assert!(session.apply(RowEdit::value("a1", Quarter::Q1, "five")).is_err());
        assert_eq!(session.state(), EditState::Clean);
        assert_eq!(session.rows(), before.as_slice());
        assert!(!session.autosave().is_armed());
    }

    #[test]
    fn burst_of_edits_autosaves_once() {
        let fx = fixture();
        let mut session = open(&fx, options());
        for (step, amount) in ["1", "2", "3"].iter().enumerate() {
            if step > 0 {
                fx.clock.advance(Duration::seconds(10));
            }
            session
                .apply(RowEdit::value("a1", Quarter::Q1, *amount))
                .unwrap();
        }
        fx.clock.advance(Duration::seconds(29));
        assert!(!session.poll_autosave());
        fx.clock.advance(Duration::seconds(1));
        assert!(session.poll_autosave());
        assert!(!session.poll_autosave());
        assert_eq!(session.take_notices(), vec![Notice::Autosaved]);
        assert!(session.is_dirty());

        let draft = fx.store.load(&session.draft_key()).unwrap().unwrap();
        assert_eq!(find_row(&draft.form_data, "a1").unwrap().q1, Some(3.0));
    }

    #[test]
    fn draft_is_restored_on_open_and_skipped_when_read_only() {
        let fx = fixture();
        let mut first = open(&fx, options());
        first.apply(RowEdit::value("a2", Quarter::Q3, "42")).unwrap();
        first.save_draft().unwrap();

        let mut restored = open(&fx, options());
        assert_eq!(find_row(restored.rows(), "a").unwrap().q3, Some(42.0));
        assert!(matches!(
            restored.take_notices().as_slice(),
            [Notice::DraftRestored { .. }]
        ));
        assert_eq!(restored.state(), EditState::Clean);

        let read_only = open(
            &fx,
            SessionOptions {
                read_only: true,
                ..options()
            },
        );
        assert_eq!(find_row(read_only.rows(), "a").unwrap().q3, Some(0.0));
    }

    #[test]
    fn corrupt_draft_reports_load_failure_and_keeps_defaults() {
        let fx = fixture();
        let key = derive_key(Some("HC01"), Some("Q1"));
        fx.medium.set(key.as_str(), "][").unwrap();
        let mut session = open(&fx, options());
        assert!(matches!(
            session.take_notices().as_slice(),
            [Notice::DraftLoadFailed(_)]
        ));
        assert_eq!(session.rows(), open(&fx, SessionOptions { read_only: true, ..options() }).rows());
    }

    #[test]
    fn permanent_save_success_cleans_and_removes_draft() {
        let fx = fixture();
        let mut session = open(
            &fx,
            SessionOptions {
                header: ReportHeader {
                    district: Some("Gasabo".into()),
                    project: Some("HIV/NSP".into()),
                    ..ReportHeader::default()
                },
                ..options()
            },
        );
        session.apply(RowEdit::value("a1", Quarter::Q2, "7")).unwrap();
        session.save_draft().unwrap();
        let mut submitter = Recorder {
            fail: false,
            reports: Vec::new(),
        };

        session.save_permanently(&mut submitter).unwrap();
        assert_eq!(session.state(), EditState::Clean);
        assert!(!session.autosave().is_armed());
        assert!(fx.store.load(&session.draft_key()).unwrap().is_none());
        let report = &submitter.reports[0];
        assert_eq!(report.metadata.health_center.as_deref(), Some("HC01"));
        assert_eq!(report.metadata.district.as_deref(), Some("Gasabo"));
        assert_eq!(report.metadata.fiscal_year.as_deref(), Some("2024"));
        assert_eq!(session.take_notices().last(), Some(&Notice::Saved));
    }

    #[test]
    fn permanent_save_failure_keeps_everything() {
        let fx = fixture();
        let mut session = open(&fx, options());
        session.apply(RowEdit::value("a1", Quarter::Q2, "7")).unwrap();
        session.save_draft().unwrap();
        let mut submitter = Recorder {
            fail: true,
            reports: Vec::new(),
        };

        let err = session.save_permanently(&mut submitter).unwrap_err();
        assert!(matches!(err, CoreError::SaveFailed(_)));
        assert!(session.is_dirty());
        assert!(session.autosave().is_armed());
        assert!(fx.store.load(&session.draft_key()).unwrap().is_some());
        assert!(matches!(
            session.take_notices().last(),
            Some(Notice::SaveFailed(_))
        ));
    }

    #[test]
    fn read_only_session_never_dirties_or_saves() {
        let fx = fixture();
        let mut session = open(
            &fx,
            SessionOptions {
                read_only: true,
                ..options()
            },
        );
        assert!(session.is_form_visible());
        assert_eq!(
            session.apply(RowEdit::value("a1", Quarter::Q1, "1")),
            Err(EditRejection::ReadOnlySession)
        );
        assert!(matches!(session.save_draft(), Err(CoreError::ReadOnly)));
        assert!(!session.poll_autosave());
        assert_eq!(
            session.guard_navigation(&NavigationTarget::Unload),
            NavigationDecision::Proceed
        );
        assert!(fx.medium.keys().unwrap().is_empty());
    }

    #[test]
    fn navigation_is_guarded_only_while_dirty() {
        let fx = fixture();
        let mut session = open(&fx, options());
        let elsewhere = NavigationTarget::Route("/dashboard".into());
        let same = NavigationTarget::Route("/reports/execution".into());
        assert_eq!(session.guard_navigation(&elsewhere), NavigationDecision::Proceed);

        session.apply(RowEdit::value("a1", Quarter::Q1, "1")).unwrap();
        assert_eq!(
            session.guard_navigation(&elsewhere),
            NavigationDecision::ConfirmRequired
        );
        assert_eq!(
            session.guard_navigation(&NavigationTarget::Unload),
            NavigationDecision::ConfirmRequired
        );
        assert_eq!(session.guard_navigation(&same), NavigationDecision::Proceed);

        assert!(!session.leave(&elsewhere, false));
        assert!(!session.is_closed());
    }

    #[test]
    fn confirmed_leave_writes_draft_and_stops_autosave() {
        let fx = fixture();
        let mut session = open(&fx, options());
        session.apply(RowEdit::value("a1", Quarter::Q1, "9")).unwrap();
        assert!(session.leave(&NavigationTarget::Unload, true));
        assert!(session.is_closed());
        assert!(session.is_dirty());
        assert!(!session.autosave().is_armed());
        assert_eq!(session.take_notices(), vec![Notice::DraftSaved]);

        fx.clock.advance(Duration::minutes(5));
        assert!(!session.poll_autosave());
        assert_eq!(
            session.apply(RowEdit::value("a1", Quarter::Q1, "1")),
            Err(EditRejection::SessionClosed)
        );
        assert!(fx.store.load(&session.draft_key()).unwrap().is_some());
    }

    #[test]
    fn clearing_selection_hides_form_but_keeps_rows() {
        let fx = fixture();
        let mut session = open(&fx, options());
        assert!(session.confirm_selection());
        session.apply(RowEdit::value("a1", Quarter::Q1, "5")).unwrap();
        let rows = session.rows().to_vec();

        session.update_selection(Selection::new(Some("HC01"), None));
        assert!(!session.is_form_visible());
        assert_eq!(session.rows(), rows.as_slice());
        assert!(!session.confirm_selection());
    }

    #[test]
    fn draft_write_failure_is_a_notice_not_an_error() {
        let medium = Arc::new(MemoryMedium::with_quota(8));
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = DraftStore::new(medium, clock.clone());
        let mut session = EditSession::open(options(), store, clock).unwrap();
        session.apply(RowEdit::value("a1", Quarter::Q1, "5")).unwrap();
        session.save_draft().unwrap();
        let notices = session.take_notices();
        assert!(matches!(notices.as_slice(), [Notice::DraftSaveFailed(_)]));
        assert!(session.is_dirty());
        assert_eq!(find_row(session.rows(), "a1").unwrap().q1, Some(5.0));
    }

    #[test]
    fn duplicate_ids_are_refused_at_open() {
        let fx = fixture();
        let err = EditSession::open(
            SessionOptions {
                rows: Some(vec![
                    FinancialRow::leaf("x", "X"),
                    FinancialRow::leaf("x", "X again"),
                ]),
                ..options()
            },
            fx.store.clone(),
            fx.clock.clone(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, CoreError::DuplicateRowId(id) if id == "x"));
    }

    #[test]
    fn storage_errors_render_readably() {
        let err = StorageError::QuotaExceeded {
            needed: 10,
            limit: 8,
        };
        assert_eq!(
            Notice::DraftSaveFailed(err.to_string()),
            Notice::DraftSaveFailed("Storage quota exceeded: 10 bytes needed, 8 allowed".into())
        );
    }
}
