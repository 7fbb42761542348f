use std::{fs, sync::Arc};

use chrono::{Duration, TimeZone, Utc};
use report_core::{
    derive_key, DraftMedium, DraftStore, EditSession, ManualClock, ReportSubmitter, RowEdit,
    SessionOptions, StorageError,
};
use report_domain::{FinancialReportData, FinancialRow, Quarter, ReportMetadata, Selection};
use report_storage_json::{JsonDraftMedium, JsonReportArchive};
use tempfile::tempdir;

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 4, 10, 9, 30, 0).single().expect("date"),
    ))
}

#[test]
fn drafts_are_written_as_files_and_listed_by_key() {
    let dir = tempdir().expect("tempdir");
    let medium = JsonDraftMedium::new(dir.path().join("drafts")).expect("create medium");
    let key = derive_key(Some("Kigali HC"), None);

    medium.set(key.as_str(), "{}").expect("set");
    assert!(medium.draft_path(key.as_str()).exists());
    assert_eq!(medium.get(key.as_str()).expect("get").as_deref(), Some("{}"));
    assert_eq!(medium.keys().expect("keys"), vec![key.as_str().to_string()]);

    medium.delete(key.as_str()).expect("delete");
    medium.delete(key.as_str()).expect("delete twice");
    assert_eq!(medium.get(key.as_str()).expect("get"), None);
    assert!(medium.keys().expect("keys").is_empty());
}

#[test]
fn no_temporary_files_are_left_behind() {
    let dir = tempdir().expect("tempdir");
    let medium = JsonDraftMedium::new(dir.path().to_path_buf()).expect("create medium");
    medium.set("financial_form_a_b", "[1]").expect("set");
    medium.set("financial_form_a_b", "[2]").expect("overwrite");

    let names: Vec<_> = fs::read_dir(dir.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(names.len(), 1);
    assert_eq!(medium.get("financial_form_a_b").expect("get").as_deref(), Some("[2]"));
}

#[test]
fn draft_store_over_files_detects_corruption_and_expiry() {
    let dir = tempdir().expect("tempdir");
    let medium = Arc::new(JsonDraftMedium::new(dir.path().to_path_buf()).expect("create medium"));
    let clock = clock();
    let store = DraftStore::new(medium.clone(), clock.clone());
    let key = derive_key(Some("HC01"), Some("Q3"));

    store
        .save(&key, &[FinancialRow::leaf("a1", "A1").with_value(Quarter::Q1, 3.0)])
        .expect("save");
    assert!(store.load(&key).expect("load").is_some());

    fs::write(medium.draft_path(key.as_str()), "{\"formData\": 12").expect("corrupt");
    assert!(matches!(store.load(&key), Err(StorageError::Corrupt { .. })));

    store.save(&key, &[]).expect("save again");
    clock.advance(Duration::hours(25));
    assert!(store.load(&key).expect("load").is_none());
    assert!(!medium.draft_path(key.as_str()).exists());
}

#[test]
fn quota_rejects_large_records() {
    let dir = tempdir().expect("tempdir");
    let medium = JsonDraftMedium::new(dir.path().to_path_buf())
        .expect("create medium")
        .with_quota(4);
    let err = medium.set("financial_form_x_y", "12345").expect_err("over quota");
    assert!(matches!(err, StorageError::QuotaExceeded { needed: 5, limit: 4 }));
    assert!(medium.keys().expect("keys").is_empty());
}

#[test]
fn archive_writes_one_file_per_submission() {
    let dir = tempdir().expect("tempdir");
    let clock = clock();
    let mut archive =
        JsonReportArchive::with_clock(dir.path().join("reports"), clock.clone()).expect("archive");
    let report = FinancialReportData {
        table_data: vec![FinancialRow::leaf("a1", "A1").with_value(Quarter::Q2, 9.0)],
        metadata: ReportMetadata {
            health_center: Some("Kigali HC".into()),
            reporting_period: Some("Q2".into()),
            fiscal_year: Some("2024".into()),
            ..ReportMetadata::default()
        },
    };

    archive.submit(&report).expect("first submit");
    clock.advance(Duration::seconds(1));
    archive.submit(&report).expect("second submit");

    let files = archive.list().expect("list");
    assert_eq!(files.len(), 2);
    let name = files[0]
        .file_name()
        .and_then(|name| name.to_str())
        .expect("file name");
    assert_eq!(name, "kigali-hc_q2_20240410_093000000.json");
    assert_eq!(archive.load(&files[1]).expect("load"), report);
}

#[test]
fn session_saves_through_the_archive_and_clears_file_draft() {
    let dir = tempdir().expect("tempdir");
    let clock = clock();
    let medium = Arc::new(JsonDraftMedium::new(dir.path().join("drafts")).expect("medium"));
    let store = DraftStore::new(medium.clone(), clock.clone());
    let mut archive =
        JsonReportArchive::with_clock(dir.path().join("reports"), clock.clone()).expect("archive");
    let mut session = EditSession::open(
        SessionOptions {
            selection: Selection::new(Some("HC01"), Some("Q1")),
            ..SessionOptions::default()
        },
        store,
        clock,
    )
    .expect("open session");

    session
        .apply(RowEdit::value("d1", Quarter::Q1, "250"))
        .expect("edit");
    session.save_draft().expect("draft");
    assert_eq!(medium.keys().expect("keys").len(), 1);

    session.save_permanently(&mut archive).expect("save");
    assert!(medium.keys().expect("keys").is_empty());
    let saved = archive.load(&archive.list().expect("list")[0]).expect("load");
    assert_eq!(saved.metadata.health_center.as_deref(), Some("HC01"));
    assert_eq!(saved.metadata.fiscal_year.as_deref(), Some("2023"));
}
