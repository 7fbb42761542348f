//! Keyed, time-limited persistence of in-progress reports.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex},
};

use chrono::Duration;
use report_domain::{DraftRecord, FinancialRow};

use crate::{error::StorageError, time::Clock};

/// Prefix shared by every draft key.
pub const DRAFT_KEY_PREFIX: &str = "financial_form_";
/// Stands in for an unset or empty key part.
pub const DEFAULT_KEY_PART: &str = "~default";
/// Drafts older than this are treated as absent.
pub const DEFAULT_RETENTION_HOURS: i64 = 24;

/// Storage key of the draft for one health center and reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DraftKey(String);

impl DraftKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DraftKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builds the draft key for a selection.
///
/// Set parts are percent-escaped so neither `_` nor `~` can appear inside
/// them; two different selections therefore never share a key.
pub fn derive_key(health_center: Option<&str>, reporting_period: Option<&str>) -> DraftKey {
    DraftKey(format!(
        "{DRAFT_KEY_PREFIX}{}_{}",
        key_part(health_center),
        key_part(reporting_period)
    ))
}

fn key_part(part: Option<&str>) -> String {
    match part {
        Some(value) if !value.is_empty() => escape_key_part(value),
        _ => DEFAULT_KEY_PART.to_string(),
    }
}

fn escape_key_part(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'.' || byte == b'-' {
            escaped.push(byte as char);
        } else {
            escaped.push_str(&format!("%{byte:02X}"));
        }
    }
    escaped
}

/// A string key/value medium that drafts are written to.
pub trait DraftMedium: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, payload: &str) -> Result<(), StorageError>;
    /// Removing an absent key succeeds.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Process-local medium with an optional limit on the total stored bytes.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::default(),
            quota: Some(quota),
        }
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory medium lock poisoned".into()))
    }
}

impl DraftMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        let mut entries = self.entries()?;
        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(existing, _)| existing.as_str() != key)
                .map(|(existing, value)| existing.len() + value.len())
                .sum();
            let needed = others + key.len() + payload.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys: Vec<_> = self.entries()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Reads and writes [`DraftRecord`]s, hiding records past the retention window.
#[derive(Clone)]
pub struct DraftStore {
    medium: Arc<dyn DraftMedium>,
    clock: Arc<dyn Clock>,
    retention: Duration,
}

impl DraftStore {
    pub fn new(medium: Arc<dyn DraftMedium>, clock: Arc<dyn Clock>) -> Self {
        Self {
            medium,
            clock,
            retention: Duration::hours(DEFAULT_RETENTION_HOURS),
        }
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Returns the live draft for `key`.
    ///
    /// Absent and expired drafts are `Ok(None)`; an expired record is removed
    /// on the way out. A payload that cannot be decoded is an error.
    pub fn load(&self, key: &DraftKey) -> Result<Option<DraftRecord>, StorageError> {
        let Some(payload) = self.medium.get(key.as_str())? else {
            return Ok(None);
        };
        let record = decode(key.as_str(), &payload)?;
        if self.is_expired(&record) {
            tracing::debug!(key = %key, timestamp = record.timestamp, "draft expired");
            if let Err(err) = self.medium.delete(key.as_str()) {
                tracing::warn!(key = %key, error = %err, "failed to remove expired draft");
            }
            return Ok(None);
        }
        Ok(Some(record))
    }

    /// Stores `rows` under `key` stamped with the current time, replacing any
    /// previous draft.
    pub fn save(&self, key: &DraftKey, rows: &[FinancialRow]) -> Result<DraftRecord, StorageError> {
        let record = DraftRecord {
            form_data: rows.to_vec(),
            timestamp: self.clock.now_millis(),
        };
        let payload = serde_json::to_string(&record)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.medium.set(key.as_str(), &payload)?;
        tracing::info!(key = %key, bytes = payload.len(), "draft saved");
        Ok(record)
    }

    pub fn remove(&self, key: &DraftKey) -> Result<(), StorageError> {
        self.medium.delete(key.as_str())?;
        tracing::debug!(key = %key, "draft removed");
        Ok(())
    }

    /// Deletes every expired or unreadable draft; returns how many went.
    pub fn purge_expired(&self) -> Result<usize, StorageError> {
        let mut removed = 0;
        for key in self.medium.keys()? {
            if !key.starts_with(DRAFT_KEY_PREFIX) {
                continue;
            }
            let Some(payload) = self.medium.get(&key)? else {
                continue;
            };
            let stale = match decode(&key, &payload) {
                Ok(record) => self.is_expired(&record),
                Err(_) => true,
            };
            if stale {
                self.medium.delete(&key)?;
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::info!(removed, "purged stale drafts");
        }
        Ok(removed)
    }

    /// An age that does not fit in an `i64` counts as expired.
    fn is_expired(&self, record: &DraftRecord) -> bool {
        match self.clock.now_millis().checked_sub(record.timestamp) {
            Some(age) => age > self.retention.num_milliseconds(),
            None => true,
        }
    }
}

fn decode(key: &str, payload: &str) -> Result<DraftRecord, StorageError> {
    serde_json::from_str(payload).map_err(|err| StorageError::Corrupt {
        key: key.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;
    use chrono::{TimeZone, Utc};
    use report_domain::Quarter;

    fn fixture() -> (Arc<MemoryMedium>, Arc<ManualClock>, DraftStore) {
        let medium = Arc::new(MemoryMedium::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
        ));
        let store = DraftStore::new(medium.clone(), clock.clone());
        (medium, clock, store)
    }

    fn rows() -> Vec<FinancialRow> {
        vec![FinancialRow::leaf("a1", "A1").with_value(Quarter::Q1, 12.0)]
    }

    #[test]
    fn keys_use_default_token_for_missing_parts() {
        assert_eq!(
            derive_key(Some("HC01"), Some("Q1")).as_str(),
            "financial_form_HC01_Q1"
        );
        assert_eq!(
            derive_key(None, Some("")).as_str(),
            "financial_form_~default_~default"
        );
    }

    #[test]
    fn keys_never_collide_across_parts() {
        let pairs = [
            (Some("a_b"), Some("c")),
            (Some("a"), Some("b_c")),
            (Some("~default"), None),
            (None, None),
            (Some("default"), None),
            (Some("x y"), Some("q")),
            (Some("x%20y"), Some("q")),
        ];
        let keys: std::collections::HashSet<_> = pairs
            .iter()
            .map(|(hc, period)| derive_key(*hc, *period))
            .collect();
        assert_eq!(keys.len(), pairs.len());
    }

    #[test]
    fn save_then_load_returns_the_rows() {
        let (_, clock, store) = fixture();
        let key = derive_key(Some("HC01"), Some("Q1"));
        let saved = store.save(&key, &rows()).unwrap();
        assert_eq!(saved.timestamp, clock.now_millis());

        let loaded = store.load(&key).unwrap().unwrap();
        assert_eq!(loaded.form_data, rows());
        assert_eq!(loaded.timestamp, saved.timestamp);
    }

    #[test]
    fn drafts_expire_just_after_the_retention_window() {
        let (medium, clock, store) = fixture();
        let key = derive_key(Some("HC01"), Some("Q1"));
        store.save(&key, &rows()).unwrap();

        clock.advance(Duration::hours(24));
        assert!(store.load(&key).unwrap().is_some(), "still inside window");

        clock.advance(Duration::milliseconds(1));
        assert!(store.load(&key).unwrap().is_none());
        assert!(medium.get(key.as_str()).unwrap().is_none(), "expired draft removed");
    }

    #[test]
    fn timestamps_too_old_to_measure_count_as_expired() {
        let (medium, _, store) = fixture();
        let key = derive_key(Some("HC01"), Some("Q1"));
        medium
            .set(
                key.as_str(),
                r#"{"formData":[],"timestamp":-9223372036854775808}"#,
            )
            .unwrap();

        assert!(store.load(&key).unwrap().is_none());
        assert!(medium.get(key.as_str()).unwrap().is_none());

        medium
            .set(
                key.as_str(),
                r#"{"formData":[],"timestamp":-9223372036854775808}"#,
            )
            .unwrap();
        assert_eq!(store.purge_expired().unwrap(), 1);
    }

    #[test]
    fn corrupt_payload_is_not_absent() {
        let (medium, _, store) = fixture();
        let key = derive_key(Some("HC01"), Some("Q1"));
        medium.set(key.as_str(), "{not json").unwrap();
        assert!(matches!(
            store.load(&key),
            Err(StorageError::Corrupt { .. })
        ));
        assert!(store.load(&derive_key(Some("HC02"), Some("Q1"))).unwrap().is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let (_, _, store) = fixture();
        let key = derive_key(Some("HC01"), Some("Q1"));
        store.save(&key, &rows()).unwrap();
        store.remove(&key).unwrap();
        store.remove(&key).unwrap();
        assert!(store.load(&key).unwrap().is_none());
    }

    #[test]
    fn quota_is_enforced() {
        let medium = Arc::new(MemoryMedium::with_quota(16));
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = DraftStore::new(medium, clock);
        let err = store
            .save(&derive_key(Some("HC01"), Some("Q1")), &rows())
            .unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 16, .. }));
    }

    #[test]
    fn purge_sweeps_stale_and_unreadable_drafts() {
        let (medium, clock, store) = fixture();
        let old = derive_key(Some("HC01"), Some("Q1"));
        store.save(&old, &rows()).unwrap();
        clock.advance(Duration::hours(30));
        let fresh = derive_key(Some("HC02"), Some("Q1"));
        store.save(&fresh, &rows()).unwrap();
        medium.set("financial_form_HC03_Q1", "garbage").unwrap();
        medium.set("unrelated", "garbage").unwrap();

        assert_eq!(store.purge_expired().unwrap(), 2);
        assert_eq!(
            medium.keys().unwrap(),
            vec![fresh.as_str().to_string(), "unrelated".to_string()]
        );
    }
}
