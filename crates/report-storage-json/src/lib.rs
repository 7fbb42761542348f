use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use report_core::{Clock, DraftMedium, ReportSubmitter, StorageError, SubmitError, SystemClock};
use report_domain::FinancialReportData;

const DRAFT_EXTENSION: &str = "json";
const REPORT_EXTENSION: &str = "json";
const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S%3f";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem medium storing one JSON file per draft key.
#[derive(Debug, Clone)]
pub struct JsonDraftMedium {
    root: PathBuf,
    quota: Option<usize>,
}

impl JsonDraftMedium {
    pub fn new(root: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root, quota: None })
    }

    /// Refuses records larger than `quota` bytes.
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn draft_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", encode_file_stem(key), DRAFT_EXTENSION))
    }
}

impl DraftMedium for JsonDraftMedium {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.draft_path(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            if payload.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    needed: payload.len(),
                    limit,
                });
            }
        }
        let path = self.draft_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.draft_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(DRAFT_EXTENSION) {
                continue;
            }
            if let Some(key) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(decode_file_stem)
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Writes every submitted report to its own JSON file.
#[derive(Clone)]
pub struct JsonReportArchive {
    root: PathBuf,
    clock: Arc<dyn Clock>,
}

impl JsonReportArchive {
    pub fn new(root: PathBuf) -> Result<Self, StorageError> {
        Self::with_clock(root, Arc::new(SystemClock))
    }

    pub fn with_clock(root: PathBuf, clock: Arc<dyn Clock>) -> Result<Self, StorageError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root, clock })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stores `report` as `{health center}_{period}_{timestamp}.json`.
    pub fn archive(&self, report: &FinancialReportData) -> Result<PathBuf, StorageError> {
        let timestamp = self.clock.now().format(ARCHIVE_TIMESTAMP_FORMAT);
        let file_name = format!(
            "{}_{}_{}.{}",
            slug(report.metadata.health_center.as_deref(), "facility"),
            slug(report.metadata.reporting_period.as_deref(), "period"),
            timestamp,
            REPORT_EXTENSION
        );
        let path = self.root.join(file_name);
        let data = serde_json::to_string_pretty(report)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &data)?;
        fs::rename(&tmp, &path)?;
        tracing::info!(path = %path.display(), "report archived");
        Ok(path)
    }

    /// Archived report files, oldest first.
    pub fn list(&self) -> Result<Vec<PathBuf>, StorageError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(REPORT_EXTENSION)
            {
                entries.push(path);
            }
        }
        entries.sort_by_key(|path| archive_timestamp(path));
        Ok(entries)
    }

    pub fn load(&self, path: &Path) -> Result<FinancialReportData, StorageError> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|err| StorageError::Corrupt {
            key: path.display().to_string(),
            reason: err.to_string(),
        })
    }
}

impl ReportSubmitter for JsonReportArchive {
    fn submit(&mut self, report: &FinancialReportData) -> Result<(), SubmitError> {
        self.archive(report)
            .map(|_| ())
            .map_err(|err| SubmitError::new(err.to_string()))
    }
}

fn slug(value: Option<&str>, fallback: &str) -> String {
    let sanitized: String = value
        .unwrap_or_default()
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '-',
        })
        .collect();
    let trimmed = sanitized.trim_matches('-');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// The trailing `YYYYmmdd_HHMMSSmmm` of an archive file name.
fn archive_timestamp(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    let mut segments = stem.rsplit('_');
    let time = segments.next().unwrap_or_default();
    let date = segments.next().unwrap_or_default();
    format!("{date}{time}")
}

fn encode_file_stem(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

fn decode_file_stem(stem: &str) -> Option<String> {
    let bytes = stem.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let hex = stem.get(index + 1..index + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            index += 3;
        } else {
            decoded.push(bytes[index]);
            index += 1;
        }
    }
    String::from_utf8(decoded).ok()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
