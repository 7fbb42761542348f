//! Report payloads, drafts, and the selections that scope them.

use serde::{Deserialize, Serialize};

use crate::row::FinancialRow;

/// Identifying data stored alongside the table when a report is saved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_center: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_year: Option<String>,
}

/// The unit handed to the permanent-save collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReportData {
    pub table_data: Vec<FinancialRow>,
    pub metadata: ReportMetadata,
}

/// A locally persisted snapshot of in-progress edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub form_data: Vec<FinancialRow>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Facility and period picked by the user before editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub health_center: Option<String>,
    pub reporting_period: Option<String>,
    pub hospital_mode: bool,
}

impl Selection {
    pub fn new(health_center: Option<&str>, reporting_period: Option<&str>) -> Self {
        Self {
            health_center: health_center.map(str::to_string),
            reporting_period: reporting_period.map(str::to_string),
            hospital_mode: false,
        }
    }

    pub fn hospital(mut self) -> Self {
        self.hospital_mode = true;
        self
    }

    /// Hospitals report for themselves, so they only need a period.
    pub fn is_complete(&self) -> bool {
        let has_center = self.hospital_mode || non_empty(self.health_center.as_deref());
        has_center && non_empty(self.reporting_period.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.trim().is_empty())
}

/// Data shown above the table; passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<String>,
}

const DEFAULT_PROGRAM: &str = "HIV";

impl ReportHeader {
    pub fn title(&self, fiscal_year: &str) -> String {
        let program = self
            .program
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(DEFAULT_PROGRAM);
        match (self.facility_name.as_deref(), self.quarter.as_deref()) {
            (Some(facility), Some(quarter)) if !fiscal_year.is_empty() => {
                let facility_type = self.facility_type.as_deref().unwrap_or_default();
                format!(
                    "{program} Execution Report - {facility} {facility_type} ({fiscal_year}, {quarter})"
                )
            }
            _ => format!("{program} Execution Report"),
        }
    }
}
