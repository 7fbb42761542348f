//! Applying user edits to a report tree.

use report_domain::{find_row, FinancialRow, Quarter};
use thiserror::Error;

/// A single change requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEdit {
    /// Raw text typed into a quarter cell.
    Value {
        row_id: String,
        quarter: Quarter,
        input: String,
    },
    Comment {
        row_id: String,
        text: String,
    },
}

impl RowEdit {
    pub fn value(row_id: impl Into<String>, quarter: Quarter, input: impl Into<String>) -> Self {
        RowEdit::Value {
            row_id: row_id.into(),
            quarter,
            input: input.into(),
        }
    }

    pub fn comment(row_id: impl Into<String>, text: impl Into<String>) -> Self {
        RowEdit::Comment {
            row_id: row_id.into(),
            text: text.into(),
        }
    }

    pub fn row_id(&self) -> &str {
        match self {
            RowEdit::Value { row_id, .. } | RowEdit::Comment { row_id, .. } => row_id,
        }
    }
}

/// Why an edit was ignored. These are expected outcomes, not failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditRejection {
    #[error("row `{0}` does not exist")]
    UnknownRow(String),
    #[error("row `{0}` is a category; its values are derived")]
    CategoryRow(String),
    #[error("row `{0}` is read-only")]
    ReadOnlyRow(String),
    #[error("`{0}` is not a valid amount")]
    InvalidAmount(String),
    #[error("report is open in read-only mode")]
    ReadOnlySession,
    #[error("editing session is closed")]
    SessionClosed,
}

/// Parses cell input. Blank input clears the quarter.
pub fn parse_amount(input: &str) -> Result<Option<f64>, EditRejection> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(EditRejection::InvalidAmount(trimmed.to_string())),
    }
}

/// Returns a copy of `rows` with `edit` applied, leaving `rows` untouched.
///
/// Totals are not recomputed here; callers run the totals engine over the
/// result.
pub fn apply_edit(
    rows: &[FinancialRow],
    edit: &RowEdit,
) -> Result<Vec<FinancialRow>, EditRejection> {
    let row_id = edit.row_id();
    let target = find_row(rows, row_id).ok_or_else(|| EditRejection::UnknownRow(row_id.into()))?;
    if target.is_category {
        return Err(EditRejection::CategoryRow(row_id.into()));
    }
    if !target.is_editable {
        return Err(EditRejection::ReadOnlyRow(row_id.into()));
    }

    let change = match edit {
        RowEdit::Value { quarter, input, .. } => Change::Value(*quarter, parse_amount(input)?),
        RowEdit::Comment { text, .. } => {
            Change::Comment((!text.trim().is_empty()).then(|| text.clone()))
        }
    };

    Ok(rebuild(rows, row_id, &change))
}

enum Change {
    Value(Quarter, Option<f64>),
    Comment(Option<String>),
}

impl Change {
    fn apply(&self, row: &mut FinancialRow) {
        match self {
            Change::Value(quarter, value) => row.set_value(*quarter, *value),
            Change::Comment(comment) => row.comments = comment.clone(),
        }
    }
}

fn rebuild(rows: &[FinancialRow], row_id: &str, change: &Change) -> Vec<FinancialRow> {
    rows.iter()
        .map(|row| {
            let mut next = row.clone();
            if row.id == row_id {
                change.apply(&mut next);
            } else if let Some(children) = row.children.as_ref() {
                next.children = Some(rebuild(children, row_id, change));
            }
            next
        })
        .collect()
}
