//! Line items of a quarterly execution report.

use std::{
    collections::{BTreeSet, HashSet},
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// One of the four reporting quarters of a fiscal year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Zero-based position of the quarter within the fiscal year.
    pub fn index(self) -> usize {
        match self {
            Quarter::Q1 => 0,
            Quarter::Q2 => 1,
            Quarter::Q3 => 2,
            Quarter::Q4 => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quarter::Q1 => "q1",
            Quarter::Q2 => "q2",
            Quarter::Q3 => "q3",
            Quarter::Q4 => "q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownQuarter(pub String);

impl fmt::Display for UnknownQuarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown quarter `{}` (expected q1-q4)", self.0)
    }
}

impl std::error::Error for UnknownQuarter {}

impl FromStr for Quarter {
    type Err = UnknownQuarter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "q1" | "1" => Ok(Quarter::Q1),
            "q2" | "2" => Ok(Quarter::Q2),
            "q3" | "3" => Ok(Quarter::Q3),
            "q4" | "4" => Ok(Quarter::Q4),
            _ => Err(UnknownQuarter(value.to_string())),
        }
    }
}

/// A node of the report tree. Category rows aggregate their children; other
/// rows carry values entered by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRow {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub is_category: bool,
    #[serde(default = "FinancialRow::default_editable")]
    pub is_editable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q4: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cumulative_balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FinancialRow>>,
}

impl FinancialRow {
    fn default_editable() -> bool {
        true
    }

    /// Creates an editable line item with no values entered.
    pub fn leaf(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_category: false,
            is_editable: true,
            q1: None,
            q2: None,
            q3: None,
            q4: None,
            cumulative_balance: None,
            comments: None,
            children: None,
        }
    }

    /// Creates an aggregating row over `children`.
    pub fn category(
        id: impl Into<String>,
        title: impl Into<String>,
        children: Vec<FinancialRow>,
    ) -> Self {
        Self {
            is_category: true,
            children: Some(children),
            ..Self::leaf(id, title)
        }
    }

    /// Marks the row read-only regardless of its kind.
    pub fn read_only(mut self) -> Self {
        self.is_editable = false;
        self
    }

    pub fn with_value(mut self, quarter: Quarter, value: f64) -> Self {
        self.set_value(quarter, Some(value));
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments = Some(comment.into());
        self
    }

    pub fn value(&self, quarter: Quarter) -> Option<f64> {
        match quarter {
            Quarter::Q1 => self.q1,
            Quarter::Q2 => self.q2,
            Quarter::Q3 => self.q3,
            Quarter::Q4 => self.q4,
        }
    }

    pub fn set_value(&mut self, quarter: Quarter, value: Option<f64>) {
        let slot = match quarter {
            Quarter::Q1 => &mut self.q1,
            Quarter::Q2 => &mut self.q2,
            Quarter::Q3 => &mut self.q3,
            Quarter::Q4 => &mut self.q4,
        };
        *slot = value;
    }

    /// Quarterly values in fiscal order.
    pub fn quarters(&self) -> [Option<f64>; 4] {
        [self.q1, self.q2, self.q3, self.q4]
    }

    /// Returns `true` when the user may write values or comments on this row.
    pub fn accepts_input(&self) -> bool {
        !self.is_category && self.is_editable
    }

    pub fn has_children(&self) -> bool {
        self.children
            .as_ref()
            .is_some_and(|children| !children.is_empty())
    }

    pub fn children(&self) -> &[FinancialRow] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Pre-order traversal over every row of a forest, expanded or not.
pub fn walk(rows: &[FinancialRow]) -> RowWalk<'_> {
    RowWalk {
        stack: vec![rows.iter()],
    }
}

#[derive(Clone)]
pub struct RowWalk<'a> {
    stack: Vec<std::slice::Iter<'a, FinancialRow>>,
}

impl<'a> Iterator for RowWalk<'a> {
    type Item = &'a FinancialRow;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(row) => {
                    if row.has_children() {
                        self.stack.push(row.children().iter());
                    }
                    return Some(row);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Finds a row anywhere in the forest by id.
pub fn find_row<'a>(rows: &'a [FinancialRow], id: &str) -> Option<&'a FinancialRow> {
    walk(rows).find(|row| row.id == id)
}

/// Ids that appear more than once across the whole forest, sorted.
pub fn duplicate_ids(rows: &[FinancialRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();
    for row in walk(rows) {
        if !seen.insert(row.id.as_str()) {
            duplicates.insert(row.id.clone());
        }
    }
    duplicates.into_iter().collect()
}
