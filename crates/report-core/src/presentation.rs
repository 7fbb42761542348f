//! Display ordering of a report tree.

use std::collections::BTreeSet;

use report_domain::{walk, FinancialRow};

/// Ids of the rows whose children are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedRows {
    ids: BTreeSet<String>,
}

impl ExpandedRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flips membership of `id`; returns whether the row is now expanded.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// Expands every row of `rows` that has children.
    pub fn expand_all(&mut self, rows: &[FinancialRow]) {
        self.ids.extend(
            walk(rows)
                .filter(|row| row.has_children())
                .map(|row| row.id.clone()),
        );
    }

    pub fn collapse_all(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A row in display position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRow<'a> {
    pub row: &'a FinancialRow,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// Lazily yields rows in pre-order, descending only into expanded rows.
///
/// Clone the iterator (or call [`flatten`] again) to restart from the top.
pub fn flatten<'a>(rows: &'a [FinancialRow], expanded: &'a ExpandedRows) -> FlattenedRows<'a> {
    FlattenedRows {
        expanded,
        stack: vec![rows.iter()],
    }
}

#[derive(Clone)]
pub struct FlattenedRows<'a> {
    expanded: &'a ExpandedRows,
    stack: Vec<std::slice::Iter<'a, FinancialRow>>,
}

impl<'a> Iterator for FlattenedRows<'a> {
    type Item = DisplayRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let top = self.stack.last_mut()?;
            let Some(row) = top.next() else {
                self.stack.pop();
                continue;
            };
            let has_children = row.has_children();
            let expanded = self.expanded.contains(&row.id);
            if has_children && expanded {
                self.stack.push(row.children().iter());
            }
            return Some(DisplayRow {
                row,
                depth,
                has_children,
                expanded,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<FinancialRow> {
        vec![
            FinancialRow::category(
                "a",
                "A",
                vec![
                    FinancialRow::leaf("a1", "A1"),
                    FinancialRow::category("a2", "A2", vec![FinancialRow::leaf("a2-1", "A2-1")]),
                ],
            ),
            FinancialRow::category("b", "B", vec![FinancialRow::leaf("b1", "B1")]),
            FinancialRow::leaf("c", "C"),
        ]
    }

    fn ids<'a>(rows: impl Iterator<Item = DisplayRow<'a>>) -> Vec<(&'a str, usize)> {
        rows.map(|display| (display.row.id.as_str(), display.depth))
            .collect()
    }

    #[test]
    fn collapsed_tree_shows_only_top_level() {
        let rows = tree();
        let expanded = ExpandedRows::new();
        assert_eq!(
            ids(flatten(&rows, &expanded)),
            vec![("a", 0), ("b", 0), ("c", 0)]
        );
    }

    #[test]
    fn expanded_rows_are_descended_in_pre_order() {
        let rows = tree();
        let expanded = ExpandedRows::from_ids(["a", "a2"]);
        assert_eq!(
            ids(flatten(&rows, &expanded)),
            vec![("a", 0), ("a1", 1), ("a2", 1), ("a2-1", 2), ("b", 0), ("c", 0)]
        );
    }

    #[test]
    fn descendants_of_collapsed_rows_are_omitted_even_if_expanded() {
        let rows = tree();
        let expanded = ExpandedRows::from_ids(["a2"]);
        let seen = ids(flatten(&rows, &expanded));
        assert!(seen.iter().all(|(id, _)| !id.starts_with("a2")));
        assert!(seen.iter().all(|(id, _)| *id != "a1"));
    }

    #[test]
    fn flattening_is_restartable() {
        let rows = tree();
        let mut expanded = ExpandedRows::new();
        expanded.expand_all(&rows);
        let iter = flatten(&rows, &expanded);
        let first = ids(iter.clone());
        let second = ids(iter);
        assert_eq!(first, second);
        assert_eq!(first.len(), 7);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut expanded = ExpandedRows::new();
        assert!(expanded.toggle("a"));
        assert!(expanded.contains("a"));
        assert!(!expanded.toggle("a"));
        assert!(expanded.is_empty());
    }

    #[test]
    fn display_rows_report_expansion_state() {
        let rows = tree();
        let expanded = ExpandedRows::from_ids(["b"]);
        let display: Vec<_> = flatten(&rows, &expanded).collect();
        let a = display.iter().find(|d| d.row.id == "a").unwrap();
        let b = display.iter().find(|d| d.row.id == "b").unwrap();
        let c = display.iter().find(|d| d.row.id == "c").unwrap();
        assert!(a.has_children && !a.expanded);
        assert!(b.has_children && b.expanded);
        assert!(!c.has_children);
    }
}
