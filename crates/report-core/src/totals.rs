//! Bottom-up rollup of quarterly values.

use report_domain::{FinancialRow, Quarter};

/// Recomputes derived values over a whole report tree.
///
/// Returns a new tree; the input is left untouched. Children are finalized
/// before their parent aggregates them, at any depth. Category rows always end
/// up with all four quarters set (absent children count as zero), every row
/// gets a cumulative balance, and non-category rows keep their own values.
/// Applying the function to its own output changes nothing.
pub fn calculate_hierarchical_totals(rows: &[FinancialRow]) -> Vec<FinancialRow> {
    let totals: Vec<_> = rows.iter().map(total_row).collect();
    tracing::debug!(rows = totals.len(), "recomputed hierarchical totals");
    totals
}

fn total_row(row: &FinancialRow) -> FinancialRow {
    let mut next = row.clone();
    if let Some(children) = row.children.as_ref() {
        next.children = Some(children.iter().map(total_row).collect());
    }

    if next.is_category {
        let sums = QuarterTotals::of_rows(next.children());
        for quarter in Quarter::ALL {
            next.set_value(quarter, Some(sums.get(quarter)));
        }
    }

    next.cumulative_balance = Some(balance_of(&next));
    next
}

/// Sum of the quarters that are present.
fn balance_of(row: &FinancialRow) -> f64 {
    row.quarters().iter().flatten().sum()
}

/// Elementwise quarterly sums over a set of sibling rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuarterTotals {
    values: [f64; 4],
}

impl QuarterTotals {
    pub fn of_rows(rows: &[FinancialRow]) -> Self {
        let mut totals = Self::default();
        for row in rows {
            for quarter in Quarter::ALL {
                totals.values[quarter.index()] += row.value(quarter).unwrap_or(0.0);
            }
        }
        totals
    }

    pub fn get(&self, quarter: Quarter) -> f64 {
        self.values[quarter.index()]
    }

    pub fn balance(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Grand totals across the top-level rows of an already aggregated report.
pub fn report_totals(rows: &[FinancialRow]) -> QuarterTotals {
    QuarterTotals::of_rows(rows)
}
