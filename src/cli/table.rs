//! Text rendering of the visible part of a report.

use report_core::{format_amount, quarter_labels, report_totals, DisplayRow};
use report_domain::{FinancialRow, Quarter};

const LABEL_WIDTH: usize = 52;
const AMOUNT_WIDTH: usize = 18;
const INDENT: usize = 2;

/// Header line, one line per visible row, and a closing rule.
pub fn render<'a>(
    fiscal_year: &str,
    rows: impl Iterator<Item = DisplayRow<'a>>,
) -> Vec<String> {
    let labels = quarter_labels(fiscal_year);
    let mut header = format!("{:<LABEL_WIDTH$}", "Line item");
    for label in &labels {
        header.push_str(&format!(" {label:>AMOUNT_WIDTH$}"));
    }
    header.push_str(&format!(" {:>AMOUNT_WIDTH$}  Comment", "Cumulative"));

    let rule = "-".repeat(header.chars().count());
    let mut lines = vec![header, rule.clone()];
    lines.extend(rows.map(render_row));
    lines.push(rule);
    lines
}

/// Sums of the top-level rows, laid out under the table columns.
pub fn render_totals(rows: &[FinancialRow]) -> String {
    let totals = report_totals(rows);
    let mut line = format!("{:<LABEL_WIDTH$}", "Total");
    for quarter in Quarter::ALL {
        let amount = format_amount(Some(totals.get(quarter)));
        line.push_str(&format!(" {amount:>AMOUNT_WIDTH$}"));
    }
    let balance = format_amount(Some(totals.balance()));
    line.push_str(&format!(" {balance:>AMOUNT_WIDTH$}"));
    line
}

fn render_row(display: DisplayRow<'_>) -> String {
    let row = display.row;
    let marker = match (display.has_children, display.expanded) {
        (true, true) => "[-]",
        (true, false) => "[+]",
        (false, _) if !row.is_editable => "(=)",
        (false, _) => "   ",
    };
    let label = truncate(
        &format!(
            "{}{marker} {} {}",
            " ".repeat(display.depth * INDENT),
            row.id,
            row.title
        ),
        LABEL_WIDTH,
    );

    let mut line = format!("{label:<LABEL_WIDTH$}");
    for value in row.quarters() {
        line.push_str(&format!(" {:>AMOUNT_WIDTH$}", format_amount(value)));
    }
    line.push_str(&format!(
        " {:>AMOUNT_WIDTH$}",
        format_amount(row.cumulative_balance)
    ));
    if let Some(comment) = row.comments.as_deref() {
        line.push_str("  ");
        line.push_str(comment);
    }
    line.trim_end().to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
