use report_domain::Quarter;

const GROUP_SEPARATOR: char = ',';

/// Renders an amount with comma digit grouping and at most two decimals.
/// Absent values render as an empty string.
pub fn format_amount(value: Option<f64>) -> String {
    let Some(amount) = value else {
        return String::new();
    };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut body = group_digits(int_part, GROUP_SEPARATOR);
    if !frac.is_empty() {
        body.push('.');
        body.push_str(frac);
    }
    if amount < 0.0 && body.chars().any(|ch| ch != '0' && ch != '.' && ch != GROUP_SEPARATOR) {
        body.insert(0, '-');
    }
    body
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Column headings for the four quarters of a fiscal year.
pub fn quarter_labels(fiscal_year: &str) -> [String; 4] {
    Quarter::ALL.map(|quarter| {
        let months = match quarter {
            Quarter::Q1 => "Jan-Mar",
            Quarter::Q2 => "Apr-Jun",
            Quarter::Q3 => "Jul-Sep",
            Quarter::Q4 => "Oct-Dec",
        };
        format!("{} ({} {})", quarter.as_str().to_uppercase(), months, fiscal_year)
    })
}
