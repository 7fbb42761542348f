//! Empty report trees a new execution report starts from.

use crate::{
    catalog::{activity_catalog, FacilityKind},
    row::FinancialRow,
};

/// Builds the standard execution-report hierarchy for `fiscal_year`.
///
/// Every quarter is left absent and no cumulative balance is set; run the
/// totals engine before display. Only labels mentioning the fiscal year vary
/// between years, the shape and ids never do.
pub fn generate_empty_template(fiscal_year: &str) -> Vec<FinancialRow> {
    let prior_year = previous_year_label(fiscal_year);
    vec![
        FinancialRow::category(
            "a",
            "A. Receipts",
            vec![
                FinancialRow::leaf("a1", "Other Incomes"),
                FinancialRow::leaf("a2", "Transfers from SPIU/RBC"),
            ],
        ),
        FinancialRow::category(
            "b",
            "B. Expenditures",
            vec![
                FinancialRow::category(
                    "b01",
                    "01. Human Resources + BONUS",
                    vec![
                        FinancialRow::leaf("b01-1", "Laboratory Technician"),
                        FinancialRow::leaf("b01-2", "Nurse"),
                    ],
                ),
                FinancialRow::category(
                    "b02",
                    "02. Monitoring & Evaluation",
                    vec![
                        FinancialRow::leaf("b02-1", "Supervision CHWs"),
                        FinancialRow::leaf("b02-2", "Support group meetings"),
                    ],
                ),
                FinancialRow::category(
                    "b03",
                    "03. Living Support to Clients/Target Populations",
                    vec![
                        FinancialRow::leaf("b03-1", "Sample transport"),
                        FinancialRow::leaf("b03-2", "Home visit lost to follow up"),
                        FinancialRow::leaf("b03-3", "Transport and travel for survey/surveillance"),
                    ],
                ),
                FinancialRow::category(
                    "b04",
                    "04. Overheads (22 - Use of goods & services)",
                    vec![
                        FinancialRow::leaf("b04-1", "Infrastructure support"),
                        FinancialRow::leaf("b04-2", "Office supplies"),
                        FinancialRow::leaf("b04-3", "Transport and travel (Reporting)"),
                        FinancialRow::leaf("b04-4", "Bank charges"),
                    ],
                ),
                FinancialRow::category(
                    "b05",
                    "05. Transfer to other reporting entities",
                    vec![FinancialRow::leaf("b05-1", "Transfer to RBC")],
                ),
            ],
        ),
        FinancialRow::leaf("c", "C. Surplus / Deficit").read_only(),
        FinancialRow::category(
            "d",
            "D. Financial Assets",
            vec![
                FinancialRow::leaf("d1", "Cash at bank"),
                FinancialRow::leaf("d2", "Petty cash"),
                FinancialRow::leaf("d3", "Receivables (VAT refund)"),
                FinancialRow::leaf("d4", "Other Receivables"),
            ],
        ),
        FinancialRow::category(
            "e",
            "E. Financial Liabilities",
            vec![
                FinancialRow::leaf("e1", "Salaries on borrowed funds (BONUS)"),
                FinancialRow::leaf("e2", "Payable - Maintenance & Repairs"),
                FinancialRow::leaf("e3", "Payable - Office suppliers"),
                FinancialRow::leaf("e4", "Payable - Transportation fees"),
                FinancialRow::leaf("e5", "VAT refund to RBC"),
            ],
        ),
        FinancialRow::leaf("f", "F. Net Financial Assets").read_only(),
        FinancialRow::category(
            "g",
            "G. Closing Balance",
            vec![
                FinancialRow::leaf(
                    "g1",
                    format!("Accumulated Surplus/Deficit (FY {prior_year})"),
                ),
                FinancialRow::leaf("g2", "Prior Year Adjustments"),
                FinancialRow::leaf(
                    "g3",
                    format!("Surplus/Deficit of the Period (FY {fiscal_year})"),
                ),
            ],
        ),
    ]
}

/// Builds a category/activity forest from the program's activity catalog.
///
/// Category ids are the catalog codes (`hr`, `trc`, ...) and activity ids
/// append a one-based position (`hr-1`, `hr-2`, ...).
pub fn generate_activity_template(fiscal_year: &str, kind: FacilityKind) -> Vec<FinancialRow> {
    activity_catalog(kind)
        .iter()
        .map(|category| {
            let children = category
                .activities
                .iter()
                .enumerate()
                .map(|(idx, activity)| {
                    FinancialRow::leaf(
                        format!("{}-{}", category.code, idx + 1),
                        format!("{} ({})", activity.activity, activity.activity_type),
                    )
                })
                .collect();
            FinancialRow::category(
                category.code,
                format!("{} - FY {}", category.name, fiscal_year),
                children,
            )
        })
        .collect()
}

fn previous_year_label(fiscal_year: &str) -> String {
    fiscal_year
        .trim()
        .parse::<i32>()
        .map(|year| (year - 1).to_string())
        .unwrap_or_else(|_| format!("before {}", fiscal_year.trim()))
}
