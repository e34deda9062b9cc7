use std::fs;

use chrono::NaiveDate;
use spendlog_core::ExpenseStore;
use spendlog_domain::{BudgetScope, ExpenseDraft, Recurrence};
use spendlog_export::{render_text, write_workbook, ReportSnapshot};
use tempfile::TempDir;

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn populated_store() -> ExpenseStore {
    let mut store = ExpenseStore::new();
    store
        .add(
            &ExpenseDraft::new(12.5, "USD", sample_date(2024, 3, 15))
                .with_category("Food")
                .with_note("team lunch"),
        )
        .expect("add");
    store
        .add(
            &ExpenseDraft::new(800.0, "USD", sample_date(2024, 3, 1))
                .with_category("Rent")
                .with_recurring(Recurrence::Monthly),
        )
        .expect("add");
    store
        .set_budget(BudgetScope::Total, 1000.0)
        .expect("set budget");
    store
}

#[test]
fn snapshot_freezes_totals_and_rows() {
    let store = populated_store();
    let snapshot = ReportSnapshot::capture(&store, sample_date(2024, 3, 15));

    // base entries plus three generated monthly occurrences
    assert_eq!(snapshot.entry_count, 5);
    assert_eq!(snapshot.rows.len(), 5);
    assert_eq!(snapshot.today_total, 12.5);
    assert_eq!(snapshot.month_total, 812.5);
    assert_eq!(snapshot.total_budget.limit, Some(1000.0));
}

#[test]
fn text_report_contains_rows_and_stamp() {
    let store = populated_store();
    let snapshot = ReportSnapshot::capture(&store, sample_date(2024, 3, 15));
    let rendered = render_text(&snapshot);

    assert!(rendered.contains("team lunch"));
    assert!(rendered.contains("Monthly"));
    assert!(rendered.contains("$12.50"));
    assert!(rendered.contains("Generated on 2024-03-15"));
    assert!(rendered.contains("Total budget:"));
}

#[test]
fn workbook_writes_two_sheets() {
    let store = populated_store();
    let snapshot = ReportSnapshot::capture(&store, sample_date(2024, 3, 15));
    let out = TempDir::new().expect("temp dir");

    let dir = write_workbook(&snapshot, out.path()).expect("write workbook");
    assert!(dir.ends_with("Expense_Report_2024-03-15"));

    let expenses = fs::read_to_string(dir.join("Expenses.csv")).expect("expenses sheet");
    let mut lines = expenses.lines();
    assert_eq!(
        lines.next(),
        Some("Date,Amount,Currency,Category,Note,Recurring")
    );
    assert_eq!(expenses.lines().count(), 1 + snapshot.rows.len());
    assert!(expenses.contains("2024-03-15,12.50,USD,Food,team lunch,One-time"));

    let summary = fs::read_to_string(dir.join("Summary.csv")).expect("summary sheet");
    assert!(summary.contains("Total Expenses,5"));
    assert!(summary.contains("Total Amount,3212.50"));
    assert!(summary.contains("Today,12.50"));
}
