//! Two-sheet spreadsheet workbook: an `Expenses` sheet with the full ledger
//! and a `Summary` sheet with counts and period totals.

use std::path::{Path, PathBuf};

use crate::{error::ExportError, report::ReportSnapshot};

/// Writes the workbook under `out_dir` as
/// `Expense_Report_<date>/{Expenses,Summary}.csv` and returns the created
/// directory. Fails with [`ExportError::DependencyMissing`] when the
/// `spreadsheet` feature is disabled.
#[cfg(feature = "spreadsheet")]
pub fn write_workbook(snapshot: &ReportSnapshot, out_dir: &Path) -> Result<PathBuf, ExportError> {
    let dir = out_dir.join(format!(
        "Expense_Report_{}",
        snapshot.generated_at.format("%Y-%m-%d")
    ));
    std::fs::create_dir_all(&dir)?;

    write_expense_sheet(snapshot, &dir.join("Expenses.csv"))?;
    write_summary_sheet(snapshot, &dir.join("Summary.csv"))?;
    tracing::info!(path = %dir.display(), rows = snapshot.rows.len(), "workbook written");
    Ok(dir)
}

#[cfg(not(feature = "spreadsheet"))]
pub fn write_workbook(_snapshot: &ReportSnapshot, _out_dir: &Path) -> Result<PathBuf, ExportError> {
    Err(ExportError::DependencyMissing)
}

#[cfg(feature = "spreadsheet")]
fn write_expense_sheet(snapshot: &ReportSnapshot, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer
        .write_record(["Date", "Amount", "Currency", "Category", "Note", "Recurring"])
        .map_err(csv_error)?;
    for row in &snapshot.rows {
        writer
            .write_record([
                row.date.format("%Y-%m-%d").to_string(),
                format!("{:.2}", row.amount),
                row.currency.as_str().to_string(),
                row.category.clone(),
                row.note.clone().unwrap_or_default(),
                row.recurring.to_string(),
            ])
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(feature = "spreadsheet")]
fn write_summary_sheet(snapshot: &ReportSnapshot, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    let records: Vec<[String; 2]> = vec![
        ["Summary".into(), String::new()],
        ["Total Expenses".into(), snapshot.entry_count.to_string()],
        ["Total Amount".into(), format!("{:.2}", snapshot.total_spent)],
        [String::new(), String::new()],
        ["Period".into(), "Amount".into()],
        ["Today".into(), format!("{:.2}", snapshot.today_total)],
        ["This Week".into(), format!("{:.2}", snapshot.week_total)],
        ["This Month".into(), format!("{:.2}", snapshot.month_total)],
    ];
    for record in &records {
        writer.write_record(record).map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(feature = "spreadsheet")]
fn csv_error(err: csv::Error) -> ExportError {
    ExportError::Csv(err.to_string())
}
