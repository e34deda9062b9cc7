//! Read-only report snapshot and the tabular print view built from it.

use chrono::NaiveDate;
use spendlog_core::ExpenseStore;
use spendlog_domain::{
    format_amount, BudgetProgress, BudgetScope, CurrencyCode, Period,
};

/// One line of the report table.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub amount: f64,
    pub currency: CurrencyCode,
    pub category: String,
    pub note: Option<String>,
    pub recurring: &'static str,
}

/// Frozen view of {ledger rows, period totals, budget standing} taken at a
/// reference date. Exporters read this and never the live store.
#[derive(Debug, Clone)]
pub struct ReportSnapshot {
    pub generated_at: NaiveDate,
    pub currency: Option<CurrencyCode>,
    pub rows: Vec<ReportRow>,
    pub entry_count: usize,
    pub total_spent: f64,
    pub today_total: f64,
    pub week_total: f64,
    pub month_total: f64,
    pub total_budget: BudgetProgress,
    pub category_budgets: Vec<BudgetProgress>,
}

impl ReportSnapshot {
    pub fn capture(store: &ExpenseStore, reference: NaiveDate) -> Self {
        let rows = store
            .expenses()
            .iter()
            .map(|e| ReportRow {
                date: e.date,
                amount: e.amount,
                currency: e.currency.clone(),
                category: e.category.clone(),
                note: e.note.clone(),
                recurring: e.recurring.label(),
            })
            .collect();
        Self {
            generated_at: reference,
            currency: store.locked_currency().cloned(),
            rows,
            entry_count: store.len(),
            total_spent: store.total_spent(),
            today_total: store.period_total(Period::Today, reference),
            week_total: store.period_total(Period::Week, reference),
            month_total: store.period_total(Period::Month, reference),
            total_budget: store.progress(BudgetScope::Total),
            category_budgets: store.category_progress(),
        }
    }

    fn format(&self, amount: f64) -> String {
        match &self.currency {
            Some(code) => format_amount(amount, code),
            None => format!("{amount:.2}"),
        }
    }
}

/// Renders the print-layout report: the expense table, period totals, budget
/// standing, and a generation stamp.
pub fn render_text(snapshot: &ReportSnapshot) -> String {
    let mut out = String::new();
    out.push_str("Expense Report\n");
    out.push_str("==============\n\n");

    out.push_str(&format!(
        "{:<12} {:>12} {:<16} {:<24} {:<10}\n",
        "Date", "Amount", "Category", "Note", "Recurring"
    ));
    for row in &snapshot.rows {
        out.push_str(&format!(
            "{:<12} {:>12} {:<16} {:<24} {:<10}\n",
            row.date.format("%Y-%m-%d"),
            snapshot.format(row.amount),
            row.category,
            row.note.as_deref().unwrap_or("-"),
            row.recurring,
        ));
    }

    out.push_str(&format!(
        "\nToday: {}   This Week: {}   This Month: {}\n",
        snapshot.format(snapshot.today_total),
        snapshot.format(snapshot.week_total),
        snapshot.format(snapshot.month_total),
    ));
    out.push_str(&format!(
        "Total: {} across {} entries\n",
        snapshot.format(snapshot.total_spent),
        snapshot.entry_count
    ));

    match snapshot.total_budget.limit {
        Some(limit) => out.push_str(&format!(
            "Total budget: {} / {} ({})\n",
            snapshot.format(snapshot.total_budget.spent),
            snapshot.format(limit),
            snapshot.total_budget.tier,
        )),
        None => out.push_str("Total budget: no limit\n"),
    }
    for standing in &snapshot.category_budgets {
        if let Some(limit) = standing.limit {
            out.push_str(&format!(
                "  {}: {} / {} ({})\n",
                standing.scope,
                snapshot.format(standing.spent),
                snapshot.format(limit),
                standing.tier,
            ));
        }
    }

    out.push_str(&format!(
        "\nGenerated on {}\n",
        snapshot.generated_at.format("%Y-%m-%d")
    ));
    out
}
