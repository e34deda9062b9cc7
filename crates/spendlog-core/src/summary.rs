//! Pure aggregation and filtering over ledger rows.
//!
//! Nothing here mutates or caches: every call computes a fresh view, and all
//! date-relative queries take an explicit reference date so "now" stays at
//! the caller's boundary.

use chrono::NaiveDate;
use spendlog_domain::{CurrencyCode, Expense, Period};

/// Predicate for the expense list: a period window plus a free-text search
/// matched case-insensitively against category and note.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub period: Period,
    pub search: String,
}

impl ExpenseFilter {
    pub fn new(period: Period, search: impl Into<String>) -> Self {
        Self {
            period,
            search: search.into(),
        }
    }
}

/// Sum of amounts in the locked currency. With no lock set (an empty ledger)
/// this is zero.
pub fn total_spent(expenses: &[Expense], lock: Option<&CurrencyCode>) -> f64 {
    sum_matching(expenses, lock, |_| true)
}

/// Sum of amounts for one category, in the locked currency.
pub fn spent_by_category(
    expenses: &[Expense],
    lock: Option<&CurrencyCode>,
    category: &str,
) -> f64 {
    sum_matching(expenses, lock, |e| e.category == category)
}

/// Sum of amounts falling inside `period` relative to `reference`, in the
/// locked currency.
pub fn period_total(
    expenses: &[Expense],
    lock: Option<&CurrencyCode>,
    period: Period,
    reference: NaiveDate,
) -> f64 {
    sum_matching(expenses, lock, |e| period.matches(e.date, reference))
}

/// Lazy, restartable view of the rows matching `filter`. The iterator borrows
/// the ledger, so each call reflects the latest state.
pub fn filter_expenses<'a>(
    expenses: &'a [Expense],
    filter: &ExpenseFilter,
    reference: NaiveDate,
) -> impl Iterator<Item = &'a Expense> + 'a {
    let period = filter.period;
    let query = filter.search.trim().to_lowercase();
    expenses.iter().filter(move |e| {
        if !period.matches(e.date, reference) {
            return false;
        }
        if query.is_empty() {
            return true;
        }
        e.category.to_lowercase().contains(&query)
            || e.note
                .as_deref()
                .is_some_and(|note| note.to_lowercase().contains(&query))
    })
}

fn sum_matching<F>(expenses: &[Expense], lock: Option<&CurrencyCode>, predicate: F) -> f64
where
    F: Fn(&Expense) -> bool,
{
    let Some(lock) = lock else {
        return 0.0;
    };
    expenses
        .iter()
        .filter(|e| e.currency == *lock && predicate(e))
        .map(|e| e.amount)
        .sum()
}
