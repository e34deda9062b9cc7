//! Budget evaluation: spent-versus-limit standing and advisory signals.

use spendlog_domain::{
    BudgetConfig, BudgetProgress, BudgetScope, BudgetSignal, CurrencyCode, Expense,
};

use crate::{
    error::CoreError,
    summary::{spent_by_category, total_spent},
};

/// Rejects non-positive or non-finite budget amounts.
pub fn validate_budget_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::Validation(format!(
            "budget amount must be greater than 0 (got {amount})"
        )));
    }
    Ok(())
}

/// Checks the ledger against configured caps after a mutation touching
/// `expense`. Produces zero to two advisory signals; the mutation itself is
/// never blocked or reversed.
pub fn evaluate(
    expenses: &[Expense],
    lock: Option<&CurrencyCode>,
    budgets: &BudgetConfig,
    expense: &Expense,
) -> Vec<BudgetSignal> {
    let mut signals = Vec::new();
    if let Some(limit) = budgets.total {
        let spent = total_spent(expenses, lock);
        if spent > limit {
            signals.push(BudgetSignal::TotalExceeded { spent, limit });
        }
    }
    if let Some(&limit) = budgets.categories.get(&expense.category) {
        let spent = spent_by_category(expenses, lock, &expense.category);
        if spent > limit {
            signals.push(BudgetSignal::CategoryExceeded {
                category: expense.category.clone(),
                spent,
                limit,
            });
        }
    }
    signals
}

/// Spent amount, configured limit, and display tier for one scope.
pub fn progress(
    expenses: &[Expense],
    lock: Option<&CurrencyCode>,
    budgets: &BudgetConfig,
    scope: BudgetScope,
) -> BudgetProgress {
    let spent = match &scope {
        BudgetScope::Total => total_spent(expenses, lock),
        BudgetScope::Category(name) => spent_by_category(expenses, lock, name),
    };
    let limit = budgets.limit_for(&scope);
    BudgetProgress::from_parts(scope, spent, limit)
}

/// Progress rows for every category with a configured cap, in name order.
pub fn category_progress(
    expenses: &[Expense],
    lock: Option<&CurrencyCode>,
    budgets: &BudgetConfig,
) -> Vec<BudgetProgress> {
    budgets
        .categories
        .keys()
        .map(|name| {
            progress(
                expenses,
                lock,
                budgets,
                BudgetScope::Category(name.clone()),
            )
        })
        .collect()
}
