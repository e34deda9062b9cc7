//! Persistence boundary for the expense tracker state.

use spendlog_domain::{BudgetConfig, CurrencyCode, Expense};

use crate::CoreError;

/// Key under which the expense ledger is persisted.
pub const EXPENSES_KEY: &str = "expenses";
/// Key under which the currency lock is persisted.
pub const LOCKED_CURRENCY_KEY: &str = "lockedCurrency";
/// Key under which the budget configuration is persisted.
pub const BUDGETS_KEY: &str = "budgets";

/// Abstraction over the key-value backend that stores the ledger, the
/// currency lock, and the budget configuration as JSON values.
///
/// Loads happen once at startup and must be lenient: a missing or malformed
/// value degrades to the type's default rather than failing the load. Saves
/// happen after every successful mutation and surface real errors, which the
/// caller reports without rolling back in-memory state.
pub trait StateStorage: Send + Sync {
    fn load_expenses(&self) -> Result<Vec<Expense>, CoreError>;
    fn save_expenses(&self, expenses: &[Expense]) -> Result<(), CoreError>;
    fn load_locked_currency(&self) -> Result<Option<CurrencyCode>, CoreError>;
    fn save_locked_currency(&self, lock: Option<&CurrencyCode>) -> Result<(), CoreError>;
    fn load_budgets(&self) -> Result<BudgetConfig, CoreError>;
    fn save_budgets(&self, budgets: &BudgetConfig) -> Result<(), CoreError>;
}
