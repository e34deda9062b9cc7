//! The ledger store: single source of truth for expenses, the currency lock,
//! and budget configuration.

use chrono::NaiveDate;
use spendlog_domain::{
    BudgetConfig, BudgetProgress, BudgetScope, BudgetSignal, CurrencyCode, Expense, ExpenseDraft,
    Period,
};
use uuid::Uuid;

use crate::{
    budget, recurrence,
    error::CoreError,
    summary::{self, ExpenseFilter},
};

/// Result of a successful add: the stored entry, how many occurrences the
/// recurrence expander appended, and whether this add set the currency lock
/// (the UI disables the currency selector when it did).
#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub expense: Expense,
    pub occurrences: usize,
    pub locked: Option<CurrencyCode>,
}

/// Owns the expense ledger, the currency lock, the budget configuration, and
/// the edit-in-progress marker. All mutation flows through the operations
/// below; every mutating operation either fully completes or fully fails
/// before returning.
#[derive(Debug, Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    locked_currency: Option<CurrencyCode>,
    budgets: BudgetConfig,
    editing: Option<Uuid>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted state. Trusts the gateway's data; the
    /// currency invariant is re-established by normal operation.
    pub fn from_parts(
        expenses: Vec<Expense>,
        locked_currency: Option<CurrencyCode>,
        budgets: BudgetConfig,
    ) -> Self {
        Self {
            expenses,
            locked_currency,
            budgets,
            editing: None,
        }
    }

    /// Validates and appends a new expense, then pre-materializes its
    /// recurrence occurrences. The first successful add locks the ledger to
    /// the draft's currency; later adds in any other currency are rejected
    /// with `CurrencyMismatch` before any state changes.
    pub fn add(&mut self, draft: &ExpenseDraft) -> Result<AddOutcome, CoreError> {
        let expense = self.build_expense(draft, None)?;
        let locked = if self.locked_currency.is_none() {
            self.locked_currency = Some(expense.currency.clone());
            self.locked_currency.clone()
        } else {
            None
        };

        let generated = recurrence::expand(&expense);
        let occurrences = generated.len();
        self.expenses.push(expense.clone());
        self.expenses.extend(generated);

        tracing::info!(
            id = %expense.id,
            category = %expense.category,
            occurrences,
            "expense added"
        );
        Ok(AddOutcome {
            expense,
            occurrences,
            locked,
        })
    }

    /// Replaces the record with the given id in place, keeping the id stable.
    /// Recurrence is not re-expanded on update. Clears the edit marker.
    pub fn update(&mut self, id: Uuid, draft: &ExpenseDraft) -> Result<Expense, CoreError> {
        let expense = self.build_expense(draft, Some(id))?;
        let position = self
            .position_of(id)
            .ok_or(CoreError::NotFound(id))?;
        self.expenses[position] = expense.clone();
        self.editing = None;
        tracing::info!(id = %id, "expense updated");
        Ok(expense)
    }

    /// Removes and returns the record with the given id. Caller confirmation
    /// is a presentation concern. Clears the edit marker.
    pub fn remove(&mut self, id: Uuid) -> Result<Expense, CoreError> {
        let position = self
            .position_of(id)
            .ok_or(CoreError::NotFound(id))?;
        let removed = self.expenses.remove(position);
        self.editing = None;
        tracing::info!(id = %id, "expense removed");
        Ok(removed)
    }

    /// Empties the ledger and the edit marker. Budgets and the currency lock
    /// are untouched.
    pub fn clear_all(&mut self) {
        self.expenses.clear();
        self.editing = None;
        tracing::info!("ledger cleared");
    }

    /// DESTRUCTIVE: clears the currency lock, empties the ledger, and resets
    /// budgets to defaults in one cascade. This is the only operation that
    /// touches all three owned entities at once, and it cannot be undone from
    /// within the app.
    pub fn reset_currency_lock(&mut self) {
        self.locked_currency = None;
        self.expenses.clear();
        self.budgets = BudgetConfig::default();
        self.editing = None;
        tracing::warn!("currency lock reset; ledger and budgets cleared");
    }

    /// Sets the total cap or one category cap, overwriting any prior value
    /// for that scope only.
    pub fn set_budget(&mut self, scope: BudgetScope, amount: f64) -> Result<(), CoreError> {
        budget::validate_budget_amount(amount)?;
        match scope {
            BudgetScope::Total => self.budgets.total = Some(amount),
            BudgetScope::Category(name) => {
                self.budgets.categories.insert(name, amount);
            }
        }
        Ok(())
    }

    /// Advisory budget check for the scope(s) `expense` touches.
    pub fn evaluate(&self, expense: &Expense) -> Vec<BudgetSignal> {
        budget::evaluate(
            &self.expenses,
            self.locked_currency.as_ref(),
            &self.budgets,
            expense,
        )
    }

    pub fn progress(&self, scope: BudgetScope) -> BudgetProgress {
        budget::progress(
            &self.expenses,
            self.locked_currency.as_ref(),
            &self.budgets,
            scope,
        )
    }

    pub fn category_progress(&self) -> Vec<BudgetProgress> {
        budget::category_progress(&self.expenses, self.locked_currency.as_ref(), &self.budgets)
    }

    pub fn total_spent(&self) -> f64 {
        summary::total_spent(&self.expenses, self.locked_currency.as_ref())
    }

    pub fn spent_by_category(&self, category: &str) -> f64 {
        summary::spent_by_category(&self.expenses, self.locked_currency.as_ref(), category)
    }

    pub fn period_total(&self, period: Period, reference: NaiveDate) -> f64 {
        summary::period_total(
            &self.expenses,
            self.locked_currency.as_ref(),
            period,
            reference,
        )
    }

    /// Fresh filtered view over the ledger; see [`summary::filter_expenses`].
    pub fn filter<'a>(
        &'a self,
        filter: &ExpenseFilter,
        reference: NaiveDate,
    ) -> impl Iterator<Item = &'a Expense> + 'a {
        summary::filter_expenses(&self.expenses, filter, reference)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn locked_currency(&self) -> Option<&CurrencyCode> {
        self.locked_currency.as_ref()
    }

    pub fn budgets(&self) -> &BudgetConfig {
        &self.budgets
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Positional access for list rendering only; ids are the contract for
    /// cross-references.
    pub fn expense_at(&self, index: usize) -> Option<&Expense> {
        self.expenses.get(index)
    }

    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.expenses.iter().position(|e| e.id == id)
    }

    /// Marks a record as being edited and returns a copy for form fill.
    /// Records in a currency other than the lock cannot be edited.
    pub fn begin_edit(&mut self, id: Uuid) -> Result<Expense, CoreError> {
        let expense = self.expense(id).ok_or(CoreError::NotFound(id))?.clone();
        if let Some(lock) = &self.locked_currency {
            if expense.currency != *lock {
                return Err(CoreError::CurrencyMismatch {
                    locked: lock.clone(),
                    given: expense.currency,
                });
            }
        }
        self.editing = Some(id);
        Ok(expense)
    }

    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Shared validation for add and update. Returns the fully built record
    /// without touching any state, so failed operations leave no trace.
    fn build_expense(
        &self,
        draft: &ExpenseDraft,
        keep_id: Option<Uuid>,
    ) -> Result<Expense, CoreError> {
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(CoreError::Validation(format!(
                "amount must be greater than 0 (got {})",
                draft.amount
            )));
        }
        let currency = draft
            .currency
            .clone()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| CoreError::Validation("currency is required".into()))?;
        if let Some(lock) = &self.locked_currency {
            if currency != *lock {
                return Err(CoreError::CurrencyMismatch {
                    locked: lock.clone(),
                    given: currency,
                });
            }
        }
        let date = draft
            .date
            .ok_or_else(|| CoreError::Validation("date is required".into()))?;

        let mut expense = Expense::new(draft.amount, draft.resolved_category(), currency, date)
            .with_recurring(draft.recurring);
        if let Some(note) = &draft.note {
            expense = expense.with_note(note.clone());
        }
        if let Some(id) = keep_id {
            expense.id = id;
        }
        Ok(expense)
    }
}
