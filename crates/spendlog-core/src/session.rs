//! Session facade: wires the store to a persistence gateway and turns each
//! operation into plain data the presentation layer can render.

use std::fmt;

use spendlog_domain::{BudgetScope, BudgetSignal, CurrencyCode, Expense, ExpenseDraft};
use uuid::Uuid;

use crate::{
    error::CoreError,
    storage::StateStorage,
    store::ExpenseStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Warning,
    Success,
}

/// Transient user-facing message. The core never renders; it hands these to
/// the presentation layer as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything a completed mutation hands back to the caller: the touched
/// record (when one exists), recurrence expansion count, whether the currency
/// lock was set by this operation, budget advisories, and display
/// notifications (including a persistence warning if the write-back failed).
#[derive(Debug, Clone, Default)]
pub struct MutationReport {
    pub expense: Option<Expense>,
    pub occurrences: usize,
    pub locked: Option<CurrencyCode>,
    pub signals: Vec<BudgetSignal>,
    pub notices: Vec<Notification>,
}

/// One running app session: state loaded once at startup, held in memory,
/// written back after every mutation. In-memory state is the source of truth;
/// persistence is best-effort and its failures are reported, never rolled
/// back.
pub struct Session<S: StateStorage> {
    store: ExpenseStore,
    storage: S,
}

impl<S: StateStorage> Session<S> {
    /// Loads persisted state through the gateway. Each key degrades to its
    /// default on failure so a damaged store never prevents startup.
    pub fn open(storage: S) -> Self {
        let expenses = storage.load_expenses().unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to load expenses; starting empty");
            Vec::new()
        });
        let locked_currency = storage.load_locked_currency().unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to load currency lock; starting unset");
            None
        });
        let budgets = storage.load_budgets().unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to load budgets; starting with defaults");
            Default::default()
        });
        Self {
            store: ExpenseStore::from_parts(expenses, locked_currency, budgets),
            storage,
        }
    }

    /// Read-only view of the store for queries and snapshots.
    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn add(&mut self, draft: &ExpenseDraft) -> Result<MutationReport, CoreError> {
        let outcome = self.store.add(draft)?;
        let signals = self.store.evaluate(&outcome.expense);
        let mut report = MutationReport {
            expense: Some(outcome.expense),
            occurrences: outcome.occurrences,
            locked: outcome.locked,
            signals,
            notices: vec![Notification::success("Expense added successfully")],
        };
        self.finish(&mut report);
        Ok(report)
    }

    pub fn update(&mut self, id: Uuid, draft: &ExpenseDraft) -> Result<MutationReport, CoreError> {
        let expense = self.store.update(id, draft)?;
        let signals = self.store.evaluate(&expense);
        let mut report = MutationReport {
            expense: Some(expense),
            signals,
            notices: vec![Notification::success("Expense updated successfully")],
            ..Default::default()
        };
        self.finish(&mut report);
        Ok(report)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<MutationReport, CoreError> {
        let removed = self.store.remove(id)?;
        let mut report = MutationReport {
            expense: Some(removed),
            notices: vec![Notification::success("Expense deleted")],
            ..Default::default()
        };
        self.finish(&mut report);
        Ok(report)
    }

    pub fn clear_all(&mut self) -> MutationReport {
        self.store.clear_all();
        let mut report = MutationReport {
            notices: vec![Notification::success("All expenses have been cleared.")],
            ..Default::default()
        };
        self.finish(&mut report);
        report
    }

    /// Destructive cascade; see [`ExpenseStore::reset_currency_lock`].
    pub fn reset_currency_lock(&mut self) -> MutationReport {
        self.store.reset_currency_lock();
        let mut report = MutationReport {
            notices: vec![Notification::success("Currency reset successfully")],
            ..Default::default()
        };
        self.finish(&mut report);
        report
    }

    pub fn set_budget(
        &mut self,
        scope: BudgetScope,
        amount: f64,
    ) -> Result<MutationReport, CoreError> {
        self.store.set_budget(scope, amount)?;
        let mut report = MutationReport {
            notices: vec![Notification::success("Budget set successfully")],
            ..Default::default()
        };
        self.finish(&mut report);
        Ok(report)
    }

    pub fn begin_edit(&mut self, id: Uuid) -> Result<Expense, CoreError> {
        self.store.begin_edit(id)
    }

    pub fn cancel_edit(&mut self) {
        self.store.cancel_edit();
    }

    /// Persists after a successful mutation, folding budget advisories and
    /// any persistence failure into the report's notifications.
    fn finish(&self, report: &mut MutationReport) {
        for signal in &report.signals {
            report.notices.push(Notification::warning(signal.to_string()));
        }
        if let Err(err) = self.persist() {
            tracing::warn!(%err, "state write-back failed; in-memory state kept");
            report
                .notices
                .push(Notification::warning(format!("Failed to save data: {err}")));
        }
    }

    fn persist(&self) -> Result<(), CoreError> {
        self.storage.save_expenses(self.store.expenses())?;
        self.storage
            .save_locked_currency(self.store.locked_currency())?;
        self.storage.save_budgets(self.store.budgets())?;
        Ok(())
    }
}
