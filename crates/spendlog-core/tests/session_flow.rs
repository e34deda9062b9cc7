use std::sync::Mutex;

use chrono::NaiveDate;
use spendlog_core::{CoreError, NotificationKind, Session, StateStorage};
use spendlog_domain::{BudgetConfig, BudgetScope, CurrencyCode, Expense, ExpenseDraft};

fn sample_date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn draft(amount: f64, category: &str) -> ExpenseDraft {
    ExpenseDraft::new(amount, "USD", sample_date(1)).with_category(category)
}

#[derive(Default)]
struct MemoryStorage {
    inner: Mutex<MemoryState>,
}

#[derive(Default, Clone)]
struct MemoryState {
    expenses: Vec<Expense>,
    lock: Option<CurrencyCode>,
    budgets: BudgetConfig,
    saves: usize,
}

impl MemoryStorage {
    fn snapshot(&self) -> MemoryState {
        self.inner.lock().unwrap().clone()
    }
}

impl StateStorage for MemoryStorage {
    fn load_expenses(&self) -> Result<Vec<Expense>, CoreError> {
        Ok(self.inner.lock().unwrap().expenses.clone())
    }

    fn save_expenses(&self, expenses: &[Expense]) -> Result<(), CoreError> {
        let mut state = self.inner.lock().unwrap();
        state.expenses = expenses.to_vec();
        state.saves += 1;
        Ok(())
    }

    fn load_locked_currency(&self) -> Result<Option<CurrencyCode>, CoreError> {
        Ok(self.inner.lock().unwrap().lock.clone())
    }

    fn save_locked_currency(&self, lock: Option<&CurrencyCode>) -> Result<(), CoreError> {
        self.inner.lock().unwrap().lock = lock.cloned();
        Ok(())
    }

    fn load_budgets(&self) -> Result<BudgetConfig, CoreError> {
        Ok(self.inner.lock().unwrap().budgets.clone())
    }

    fn save_budgets(&self, budgets: &BudgetConfig) -> Result<(), CoreError> {
        self.inner.lock().unwrap().budgets = budgets.clone();
        Ok(())
    }
}

/// Fails every operation, standing in for an unavailable backing store.
struct BrokenStorage;

impl StateStorage for BrokenStorage {
    fn load_expenses(&self) -> Result<Vec<Expense>, CoreError> {
        Err(CoreError::Persistence("store unavailable".into()))
    }

    fn save_expenses(&self, _: &[Expense]) -> Result<(), CoreError> {
        Err(CoreError::Persistence("store unavailable".into()))
    }

    fn load_locked_currency(&self) -> Result<Option<CurrencyCode>, CoreError> {
        Err(CoreError::Persistence("store unavailable".into()))
    }

    fn save_locked_currency(&self, _: Option<&CurrencyCode>) -> Result<(), CoreError> {
        Err(CoreError::Persistence("store unavailable".into()))
    }

    fn load_budgets(&self) -> Result<BudgetConfig, CoreError> {
        Err(CoreError::Persistence("store unavailable".into()))
    }

    fn save_budgets(&self, _: &BudgetConfig) -> Result<(), CoreError> {
        Err(CoreError::Persistence("store unavailable".into()))
    }
}

#[test]
fn mutations_write_back_after_each_operation() {
    let mut session = Session::open(MemoryStorage::default());

    let report = session.add(&draft(10.0, "Food")).expect("add");
    assert_eq!(report.notices[0].kind, NotificationKind::Success);
    assert_eq!(session.storage().snapshot().expenses.len(), 1);
    assert_eq!(
        session.storage().snapshot().lock,
        Some(CurrencyCode::new("USD"))
    );

    session
        .set_budget(BudgetScope::Total, 100.0)
        .expect("set budget");
    assert_eq!(session.storage().snapshot().budgets.total, Some(100.0));

    let id = session.store().expenses()[0].id;
    session.remove(id).expect("remove");
    assert!(session.storage().snapshot().expenses.is_empty());
}

#[test]
fn state_survives_reopen() {
    let storage = MemoryStorage::default();
    {
        let mut session = Session::open(storage);
        session.add(&draft(10.0, "Food")).expect("add");
        session.add(&draft(5.5, "Transport")).expect("add");
        session
            .set_budget(BudgetScope::Category("Food".into()), 50.0)
            .expect("set budget");

        let snapshot = session.storage().snapshot();
        let reopened = Session::open(MemoryStorage {
            inner: Mutex::new(snapshot),
        });
        assert_eq!(reopened.store().len(), 2);
        assert_eq!(reopened.store().total_spent(), 15.5);
        assert_eq!(
            reopened.store().locked_currency(),
            Some(&CurrencyCode::new("USD"))
        );
        assert_eq!(
            reopened
                .store()
                .budgets()
                .categories
                .get("Food")
                .copied(),
            Some(50.0)
        );
    }
}

#[test]
fn budget_advisories_become_warning_notices() {
    let mut session = Session::open(MemoryStorage::default());
    session
        .set_budget(BudgetScope::Total, 100.0)
        .expect("set budget");
    session.add(&draft(70.0, "Food")).expect("add");

    let report = session.add(&draft(50.0, "Rent")).expect("add");
    assert_eq!(report.signals.len(), 1);
    assert!(report
        .notices
        .iter()
        .any(|n| n.kind == NotificationKind::Warning
            && n.message.contains("total budget")));
}

#[test]
fn broken_storage_neither_blocks_startup_nor_rolls_back() {
    let mut session = Session::open(BrokenStorage);
    assert!(session.store().is_empty());

    let report = session.add(&draft(10.0, "Food")).expect("add");
    // The mutation stands in memory; the failed write becomes a warning.
    assert_eq!(session.store().len(), 1);
    assert!(report
        .notices
        .iter()
        .any(|n| n.kind == NotificationKind::Warning
            && n.message.contains("Failed to save data")));
}

#[test]
fn reset_currency_lock_clears_persisted_state() {
    let mut session = Session::open(MemoryStorage::default());
    session.add(&draft(10.0, "Food")).expect("add");
    session
        .set_budget(BudgetScope::Total, 100.0)
        .expect("set budget");

    session.reset_currency_lock();
    let snapshot = session.storage().snapshot();
    assert!(snapshot.expenses.is_empty());
    assert_eq!(snapshot.lock, None);
    assert!(snapshot.budgets.is_empty());
}
