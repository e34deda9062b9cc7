//! Pre-materialization of recurring expenses into dated ledger rows.
//!
//! Expanding occurrences up front keeps downstream aggregation and filtering
//! uniform: every component treats recurring and one-time expenses identically
//! as ledger rows.

use spendlog_domain::Expense;
use uuid::Uuid;

const MAX_OCCURRENCES: usize = 1024;

/// Generates the future occurrences spawned by a freshly added recurring
/// expense. One-time entries produce nothing.
///
/// The window is anchored at the base date: 30 days for daily, 28 days for
/// weekly, three calendar months for monthly. The loop condition is tested on
/// the pre-advance date, so an occurrence landing exactly on the window end is
/// still emitted. An advanced date equal to the base date is skipped, which
/// guards a zero-length step against duplicate insertion.
pub fn expand(base: &Expense) -> Vec<Expense> {
    let Some(end) = base.recurring.window_end(base.date) else {
        return Vec::new();
    };

    let mut occurrences = Vec::new();
    let mut current = base.date;
    while current < end && occurrences.len() < MAX_OCCURRENCES {
        current = base.recurring.next_date(current);
        if current == base.date {
            break;
        }
        occurrences.push(occurrence_of(base, current));
    }
    occurrences
}

/// Clones the base entry as a generated occurrence with a fresh id. Generated
/// rows inherit amount, category, note, and currency but never spawn further
/// expansion.
fn occurrence_of(base: &Expense, date: chrono::NaiveDate) -> Expense {
    let mut occurrence = base.clone();
    occurrence.id = Uuid::new_v4();
    occurrence.date = date;
    occurrence.generated = true;
    occurrence
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spendlog_domain::{CurrencyCode, Recurrence};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base(recurring: Recurrence) -> Expense {
        Expense::new(20.0, "Rent", CurrencyCode::new("USD"), date(2024, 1, 1))
            .with_recurring(recurring)
    }

    #[test]
    fn one_time_entries_expand_to_nothing() {
        assert!(expand(&base(Recurrence::None)).is_empty());
    }

    #[test]
    fn monthly_window_includes_occurrence_on_window_end() {
        let generated = expand(&base(Recurrence::Monthly));
        let dates: Vec<_> = generated.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 2, 1), date(2024, 3, 1), date(2024, 4, 1)]
        );
        assert!(generated.iter().all(|e| e.generated));
        assert!(generated.iter().all(|e| e.id != base(Recurrence::Monthly).id));
    }

    #[test]
    fn weekly_window_spans_four_occurrences() {
        let generated = expand(&base(Recurrence::Weekly));
        assert_eq!(generated.len(), 4);
        assert_eq!(generated.last().unwrap().date, date(2024, 1, 29));
    }

    #[test]
    fn daily_window_spans_thirty_occurrences() {
        let generated = expand(&base(Recurrence::Daily));
        assert_eq!(generated.len(), 30);
        assert_eq!(generated.first().unwrap().date, date(2024, 1, 2));
        assert_eq!(generated.last().unwrap().date, date(2024, 1, 31));
    }

    #[test]
    fn monthly_steps_clamp_to_short_months() {
        let expense = Expense::new(5.0, "Gym", CurrencyCode::new("USD"), date(2024, 1, 31))
            .with_recurring(Recurrence::Monthly);
        let generated = expand(&expense);
        assert_eq!(generated.first().unwrap().date, date(2024, 2, 29));
    }

    #[test]
    fn occurrences_inherit_base_fields() {
        let expense = base(Recurrence::Weekly).with_note("flat 4b");
        let generated = expand(&expense);
        for occurrence in &generated {
            assert_eq!(occurrence.amount, expense.amount);
            assert_eq!(occurrence.category, expense.category);
            assert_eq!(occurrence.note, expense.note);
            assert_eq!(occurrence.currency, expense.currency);
            assert_eq!(occurrence.recurring, expense.recurring);
        }
    }
}
