//! Domain models for expense records and recurrence cadences.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{currency::CurrencyCode, period::shift_month};

/// A single ledger row: one spend of `amount` in `currency` on `date`.
///
/// `generated` marks rows produced by recurrence expansion; the original
/// entry keeps `false` and carries the recurrence cadence that spawned them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub currency: CurrencyCode,
    pub date: NaiveDate,
    #[serde(default)]
    pub recurring: Recurrence,
    #[serde(default)]
    pub generated: bool,
}

impl Expense {
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        currency: CurrencyCode,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category: category.into(),
            note: None,
            currency,
            date,
            recurring: Recurrence::None,
            generated: false,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.trim().is_empty() {
            None
        } else {
            Some(note)
        };
        self
    }

    pub fn with_recurring(mut self, recurring: Recurrence) -> Self {
        self.recurring = recurring;
        self
    }
}

/// Candidate input for an add or update, mirroring the entry form: the
/// category may come from a picker or a free-text field, with "Other" as the
/// fallback when both are blank.
#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub category: Option<String>,
    pub custom_category: Option<String>,
    pub note: Option<String>,
    pub currency: Option<CurrencyCode>,
    pub date: Option<NaiveDate>,
    pub recurring: Recurrence,
}

impl ExpenseDraft {
    pub fn new(amount: f64, currency: impl Into<CurrencyCode>, date: NaiveDate) -> Self {
        Self {
            amount,
            currency: Some(currency.into()),
            date: Some(date),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_custom_category(mut self, category: impl Into<String>) -> Self {
        self.custom_category = Some(category.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_recurring(mut self, recurring: Recurrence) -> Self {
        self.recurring = recurring;
        self
    }

    /// Resolves the effective category: picker value, else free text, else "Other".
    pub fn resolved_category(&self) -> String {
        for candidate in [&self.category, &self.custom_category] {
            if let Some(value) = candidate {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
        "Other".to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Recurrence cadence attached to an expense entry.
#[derive(Default)]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub fn is_recurring(self) -> bool {
        !matches!(self, Recurrence::None)
    }

    /// Advances a date by one cadence step.
    pub fn next_date(self, from: NaiveDate) -> NaiveDate {
        match self {
            Recurrence::None => from,
            Recurrence::Daily => from + Duration::days(1),
            Recurrence::Weekly => from + Duration::days(7),
            Recurrence::Monthly => shift_month(from, 1),
        }
    }

    /// Returns the end of the pre-materialization window anchored at `base`,
    /// or `None` for one-time entries. The windows (30 days, 28 days, three
    /// months) are a compatibility constant, not a tunable.
    pub fn window_end(self, base: NaiveDate) -> Option<NaiveDate> {
        match self {
            Recurrence::None => None,
            Recurrence::Daily => Some(base + Duration::days(30)),
            Recurrence::Weekly => Some(base + Duration::days(28)),
            Recurrence::Monthly => Some(shift_month(base, 3)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Recurrence::None => "One-time",
            Recurrence::Daily => "Daily",
            Recurrence::Weekly => "Weekly",
            Recurrence::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
