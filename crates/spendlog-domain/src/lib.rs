//! spendlog-domain
//!
//! Pure domain models (Expense, Recurrence, CurrencyCode, BudgetConfig, Period).
//! No I/O, no storage. Only data types and core enums.

pub mod budget;
pub mod currency;
pub mod expense;
pub mod period;

pub use budget::*;
pub use currency::*;
pub use expense::*;
pub use period::*;
