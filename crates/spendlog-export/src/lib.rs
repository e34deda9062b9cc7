//! spendlog-export
//!
//! Export collaborators: a tabular print report and a two-sheet spreadsheet
//! workbook. Both are pure consumers of a read-only snapshot of core query
//! results; no core state flows back from here.

pub mod error;
pub mod report;
pub mod task;
pub mod workbook;

pub use error::ExportError;
pub use report::*;
pub use task::ExportTask;
pub use workbook::write_workbook;
