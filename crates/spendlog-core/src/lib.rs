//! spendlog-core
//!
//! State and derivation layer for the expense tracker: the expense store,
//! recurrence expansion, budget evaluation, aggregation queries, and the
//! persistence boundary. No rendering, no terminal I/O, no direct file access.

pub mod budget;
pub mod error;
pub mod recurrence;
pub mod session;
pub mod storage;
pub mod store;
pub mod summary;
pub mod utils;

pub use error::CoreError;
pub use session::*;
pub use storage::*;
pub use store::*;
pub use summary::*;
