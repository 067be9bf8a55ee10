//! Reporting utilities: bootstrap aggregation and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/decomposition code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;
pub mod summary;

pub use format::*;
pub use summary::*;
