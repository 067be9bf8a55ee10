//! Decomposition orchestration.
//!
//! Responsibilities:
//!
//! - split the table into the two indicator groups and fit OLS per group
//! - select reference coefficients under the chosen convention
//! - compute the gap and per-covariate explained/unexplained vectors

pub mod reference;
pub mod two_fold;

pub use reference::*;
pub use two_fold::*;
