//! `oaxaca` library crate.
//!
//! Two-fold Oaxaca–Blinder decomposition: explain the gap in mean outcome
//! between two groups as the sum of a portion attributable to differing
//! covariate levels ("explained") and a portion attributable to differing
//! regression coefficients ("unexplained"), plus a bootstrap layer that
//! turns per-covariate contributions into percentile confidence intervals.
//!
//! The crate is a pure library so that:
//!
//! - core logic is testable without spawning processes
//! - table construction, plotting, and reporting stay external collaborators
//! - result types are plain structured data a reporting layer can consume

pub mod bootstrap;
pub mod data;
pub mod decompose;
pub mod domain;
pub mod error;
pub mod math;
pub mod report;
