//! Domain types used throughout the decomposition pipeline.
//!
//! This module defines:
//!
//! - the input observation table (`ObservationTable`)
//! - decomposition configuration enums (`Convention`, `Component`)
//! - fit and decomposition outputs (`FittedModel`, `Decomposition`)

pub mod types;

pub use types::*;
