//! Synthetic dataset generation for tests and downstream demos.

pub mod synthetic;

pub use synthetic::*;
