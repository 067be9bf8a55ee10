//! Bootstrap result aggregation.
//!
//! Collapses a set of bootstrap decompositions into one row per covariate:
//! the mean contribution across replicates and a two-sided percentile
//! confidence interval. Aggregation is order-independent, so it does not
//! matter how the runner scheduled its replicates.

use serde::{Deserialize, Serialize};

use crate::domain::{Component, Decomposition};
use crate::error::Error;
use crate::math::{mean, percentile};

/// Default two-sided confidence level, in percent.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 95.0;

/// Aggregated contribution of one covariate across replicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CovariateSummary {
    pub covariate: String,
    pub mean: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// Per-covariate report for one decomposition component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub component: Component,
    /// Two-sided confidence level in percent, e.g. 95.
    pub confidence_level: f64,
    /// Number of replicates the summary was computed from.
    pub n_replicates: usize,
    pub rows: Vec<CovariateSummary>,
}

/// Summarize one component of a bootstrap result set.
///
/// Every replicate must carry the same covariate schema; drift across
/// replicates is a data-integrity error, never silently dropped. Empty input
/// fails rather than producing an empty report.
pub fn summarize(
    results: &[Decomposition],
    component: Component,
    confidence_level: f64,
) -> Result<ComponentSummary, Error> {
    if results.is_empty() {
        return Err(Error::InsufficientData {
            detail: "cannot summarize an empty bootstrap result set".to_string(),
        });
    }
    if !confidence_level.is_finite() || confidence_level <= 0.0 || confidence_level >= 100.0 {
        return Err(Error::InvalidInput {
            detail: format!("confidence level {confidence_level} is not in (0, 100)"),
        });
    }

    let covariates = &results[0].covariates;
    for (i, result) in results.iter().enumerate() {
        if i > 0 && &result.covariates != covariates {
            return Err(Error::SchemaMismatch {
                detail: format!(
                    "replicate {i} has covariates {:?}, expected {:?}",
                    result.covariates, covariates
                ),
            });
        }
        if result.component(component).len() != covariates.len() {
            return Err(Error::SchemaMismatch {
                detail: format!(
                    "replicate {i} has {} {} values for {} covariates",
                    result.component(component).len(),
                    component.label(),
                    covariates.len()
                ),
            });
        }
    }

    let q_lower = (100.0 - confidence_level) / 2.0;
    let q_upper = 100.0 - q_lower;

    let mut rows = Vec::with_capacity(covariates.len());
    for (c, name) in covariates.iter().enumerate() {
        let draws: Vec<f64> = results.iter().map(|r| r.component(component)[c]).collect();
        // Non-empty by the checks above, so the statistics always exist.
        let mean = mean(&draws).ok_or_else(|| Error::InsufficientData {
            detail: format!("no draws for covariate {name}"),
        })?;
        let ci_lower = percentile(&draws, q_lower).ok_or_else(|| Error::InsufficientData {
            detail: format!("no draws for covariate {name}"),
        })?;
        let ci_upper = percentile(&draws, q_upper).ok_or_else(|| Error::InsufficientData {
            detail: format!("no draws for covariate {name}"),
        })?;
        rows.push(CovariateSummary {
            covariate: name.clone(),
            mean,
            ci_lower,
            ci_upper,
        });
    }

    Ok(ComponentSummary {
        component,
        confidence_level,
        n_replicates: results.len(),
        rows,
    })
}
