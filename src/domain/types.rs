//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during decomposition and bootstrapping
//! - handed to an external reporting or plotting layer as plain records
//! - reloaded later for comparisons

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The form of the reference (non-discriminatory) coefficients used in a
/// two-fold decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    /// Use the benchmark group's own coefficients (`r = b_params`).
    Benchmark,
    /// Equal-weight average of both groups' coefficients.
    Reimers,
    /// Sample-size-weighted average of both groups' coefficients.
    Cotton,
    /// Pooled regression without a group dummy. Recognized but unimplemented;
    /// selecting it fails rather than falling back to another convention.
    Neumark,
    /// Pooled regression with a group dummy. Recognized but unimplemented.
    Jann,
}

impl Convention {
    /// Parse a convention name as it appears in user-facing configuration.
    ///
    /// Unknown names fail with an error naming the offending string.
    pub fn parse(name: &str) -> Result<Self, Error> {
        match name {
            "benchmark" => Ok(Convention::Benchmark),
            "reimers" => Ok(Convention::Reimers),
            "cotton" => Ok(Convention::Cotton),
            "neumark" => Ok(Convention::Neumark),
            "jann" => Ok(Convention::Jann),
            other => Err(Error::UnsupportedConvention {
                name: other.to_string(),
            }),
        }
    }

    /// Lowercase label used in method strings (`two_fold_<label>`).
    pub fn label(self) -> &'static str {
        match self {
            Convention::Benchmark => "benchmark",
            Convention::Reimers => "reimers",
            Convention::Cotton => "cotton",
            Convention::Neumark => "neumark",
            Convention::Jann => "jann",
        }
    }
}

/// One of the three per-covariate contribution vectors in a decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Explained,
    AUnexplained,
    BUnexplained,
}

impl Component {
    pub fn label(self) -> &'static str {
        match self {
            Component::Explained => "explained",
            Component::AUnexplained => "a_unexplained",
            Component::BUnexplained => "b_unexplained",
        }
    }
}

/// Which observed indicator value a group plays in the decomposition.
///
/// Role "b" is always the benchmark group; role "a" carries the *other value
/// actually present in the data* (looked up, never an arithmetic complement
/// of the stored benchmark).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRole {
    pub column: String,
    pub value: f64,
}

/// Per-group OLS fit: coefficient estimates aligned with the table's
/// covariate order, plus the diagnostics downstream consumers inspect.
///
/// Rebuilt for every decomposition call; never reused across bootstrap
/// replicates because the resampled data differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    pub params: Vec<f64>,
    pub n_obs: usize,
    pub sse: f64,
    pub rmse: f64,
}

/// Immutable record produced by one two-fold decomposition.
///
/// The contribution vectors are per covariate, aligned with `covariates`;
/// the caller sums them when a total is wanted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Method label, e.g. `"two_fold_benchmark"`.
    pub method: String,
    /// `mean(target | A) - mean(target | B)`.
    pub outcome_gap: f64,
    /// Covariate names, in table order. All vectors below align with this.
    pub covariates: Vec<String>,
    pub explained: Vec<f64>,
    pub a_unexplained: Vec<f64>,
    pub b_unexplained: Vec<f64>,
    /// Fit diagnostics for group A (indicator != benchmark).
    pub a_fit: FittedModel,
    /// Fit diagnostics for group B (indicator == benchmark).
    pub b_fit: FittedModel,
    pub a_role: GroupRole,
    pub b_role: GroupRole,
}

impl Decomposition {
    /// Borrow one contribution vector by component name.
    pub fn component(&self, component: Component) -> &[f64] {
        match component {
            Component::Explained => &self.explained,
            Component::AUnexplained => &self.a_unexplained,
            Component::BUnexplained => &self.b_unexplained,
        }
    }

    /// Sum of all three contribution vectors; reconstructs `outcome_gap`
    /// up to floating-point tolerance.
    pub fn reconstructed_gap(&self) -> f64 {
        self.explained.iter().sum::<f64>()
            + self.a_unexplained.iter().sum::<f64>()
            + self.b_unexplained.iter().sum::<f64>()
    }
}

/// Column-major observation table: one binary group-indicator column, one
/// numeric target column, and named numeric covariate columns (callers
/// include a constant/intercept column by convention).
///
/// The table is immutable once built; group splits and resamples derive new
/// views or tables without mutating the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    group_column: String,
    target_column: String,
    covariate_names: Vec<String>,
    group: Vec<f64>,
    target: Vec<f64>,
    covariates: Vec<Vec<f64>>,
}

impl ObservationTable {
    /// Build a table from named columns.
    ///
    /// Fails fast when columns are ragged or empty, or when the indicator
    /// column does not hold exactly two distinct values. The two-group check
    /// runs again at every decomposition call because a resampled subset can
    /// collapse to one value.
    pub fn new(
        group_column: impl Into<String>,
        target_column: impl Into<String>,
        group: Vec<f64>,
        target: Vec<f64>,
        covariates: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, Error> {
        let group_column = group_column.into();
        let target_column = target_column.into();

        let n = group.len();
        if n == 0 {
            return Err(Error::InvalidInput {
                detail: "observation table has no rows".to_string(),
            });
        }
        if target.len() != n {
            return Err(Error::InvalidInput {
                detail: format!(
                    "target column {target_column} has {} rows, expected {n}",
                    target.len()
                ),
            });
        }
        for (name, col) in &covariates {
            if col.len() != n {
                return Err(Error::InvalidInput {
                    detail: format!("covariate column {name} has {} rows, expected {n}", col.len()),
                });
            }
        }

        let (covariate_names, covariates): (Vec<String>, Vec<Vec<f64>>) =
            covariates.into_iter().unzip();

        let table = Self {
            group_column,
            target_column,
            covariate_names,
            group,
            target,
            covariates,
        };
        let distinct = table.distinct_group_values();
        if distinct.len() != 2 {
            return Err(Error::Grouping {
                column: table.group_column,
                distinct: distinct.len(),
            });
        }
        Ok(table)
    }

    pub fn n_rows(&self) -> usize {
        self.group.len()
    }

    pub fn group_column(&self) -> &str {
        &self.group_column
    }

    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    pub fn covariate_names(&self) -> &[String] {
        &self.covariate_names
    }

    pub fn group_values(&self) -> &[f64] {
        &self.group
    }

    pub fn target_values(&self) -> &[f64] {
        &self.target
    }

    pub fn covariate(&self, idx: usize) -> &[f64] {
        &self.covariates[idx]
    }

    /// Distinct indicator values in first-appearance order.
    pub fn distinct_group_values(&self) -> Vec<f64> {
        let mut distinct: Vec<f64> = Vec::new();
        for &v in &self.group {
            if !distinct.contains(&v) {
                distinct.push(v);
            }
        }
        distinct
    }

    /// Row indices split into (A: indicator != benchmark, B: indicator == benchmark).
    pub fn split_rows(&self, benchmark: f64) -> (Vec<usize>, Vec<usize>) {
        let mut a = Vec::new();
        let mut b = Vec::new();
        for (i, &v) in self.group.iter().enumerate() {
            if v == benchmark {
                b.push(i);
            } else {
                a.push(i);
            }
        }
        (a, b)
    }

    /// Draw `n_rows` rows with replacement into a fresh table.
    ///
    /// The resample deliberately skips the two-group construction check: a
    /// degenerate draw is legal here and is caught by the decomposer, which
    /// re-validates on every call.
    pub fn resample(&self, rng: &mut impl Rng) -> Self {
        let n = self.n_rows();
        let picks: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

        let take = |col: &[f64]| picks.iter().map(|&i| col[i]).collect::<Vec<f64>>();
        Self {
            group_column: self.group_column.clone(),
            target_column: self.target_column.clone(),
            covariate_names: self.covariate_names.clone(),
            group: take(&self.group),
            target: take(&self.target),
            covariates: self.covariates.iter().map(|c| take(c)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[f64]) -> Vec<f64> {
        values.to_vec()
    }

    #[test]
    fn table_rejects_three_group_values() {
        let err = ObservationTable::new(
            "group",
            "wage",
            column(&[0.0, 1.0, 2.0]),
            column(&[1.0, 2.0, 3.0]),
            vec![("const".to_string(), column(&[1.0, 1.0, 1.0]))],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Grouping { distinct: 3, .. }));
    }

    #[test]
    fn table_rejects_single_group_value() {
        let err = ObservationTable::new(
            "group",
            "wage",
            column(&[1.0, 1.0]),
            column(&[1.0, 2.0]),
            vec![("const".to_string(), column(&[1.0, 1.0]))],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Grouping { distinct: 1, .. }));
    }

    #[test]
    fn table_rejects_ragged_columns() {
        let err = ObservationTable::new(
            "group",
            "wage",
            column(&[0.0, 1.0]),
            column(&[1.0, 2.0]),
            vec![("x".to_string(), column(&[1.0]))],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn split_rows_partitions_by_benchmark() {
        let table = ObservationTable::new(
            "group",
            "wage",
            column(&[0.0, 1.0, 0.0, 1.0]),
            column(&[1.0, 2.0, 3.0, 4.0]),
            vec![("const".to_string(), column(&[1.0; 4]))],
        )
        .unwrap();
        let (a, b) = table.split_rows(0.0);
        assert_eq!(a, vec![1, 3]);
        assert_eq!(b, vec![0, 2]);
    }

    #[test]
    fn resample_preserves_row_count_and_schema() {
        let table = ObservationTable::new(
            "group",
            "wage",
            column(&[0.0, 1.0, 0.0, 1.0]),
            column(&[1.0, 2.0, 3.0, 4.0]),
            vec![("x".to_string(), column(&[5.0, 6.0, 7.0, 8.0]))],
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let resampled = table.resample(&mut rng);
        assert_eq!(resampled.n_rows(), 4);
        assert_eq!(resampled.covariate_names(), table.covariate_names());
        // Every resampled row must exist in the source.
        for i in 0..4 {
            assert!(table
                .target_values()
                .iter()
                .any(|&t| t == resampled.target_values()[i]));
        }
    }

    #[test]
    fn convention_parse_rejects_unknown_names() {
        let err = Convention::parse("oaxaca-ransom").unwrap_err();
        match err {
            Error::UnsupportedConvention { name } => assert_eq!(name, "oaxaca-ransom"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
