//! Bootstrap resampling around the two-fold decomposer.
//!
//! Each replicate draws `n` rows from the source table with replacement and
//! decomposes the resample. Replicates are independent pure functions of the
//! (immutable, shared) source table and their own seeded RNG, so they run in
//! parallel via rayon. Replicate order in the output matches replicate index,
//! though downstream aggregation is order-independent anyway.
//!
//! Failure policy: a degenerate resample (single indicator value, rank
//! deficiency, ...) is recorded as a skip with its reason and does not abort
//! the run. Only an all-replicates-failed run is itself an error.

use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::decompose::decompose_once;
use crate::domain::{Convention, Decomposition, ObservationTable};
use crate::error::Error;

/// Default number of bootstrap replicates.
pub const DEFAULT_REPLICATES: usize = 100;

/// Odd multiplier used to derive well-separated per-replicate RNG seeds.
const SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Bootstrap configuration.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    /// Number of resamples to draw. Must be positive.
    pub replicates: usize,
    /// Master seed; each replicate derives an independent stream from it.
    pub seed: u64,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            replicates: DEFAULT_REPLICATES,
            seed: 0,
        }
    }
}

/// A replicate that failed and the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedReplicate {
    pub replicate: usize,
    pub reason: String,
}

/// Output of a bootstrap run: successful decompositions in replicate order,
/// plus skip records for the replicates that failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapRun {
    pub results: Vec<Decomposition>,
    pub skipped: Vec<SkippedReplicate>,
}

impl BootstrapRun {
    pub fn n_succeeded(&self) -> usize {
        self.results.len()
    }

    pub fn n_skipped(&self) -> usize {
        self.skipped.len()
    }
}

/// Run `options.replicates` bootstrap decompositions of `table`.
pub fn run(
    table: &ObservationTable,
    benchmark: f64,
    convention: Convention,
    options: &BootstrapOptions,
) -> Result<BootstrapRun, Error> {
    if options.replicates == 0 {
        return Err(Error::InvalidInput {
            detail: "replicate count must be a positive integer".to_string(),
        });
    }

    let outcomes: Vec<(usize, Result<Decomposition, Error>)> = (0..options.replicates)
        .into_par_iter()
        .map(|rep| {
            let seed = options.seed.wrapping_add((rep as u64).wrapping_mul(SEED_STRIDE));
            let mut rng = StdRng::seed_from_u64(seed);
            let resample = table.resample(&mut rng);
            (rep, decompose_once(&resample, benchmark, convention))
        })
        .collect();

    let mut results = Vec::with_capacity(options.replicates);
    let mut skipped = Vec::new();
    for (rep, outcome) in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(err) => skipped.push(SkippedReplicate {
                replicate: rep,
                reason: err.to_string(),
            }),
        }
    }

    if results.is_empty() {
        return Err(Error::InsufficientData {
            detail: format!(
                "all {} bootstrap replicates failed (first reason: {})",
                options.replicates,
                skipped.first().map(|s| s.reason.as_str()).unwrap_or("unknown")
            ),
        });
    }

    Ok(BootstrapRun { results, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::{two_group_sample, SyntheticSpec};

    #[test]
    fn well_behaved_data_yields_every_replicate() {
        let table = two_group_sample(&SyntheticSpec::default(), 3).unwrap();
        let options = BootstrapOptions {
            replicates: 50,
            seed: 17,
        };
        let run = run(&table, 0.0, Convention::Benchmark, &options).unwrap();
        assert_eq!(run.n_succeeded(), 50);
        assert_eq!(run.n_skipped(), 0);
    }

    #[test]
    fn runs_are_deterministic_per_seed() {
        let table = two_group_sample(&SyntheticSpec::default(), 3).unwrap();
        let options = BootstrapOptions {
            replicates: 10,
            seed: 99,
        };
        let first = run(&table, 0.0, Convention::Benchmark, &options).unwrap();
        let second = run(&table, 0.0, Convention::Benchmark, &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_replicates_is_invalid() {
        let table = two_group_sample(&SyntheticSpec::default(), 3).unwrap();
        let options = BootstrapOptions {
            replicates: 0,
            seed: 0,
        };
        let err = run(&table, 0.0, Convention::Benchmark, &options).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn degenerate_resamples_are_skipped_not_fatal() {
        // Two rows, one per group: roughly half of all resamples collapse to
        // a single indicator value and must be skipped with a reason.
        let spec = SyntheticSpec {
            n_rows: 2,
            noise_sd: 0.0,
            slopes: vec![],
            ..SyntheticSpec::default()
        };
        let table = two_group_sample(&spec, 5).unwrap();
        let options = BootstrapOptions {
            replicates: 64,
            seed: 1,
        };
        match run(&table, 0.0, Convention::Benchmark, &options) {
            Ok(out) => {
                assert_eq!(out.n_succeeded() + out.n_skipped(), 64);
                assert!(out.n_skipped() > 0);
                assert!(out.skipped.iter().all(|s| !s.reason.is_empty()));
            }
            // Legal when every draw collapses, though vanishingly unlikely.
            Err(err) => assert!(matches!(err, Error::InsufficientData { .. })),
        }
    }

    #[test]
    fn unsupported_convention_fails_every_replicate() {
        let table = two_group_sample(&SyntheticSpec::default(), 3).unwrap();
        let options = BootstrapOptions {
            replicates: 5,
            seed: 0,
        };
        let err = run(&table, 0.0, Convention::Jann, &options).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { .. }));
    }
}
