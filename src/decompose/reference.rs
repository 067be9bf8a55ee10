//! Reference (non-discriminatory) coefficient selection.
//!
//! Given both groups' coefficient vectors and sample sizes, produce the
//! reference vector `r_params` under a named convention:
//!
//! - `benchmark`: `r = b_params`
//! - `reimers`:   `r = 0.5*a + 0.5*b`
//! - `cotton`:    `r = (n_a*a + n_b*b) / (n_a + n_b)`
//!
//! The pooled-regression conventions (`neumark`, `jann`) are recognized but
//! unimplemented: the exact pooled-model specification must be confirmed
//! against the literature first, so selecting them fails loudly instead of
//! falling back to another convention.

use crate::domain::Convention;
use crate::error::Error;

/// Compute the reference coefficient vector for a two-fold decomposition.
///
/// `a_params` and `b_params` must align with the same covariate order; a
/// length mismatch means the two groups were fit on different schemas.
pub fn reference_params(
    a_params: &[f64],
    b_params: &[f64],
    n_a: usize,
    n_b: usize,
    convention: Convention,
) -> Result<Vec<f64>, Error> {
    if a_params.len() != b_params.len() {
        return Err(Error::SchemaMismatch {
            detail: format!(
                "group coefficient vectors have different lengths ({} vs {})",
                a_params.len(),
                b_params.len()
            ),
        });
    }

    match convention {
        Convention::Benchmark => Ok(b_params.to_vec()),
        Convention::Reimers => Ok(a_params
            .iter()
            .zip(b_params)
            .map(|(a, b)| 0.5 * a + 0.5 * b)
            .collect()),
        Convention::Cotton => {
            let total = (n_a + n_b) as f64;
            Ok(a_params
                .iter()
                .zip(b_params)
                .map(|(a, b)| (n_a as f64 * a + n_b as f64 * b) / total)
                .collect())
        }
        Convention::Neumark | Convention::Jann => Err(Error::UnsupportedConvention {
            name: convention.label().to_string(),
        }),
    }
}
