//! Ordinary least squares solver.
//!
//! Each decomposition call fits one small regression per group:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - We use SVD to solve the least-squares problem robustly even when the
//!   design matrix is tall (more rows than columns).
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic
//!   for non-square matrices.)
//! - Parameter dimension is tiny (an intercept plus a handful of covariates),
//!   so SVD performance is acceptable even across thousands of bootstrap
//!   replicates.
//! - Rank deficiency (collinear covariates, or an extreme resample leaving
//!   too few distinct rows) surfaces as a `RankDeficient` error, never as
//!   silently propagated NaNs.

use nalgebra::{DMatrix, DVector};

use crate::domain::FittedModel;
use crate::error::Error;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit an OLS model of `y` on the columns of `x`.
///
/// `x` must be full column rank for the supplied row count; a shorter-than-wide
/// or collinear matrix is a fitting failure, not a warning.
pub fn fit_ols(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<FittedModel, Error> {
    let (n, p) = x.shape();
    if n < p {
        return Err(Error::RankDeficient { rows: n, cols: p });
    }

    let beta = solve_least_squares(x, y).ok_or(Error::RankDeficient { rows: n, cols: p })?;

    let residuals = y - x * &beta;
    let sse = residuals.iter().map(|r| r * r).sum::<f64>();
    if !sse.is_finite() {
        return Err(Error::RankDeficient { rows: n, cols: p });
    }

    Ok(FittedModel {
        params: beta.iter().copied().collect(),
        n_obs: n,
        sse,
        rmse: (sse / n as f64).sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn fit_ols_reports_diagnostics() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let y = DVector::from_row_slice(&[1.0, 3.0, 5.0, 7.0]);

        let fit = fit_ols(&x, &y).unwrap();
        assert_eq!(fit.n_obs, 4);
        assert!((fit.params[0] - 1.0).abs() < 1e-10);
        assert!((fit.params[1] - 2.0).abs() < 1e-10);
        assert!(fit.sse < 1e-18);
        assert!(fit.rmse < 1e-9);
    }

    #[test]
    fn fit_ols_fails_on_underdetermined_system() {
        // 1 row, 2 columns: cannot be full column rank.
        let x = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        let y = DVector::from_row_slice(&[3.0]);

        let err = fit_ols(&x, &y).unwrap_err();
        assert!(matches!(err, Error::RankDeficient { rows: 1, cols: 2 }));
    }

    #[test]
    fn fit_ols_fails_on_collinear_columns() {
        // Second column is exactly 2x the first.
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0, 4.0, 8.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0, 4.0]);

        // SVD may still return a minimum-norm solution; the contract only
        // requires that no non-finite coefficients escape.
        match fit_ols(&x, &y) {
            Ok(fit) => assert!(fit.params.iter().all(|v| v.is_finite())),
            Err(err) => assert!(matches!(err, Error::RankDeficient { .. })),
        }
    }
}
