//! Weighted least squares solver.
//!
//! The skydip fit is a small linear regression of the form:
//!
//! ```text
//! minimize Σ w_i (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - We scale rows by `sqrt(w_i)` and solve an ordinary least squares problem.
//! - We use SVD so that tall design matrices (more rows than columns) are
//!   handled robustly. (Nalgebra's `QR::solve` is intended for square systems
//!   and will panic for non-square matrices.)

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly,
/// or if any entry of `x` or `y` is not finite.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    // The SVD panics on NaN singular values.
    if !(x.iter().all(|v| v.is_finite()) && y.iter().all(|v| v.is_finite())) {
        return None;
    }
    let svd = x.clone().try_svd(true, true, f64::EPSILON, 0)?;

    // A rank-deficient design (e.g. every airmass identical) yields an
    // unbounded or non-finite solution at every tolerance.
    let rank = svd.rank(1e-10 * svd.singular_values.max());
    if rank < x.ncols() {
        return None;
    }

    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Solve `minimize Σ w_i (y_i - x_i^T β)^2` by row scaling.
///
/// Weights must be finite and non-negative.
pub fn solve_weighted_least_squares(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    w: &[f64],
) -> Option<DVector<f64>> {
    debug_assert_eq!(x.nrows(), w.len());
    let mut xs = x.clone();
    let mut ys = y.clone();
    for (i, &wi) in w.iter().enumerate() {
        let s = wi.sqrt();
        xs.row_mut(i).scale_mut(s);
        ys[i] *= s;
    }
    solve_least_squares(&xs, &ys)
}

/// Parameter covariance `(X^T W X)^{-1}` of a weighted fit.
pub fn weighted_covariance(x: &DMatrix<f64>, w: &[f64]) -> Option<DMatrix<f64>> {
    let wd = DMatrix::from_diagonal(&DVector::from_row_slice(w));
    let normal = x.transpose() * wd * x;
    normal.try_inverse()
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
    fn weights_pull_towards_trusted_rows() {
        // Constant model: the weighted mean of [0, 10] with weights [3, 1] is 2.5.
        let x = DMatrix::from_row_slice(2, 1, &[1.0, 1.0]);
        let y = DVector::from_row_slice(&[0.0, 10.0]);

        let beta = solve_weighted_least_squares(&x, &y, &[3.0, 1.0]).unwrap();
        assert!((beta[0] - 2.5).abs() < 1e-10);
    }

    #[test]
    fn rank_deficient_design_is_rejected() {
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert!(solve_least_squares(&x, &y).is_none());
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        let x = DMatrix::from_row_slice(3, 2, &[f64::NAN, 1.0, 2.0, 1.0, 3.0, 1.0]);
        let y = DVector::from_row_slice(&[4.0, 3.5, 3.0]);
        assert!(solve_least_squares(&x, &y).is_none());

        let x = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 2.0, 1.0, 3.0, 1.0]);
        assert!(solve_weighted_least_squares(&x, &y, &[f64::INFINITY, 1.0, 1.0]).is_none());
    }

    #[test]
    fn covariance_of_unweighted_mean() {
        // Var(mean) = 1/n for unit weights.
        let x = DMatrix::from_row_slice(4, 1, &[1.0, 1.0, 1.0, 1.0]);
        let cov = weighted_covariance(&x, &[1.0; 4]).unwrap();
        assert!((cov[(0, 0)] - 0.25).abs() < 1e-12);
    }
}
