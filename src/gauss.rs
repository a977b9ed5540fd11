use num_traits::Float;

use crate::check::check_dimensions;
use crate::debug::{format_f64, format_f64_vec};
use crate::error::SolveError;
use crate::solver::Method;
use crate::system::LinearSystem;
use crate::traits::LinearSolver;

/// Direct solver: Gaussian elimination with partial pivoting.
#[derive(Debug, Default, Clone, Copy)]
pub struct Gauss;

impl<T: Float> LinearSolver<T> for Gauss {
    fn method(&self) -> Method {
        Method::Gauss
    }

    fn solve(&self, system: &LinearSystem<T>, x: &mut [T]) -> Result<usize, SolveError> {
        let solution = gauss_solve(system.matrix(), system.rhs(), system.tolerance())?;
        if x.len() != solution.len() {
            return Err(SolveError::DimensionMismatch {
                rows: solution.len(),
                rhs: x.len(),
            });
        }
        x.copy_from_slice(&solution);
        log::debug!("x: {}", format_f64_vec(x));
        Ok(0)
    }
}

/// Solves `A x = b` by Gaussian elimination on the augmented matrix `[A | b]`.
///
/// At step k the row in k..n with the largest `|a_ik|` becomes the pivot row.
/// Ties keep the earlier row, so the result is deterministic. A pivot smaller
/// than `tol` in magnitude fails with `Singular`. A and b are not modified.
pub fn gauss_solve<T: Float>(a_mat: &[Vec<T>], b: &[T], tol: T) -> Result<Vec<T>, SolveError> {
    check_dimensions(a_mat, b)?;
    let n = a_mat.len();

    // augmented matrix [A | b]
    let mut ab: Vec<Vec<T>> = a_mat
        .iter()
        .zip(b)
        .map(|(row, &bi)| {
            let mut r = Vec::with_capacity(n + 1);
            r.extend_from_slice(row);
            r.push(bi);
            r
        })
        .collect();

    // forward elimination
    for k in 0..n {
        let mut pivot = k;
        let mut max = ab[k][k].abs();
        for (i, row) in ab.iter().enumerate().skip(k + 1) {
            if row[k].abs() > max {
                max = row[k].abs();
                pivot = i;
            }
        }

        // NaN entries never pass this test either
        if !(max >= tol) {
            log::debug!("pivot {} in column {} is below tolerance", format_f64(max), k);
            return Err(SolveError::Singular { col: k });
        }

        if pivot != k {
            ab.swap(k, pivot);
        }

        let (upper, lower) = ab.split_at_mut(k + 1);
        let row_k = &upper[k];
        for row_i in lower.iter_mut() {
            let factor = row_i[k] / row_k[k];
            for j in k..=n {
                row_i[j] = row_i[j] - factor * row_k[j];
            }
        }
    }

    // back substitution
    let mut x = vec![T::zero(); n];
    for i in (0..n).rev() {
        let sum = ((i + 1)..n).fold(T::zero(), |acc, j| acc + ab[i][j] * x[j]);
        x[i] = (ab[i][n] - sum) / ab[i][i];
    }

    Ok(x)
}
