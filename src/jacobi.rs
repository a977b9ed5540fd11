use num_traits::Float;

use crate::check::{check_diagonal, check_iterate};
use crate::debug::{format_f64, format_f64_vec};
use crate::error::SolveError;
use crate::math::max_abs_diff;
use crate::solver::Method;
use crate::system::LinearSystem;
use crate::traits::LinearSolver;

/// Jacobi iteration.
#[derive(Debug, Default, Clone, Copy)]
pub struct Jacobi;

impl<T: Float> LinearSolver<T> for Jacobi {
    fn method(&self) -> Method {
        Method::Jacobi
    }

    fn solve(&self, system: &LinearSystem<T>, x: &mut [T]) -> Result<usize, SolveError> {
        jacobi_solve(
            system.matrix(),
            system.rhs(),
            x,
            system.tolerance(),
            system.max_iterations(),
        )
    }
}

/// Solves `A x = b` by Jacobi iteration starting from the guess in `x`.
///
/// Each sweep computes every component from the previous iterate only:
///
/// ```txt
/// x_new[i] = (b[i] - sum_{j != i} a_ij * x[j]) / a_ii
/// ```
///
/// The iteration stops when `max |x_new - x| < tol`. On return `x` holds
/// the last iterate, whether or not it converged. Returns the number of
/// sweeps performed.
pub fn jacobi_solve<T: Float>(
    a_mat: &[Vec<T>],
    b: &[T],
    x: &mut [T],
    tol: T,
    max_it: usize,
) -> Result<usize, SolveError> {
    check_iterate(a_mat, b, x)?;
    check_diagonal(a_mat)?;

    let mut x_new = vec![T::zero(); x.len()];

    for it in 1..=max_it {
        for (i, (row, &bi)) in a_mat.iter().zip(b).enumerate() {
            let sum = row
                .iter()
                .zip(x.iter())
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(T::zero(), |acc, (_, (&a_ij, &x_j))| acc + a_ij * x_j);
            x_new[i] = (bi - sum) / row[i];
        }

        let diff = max_abs_diff(x, &x_new);

        x.copy_from_slice(&x_new);
        log::trace!("{}  {}", it, format_f64(diff));

        if diff < tol {
            log::info!("Jacobi converged in {} iterations.", it);
            log::debug!("x: {}", format_f64_vec(x));
            return Ok(it);
        }
    }

    log::info!("Jacobi did not converge in {} iterations.", max_it);
    Err(SolveError::NotConverged { iterations: max_it })
}
