use num_traits::Float;

use crate::check::{check_diagonal, check_iterate};
use crate::debug::{format_f64, format_f64_vec};
use crate::error::SolveError;
use crate::math::{cast, max_abs};
use crate::solver::Method;
use crate::system::LinearSystem;
use crate::traits::LinearSolver;

/// Relaxation factor used when none is configured.
pub const DEFAULT_OMEGA: f64 = 1.5;

/// Successive Over-Relaxation.
///
/// `omega` is not validated: values outside (0, 2) are accepted and may
/// diverge or oscillate. With `omega = 1` this is Gauss-Seidel.
#[derive(Debug, Clone, Copy)]
pub struct Sor<T> {
    pub omega: T,
}

impl<T: Float> Sor<T> {
    pub fn new(omega: T) -> Self {
        Self { omega }
    }
}

impl<T: Float> Default for Sor<T> {
    fn default() -> Self {
        Self::new(cast(DEFAULT_OMEGA))
    }
}

impl<T: Float> LinearSolver<T> for Sor<T> {
    fn method(&self) -> Method {
        Method::Sor
    }

    fn solve(&self, system: &LinearSystem<T>, x: &mut [T]) -> Result<usize, SolveError> {
        sor_solve(
            system.matrix(),
            system.rhs(),
            x,
            self.omega,
            system.tolerance(),
            system.max_iterations(),
        )
    }
}

/// Solves `A x = b` by SOR iteration starting from the guess in `x`.
///
/// Row i is updated in place, so entries j < i already hold values from the
/// current sweep and entries j > i still hold those from the previous one:
///
/// ```txt
/// x[i] = (1 - omega) * x[i] + omega / a_ii * (b[i] - sum_{j != i} a_ij * x[j])
/// ```
///
/// The largest change of any entry is tracked during the sweep and the
/// iteration stops once it falls below `tol`. On return `x` holds the last
/// iterate. Returns the number of sweeps performed.
pub fn sor_solve<T: Float>(
    a_mat: &[Vec<T>],
    b: &[T],
    x: &mut [T],
    omega: T,
    tol: T,
    max_it: usize,
) -> Result<usize, SolveError> {
    check_iterate(a_mat, b, x)?;
    check_diagonal(a_mat)?;

    let n = x.len();
    for it in 1..=max_it {
        let mut max_diff = T::zero();

        for (i, (row, &bi)) in a_mat.iter().zip(b).enumerate() {
            // updated in this sweep
            let sum1 = (0..i).fold(T::zero(), |acc, j| acc + row[j] * x[j]);
            // from the previous sweep
            let sum2 = ((i + 1)..n).fold(T::zero(), |acc, j| acc + row[j] * x[j]);

            let x_old = x[i];
            x[i] = (T::one() - omega) * x_old + (omega / row[i]) * (bi - sum1 - sum2);

            max_diff = max_abs(max_diff, x[i] - x_old);
        }
        log::trace!("{}  {}", it, format_f64(max_diff));

        if max_diff < tol {
            log::info!("SOR converged in {} iterations.", it);
            log::debug!("x: {}", format_f64_vec(x));
            return Ok(it);
        }
    }

    log::info!("SOR did not converge in {} iterations.", max_it);
    Err(SolveError::NotConverged { iterations: max_it })
}
