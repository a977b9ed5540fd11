use num_traits::Float;

use crate::error::SolveError;
use crate::solver::Method;
use crate::system::LinearSystem;

pub trait LinearSolver<T: Float> {
    fn method(&self) -> Method;

    /// Solves `A x = b` for the given system.
    ///
    /// ## Arguments
    /// * `system` the matrix A, right-hand side b and solve parameters.
    /// * `x` the initial guess on entry, and the solution on successful return.
    ///
    /// Returns the number of sweeps performed. Direct solvers ignore the
    /// initial guess and report zero sweeps. Iterative solvers leave their
    /// last iterate in `x` when they fail with `NotConverged`.
    fn solve(&self, system: &LinearSystem<T>, x: &mut [T]) -> Result<usize, SolveError>;
}
