use derive_builder::Builder;
use num_traits::Float;

use crate::math::cast;

/// Convergence / degeneracy threshold used when none is configured.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
/// Iteration cap used when none is configured.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// A dense linear system `A x = b` together with the parameters of one solve.
///
/// The matrix is stored as rows. Squareness is not enforced here: it is
/// the job of [`check_solvability`](crate::check_solvability) to reject a
/// malformed system before any algorithm runs.
#[derive(Debug, Clone, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct LinearSystem<T: Float> {
    /// Coefficient matrix A, row by row.
    matrix: Vec<Vec<T>>,

    /// Right-hand side vector b.
    rhs: Vec<T>,

    /// Convergence / degeneracy threshold. Default value is 1e-6.
    #[builder(default = "cast(DEFAULT_TOLERANCE)")]
    tolerance: T,

    /// Maximum number of sweeps for iterative methods. Default value is 1000.
    #[builder(default = "DEFAULT_MAX_ITERATIONS")]
    max_iterations: usize,
}

impl<T: Float> LinearSystemBuilder<T> {
    fn validate(&self) -> Result<(), String> {
        if let Some(tol) = self.tolerance {
            if !(tol > T::zero() && tol.is_finite()) {
                return Err("tolerance must be a positive finite number".to_string());
            }
        }
        if self.max_iterations == Some(0) {
            return Err("max iterations must be positive".to_string());
        }
        Ok(())
    }
}

impl<T: Float> LinearSystem<T> {
    /// Starts a builder for the system `matrix * x = rhs`.
    pub fn new(matrix: Vec<Vec<T>>, rhs: Vec<T>) -> LinearSystemBuilder<T> {
        LinearSystemBuilder {
            matrix: Some(matrix),
            rhs: Some(rhs),
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> &[Vec<T>] {
        &self.matrix
    }

    pub fn rhs(&self) -> &[T] {
        &self.rhs
    }

    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Number of equations, i.e. the row count of A.
    pub fn size(&self) -> usize {
        self.matrix.len()
    }
}
