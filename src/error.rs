use thiserror::Error;

/// Failure outcomes of a solve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// A is empty or not square, or b (or the solution vector) does not match
    /// the row count of A.
    #[error("matrix dimensions do not match (A is {rows} rows, b has {rhs} entries)")]
    DimensionMismatch { rows: usize, rhs: usize },

    /// Every entry of A is within tolerance of zero.
    #[error("coefficient matrix is zero")]
    DegenerateSystem,

    /// A diagonal entry is too close to zero for an iterative update.
    #[error("diagonal element of row {row} is too close to zero")]
    ZeroDiagonal { row: usize },

    /// The best available pivot was below tolerance during elimination.
    #[error("matrix is singular (no usable pivot in column {col})")]
    Singular { col: usize },

    /// The iteration cap was reached without meeting the convergence test.
    #[error("did not converge in {iterations} iterations")]
    NotConverged { iterations: usize },
}

impl SolveError {
    /// Returns false for `NotConverged`, which is a normal failure result
    /// that may succeed with different parameters.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SolveError::NotConverged { .. })
    }
}
