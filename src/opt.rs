use anyhow::{bail, format_err, Result};

use crate::solver::{Method, Solver};
use crate::sor::DEFAULT_OMEGA;
use crate::system::{LinearSystem, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

/// Solver options as given by one source (configuration file or command
/// line). Unset fields fall through to the next source.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PartialOpt {
    pub method: Option<Method>,
    pub tolerance: Option<f64>,
    pub max_iterations: Option<usize>,
    pub omega: Option<f64>,
}

impl PartialOpt {
    /// Fields set in `self` take precedence over those in `other`.
    pub fn or(self, other: PartialOpt) -> PartialOpt {
        PartialOpt {
            method: self.method.or(other.method),
            tolerance: self.tolerance.or(other.tolerance),
            max_iterations: self.max_iterations.or(other.max_iterations),
            omega: self.omega.or(other.omega),
        }
    }

    /// Applies defaults and validates the result.
    pub fn resolve(self) -> Result<SolveOpt> {
        let method = self
            .method
            .ok_or_else(|| format_err!("no solver type given (expected jacobi, gauss or sor)"))?;

        let tolerance = self.tolerance.unwrap_or(DEFAULT_TOLERANCE);
        if !(tolerance > 0.0 && tolerance.is_finite()) {
            bail!("tolerance must be a positive number: {}", tolerance);
        }

        let max_iterations = self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);
        if max_iterations == 0 {
            bail!("max iterations must be positive");
        }

        Ok(SolveOpt {
            method,
            tolerance,
            max_iterations,
            omega: self.omega.unwrap_or(DEFAULT_OMEGA),
        })
    }
}

/// Validated options of a single solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOpt {
    pub method: Method,

    // Convergence / degeneracy threshold. Default value is 1e-6.
    pub tolerance: f64,

    // Maximum number of iterations for iterative methods. Default value is 1000.
    pub max_iterations: usize,

    // SOR relaxation factor. Default value is 1.5.
    pub omega: f64,
}

impl SolveOpt {
    pub fn solver(&self) -> Solver<f64> {
        Solver::new(self.method, Some(self.omega))
    }

    pub fn system(&self, matrix: Vec<Vec<f64>>, rhs: Vec<f64>) -> Result<LinearSystem<f64>> {
        Ok(LinearSystem::new(matrix, rhs)
            .tolerance(self.tolerance)
            .max_iterations(self.max_iterations)
            .build()?)
    }
}
