use std::fmt;
use std::str::FromStr;

use num_traits::Float;

use crate::check::check_system;
use crate::error::SolveError;
use crate::gauss::Gauss;
use crate::jacobi::Jacobi;
use crate::sor::Sor;
use crate::system::LinearSystem;
use crate::traits::LinearSolver;

/// Solution method, named by a case-sensitive token.
#[derive(Debug, PartialEq, Eq, Copy, Clone, clap::ValueEnum)]
pub enum Method {
    /// Jacobi iteration.
    Jacobi,
    /// Gaussian elimination with partial pivoting.
    Gauss,
    /// Successive Over-Relaxation.
    Sor,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Jacobi => "jacobi",
            Method::Gauss => "gauss",
            Method::Sor => "sor",
        }
    }

    pub fn is_iterative(&self) -> bool {
        !matches!(self, Method::Gauss)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jacobi" => Ok(Method::Jacobi),
            "gauss" => Ok(Method::Gauss),
            "sor" => Ok(Method::Sor),
            _ => Err(format!(
                "unknown solver type: {} (expected jacobi, gauss or sor)",
                s
            )),
        }
    }
}

/// One of the three algorithms, chosen once at construction.
#[derive(Debug, Clone, Copy)]
pub enum Solver<T> {
    Jacobi(Jacobi),
    Gauss(Gauss),
    Sor(Sor<T>),
}

impl<T: Float> Solver<T> {
    /// Binds a method to its implementation. `omega` is only used by SOR
    /// and defaults to 1.5.
    pub fn new(method: Method, omega: Option<T>) -> Self {
        match method {
            Method::Jacobi => Solver::Jacobi(Jacobi),
            Method::Gauss => Solver::Gauss(Gauss),
            Method::Sor => Solver::Sor(omega.map(Sor::new).unwrap_or_default()),
        }
    }

    /// Runs the solvability check and then the algorithm.
    pub fn run(&self, system: &LinearSystem<T>, x: &mut [T]) -> Result<usize, SolveError> {
        check_system(system)?;
        self.solve(system, x)
    }
}

impl<T: Float> LinearSolver<T> for Solver<T> {
    fn method(&self) -> Method {
        match self {
            Solver::Jacobi(s) => LinearSolver::<T>::method(s),
            Solver::Gauss(s) => LinearSolver::<T>::method(s),
            Solver::Sor(s) => s.method(),
        }
    }

    fn solve(&self, system: &LinearSystem<T>, x: &mut [T]) -> Result<usize, SolveError> {
        match self {
            Solver::Jacobi(s) => s.solve(system, x),
            Solver::Gauss(s) => s.solve(system, x),
            Solver::Sor(s) => s.solve(system, x),
        }
    }
}
