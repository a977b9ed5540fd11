use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::math::{norm, residual};
use crate::solver::Method;

/// A solution and the metadata of the solve that produced it.
pub struct Report<'a> {
    pub method: Method,
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Sweeps performed. Not meaningful for direct methods.
    pub iterations: usize,
    pub elapsed_ms: f64,

    pub matrix: &'a [Vec<f64>],
    pub rhs: &'a [f64],
    pub solution: &'a [f64],
}

/// Writes a human-readable report: parameters, A, b, x and the residual
/// `A x - b` with its 2-norm.
pub fn write_report<W: Write>(w: &mut W, report: &Report) -> Result<()> {
    writeln!(w, "Method: {}", report.method)?;
    writeln!(w, "Matrix size: {}", report.matrix.len())?;
    writeln!(w, "Tolerance: {:.6e}", report.tolerance)?;
    writeln!(w, "Max iterations: {}", report.max_iterations)?;
    if report.method.is_iterative() {
        writeln!(w, "Iterations: {}", report.iterations)?;
    } else {
        writeln!(w, "Iterations: n/a")?;
    }
    writeln!(w, "Solve time: {:.6}ms", report.elapsed_ms)?;

    writeln!(w, "\nCoefficient matrix A:")?;
    for row in report.matrix {
        write_row(w, row)?;
    }

    writeln!(w, "\nRight-hand side b:")?;
    write_row(w, report.rhs)?;

    writeln!(w, "\nSolution x:")?;
    write_row(w, report.solution)?;

    let r = residual(report.matrix, report.solution, report.rhs);
    writeln!(w, "\nResidual (Ax-b):")?;
    write_row(w, &r)?;

    writeln!(w, "\nResidual norm: {:.6e}", norm(&r))?;
    Ok(())
}

/// Creates `path` and writes the report into it.
pub fn save_report(path: &Path, report: &Report) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("unable to create result file: {}", path.display()))?;
    let mut w = BufWriter::new(file);
    write_report(&mut w, report)?;
    w.flush()?;
    Ok(())
}

fn write_row<W: Write>(w: &mut W, values: &[f64]) -> Result<()> {
    for v in values {
        write!(w, "{:>12.6}", v)?;
    }
    writeln!(w)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_write_report() -> Result<()> {
        let matrix = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
        let report = Report {
            method: Method::Jacobi,
            tolerance: 1e-6,
            max_iterations: 1000,
            iterations: 12,
            elapsed_ms: 0.5,
            matrix: &matrix,
            rhs: &[3.0, 5.0],
            solution: &[0.8, 1.4],
        };
        let mut buf = Vec::new();
        write_report(&mut buf, &report)?;
        let text = String::from_utf8(buf)?;

        assert!(text.starts_with("Method: jacobi\nMatrix size: 2\n"));
        assert!(text.contains("Iterations: 12\n"));
        assert!(text.contains("\nSolution x:\n    0.800000    1.400000\n"));
        assert!(text.contains(
            "Coefficient matrix A:\n    2.000000    1.000000\n    1.000000    3.000000\n"
        ));
        Ok(())
    }

    #[test]
    fn test_direct_has_no_iterations() -> Result<()> {
        let matrix = vec![vec![1.0]];
        let report = Report {
            method: Method::Gauss,
            tolerance: 1e-6,
            max_iterations: 1000,
            iterations: 0,
            elapsed_ms: 0.0,
            matrix: &matrix,
            rhs: &[2.0],
            solution: &[2.0],
        };
        let mut buf = Vec::new();
        write_report(&mut buf, &report)?;
        let text = String::from_utf8(buf)?;
        assert!(text.contains("Iterations: n/a\n"));
        assert!(text.contains("Residual norm: 0.000000e0\n"));
        Ok(())
    }
}
