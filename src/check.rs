use num_traits::Float;

use crate::debug::format_f64;
use crate::error::SolveError;
use crate::math::cast;
use crate::system::LinearSystem;

/// Diagonal entries smaller than this make the iterative update undefined,
/// whatever tolerance was requested.
pub const ZERO_DIAGONAL_THRESHOLD: f64 = 1e-10;

/// Checks that a system can be handed to a solver.
///
/// The checks run in order: dimensions, then the zero matrix test, then
/// diagonal dominance. A dominance violation is advisory only: it is logged
/// as a warning and the check still succeeds.
pub fn check_solvability<T: Float>(
    a_mat: &[Vec<T>],
    b: &[T],
    tol: T,
) -> Result<(), SolveError> {
    check_dimensions(a_mat, b)?;

    if is_zero_matrix(a_mat, tol) {
        return Err(SolveError::DegenerateSystem);
    }

    if !is_diagonally_dominant(a_mat) {
        log::warn!("matrix is not diagonally dominant, convergence may be affected");
    }

    Ok(())
}

/// Convenience form of [`check_solvability`] for a [`LinearSystem`].
pub fn check_system<T: Float>(system: &LinearSystem<T>) -> Result<(), SolveError> {
    check_solvability(system.matrix(), system.rhs(), system.tolerance())
}

/// Returns `true` if the system passes [`check_solvability`].
pub fn is_solvable<T: Float>(a_mat: &[Vec<T>], b: &[T], tol: T) -> bool {
    check_solvability(a_mat, b, tol).is_ok()
}

/// A must be non-empty and n x n, where n is its row count, and b must have
/// n entries.
pub fn check_dimensions<T>(a_mat: &[Vec<T>], b: &[T]) -> Result<(), SolveError> {
    let n = a_mat.len();
    let mismatch = SolveError::DimensionMismatch {
        rows: n,
        rhs: b.len(),
    };
    if n == 0 || b.len() != n {
        return Err(mismatch);
    }
    if let Some(i) = a_mat.iter().position(|row| row.len() != n) {
        log::debug!("row {} has {} columns, expected {}", i + 1, a_mat[i].len(), n);
        return Err(mismatch);
    }
    Ok(())
}

/// Returns `true` if every entry of A is within `tol` of zero.
pub fn is_zero_matrix<T: Float>(a_mat: &[Vec<T>], tol: T) -> bool {
    a_mat.iter().flatten().all(|v| v.abs() <= tol)
}

/// Returns `true` if `|a_ii| >= sum_{j != i} |a_ij|` for every row.
///
/// Each row's diagonal and off-diagonal sum is logged at debug level and
/// every offending row is reported as a warning. A row too short to hold
/// its diagonal entry is not dominant.
pub fn is_diagonally_dominant<T: Float>(a_mat: &[Vec<T>]) -> bool {
    let mut dominant = true;
    for (i, row) in a_mat.iter().enumerate() {
        let Some(&a_ii) = row.get(i) else {
            log::warn!("row {} has no diagonal entry", i + 1);
            dominant = false;
            continue;
        };
        let diagonal = a_ii.abs();
        let sum = row
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .fold(T::zero(), |acc, (_, v)| acc + v.abs());

        log::debug!(
            "row {}: diagonal {}, off-diagonal sum {}",
            i + 1,
            format_f64(diagonal),
            format_f64(sum)
        );

        if diagonal < sum {
            log::warn!(
                "row {} is not diagonally dominant: |{}| < {}",
                i + 1,
                format_f64(a_ii),
                format_f64(sum)
            );
            dominant = false;
        }
    }
    dominant
}

/// Fails with `ZeroDiagonal` for the first row whose diagonal entry is below
/// [`ZERO_DIAGONAL_THRESHOLD`] in magnitude.
pub(crate) fn check_diagonal<T: Float>(a_mat: &[Vec<T>]) -> Result<(), SolveError> {
    let threshold: T = cast(ZERO_DIAGONAL_THRESHOLD);
    match a_mat
        .iter()
        .enumerate()
        .position(|(i, row)| !(row[i].abs() >= threshold))
    {
        Some(row) => Err(SolveError::ZeroDiagonal { row }),
        None => Ok(()),
    }
}

/// Validates A, b and the solution vector together.
pub(crate) fn check_iterate<T: Float>(
    a_mat: &[Vec<T>],
    b: &[T],
    x: &[T],
) -> Result<(), SolveError> {
    check_dimensions(a_mat, b)?;
    if x.len() != b.len() {
        return Err(SolveError::DimensionMismatch {
            rows: a_mat.len(),
            rhs: x.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_system() {
        let a_mat = vec![vec![4.0, 1.0], vec![1.0, 3.0]];
        assert!(is_diagonally_dominant(&a_mat));
        assert_eq!(check_solvability(&a_mat, &[1.0, 2.0], 1e-6), Ok(()));
    }

    #[test]
    fn test_non_dominant_is_advisory() {
        let a_mat = vec![vec![1.0, 2.0], vec![3.0, 1.0]];
        assert!(!is_diagonally_dominant(&a_mat));
        assert!(is_solvable(&a_mat, &[1.0, 2.0], 1e-6));
    }

    #[test]
    fn test_equality_counts_as_dominant() {
        let a_mat = vec![
            vec![2.0, -1.0, -1.0],
            vec![0.0, 1.0, 0.0],
            vec![1.0, 1.0, 2.0],
        ];
        assert!(is_diagonally_dominant(&a_mat));
    }

    #[test]
    fn test_non_square() {
        let a_mat = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0], vec![0.0, 0.0, 1.0]];
        assert_eq!(
            check_solvability(&a_mat, &[1.0, 1.0, 1.0], 1e-6),
            Err(SolveError::DimensionMismatch { rows: 3, rhs: 3 })
        );
        assert!(!is_solvable(&a_mat, &[1.0, 1.0, 1.0], 1e-6));
    }

    #[test]
    fn test_dominance_of_ragged_matrix() {
        assert!(!is_diagonally_dominant(&[vec![1.0, 0.0], vec![0.0]]));
        assert!(!is_diagonally_dominant(&[vec![2.0, 1.0], vec![]]));
        assert!(is_diagonally_dominant(&[vec![2.0], vec![1.0, 3.0, 1.0]]));
    }

    #[test]
    fn test_rhs_length() {
        let a_mat = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        assert_eq!(
            check_solvability(&a_mat, &[1.0], 1e-6),
            Err(SolveError::DimensionMismatch { rows: 2, rhs: 1 })
        );
    }

    #[test]
    fn test_empty() {
        let a_mat: Vec<Vec<f64>> = vec![];
        assert!(!is_solvable(&a_mat, &[], 1e-6));
        assert!(!is_solvable(&[vec![]], &[1.0], 1e-6));
    }

    #[test]
    fn test_zero_matrix() {
        for n in 1..5 {
            let a_mat = vec![vec![0.0; n]; n];
            assert_eq!(
                check_solvability(&a_mat, &vec![1.0; n], 1e-6),
                Err(SolveError::DegenerateSystem)
            );
        }
    }

    #[test]
    fn test_zero_matrix_within_tolerance() {
        let a_mat = vec![vec![1e-4, 0.0], vec![0.0, -1e-4]];
        assert!(is_zero_matrix(&a_mat, 1e-3));
        assert!(!is_zero_matrix(&a_mat, 1e-6));
    }

    #[test]
    fn test_check_diagonal() {
        assert_eq!(
            check_diagonal(&[vec![1.0, 0.0], vec![0.0, 1e-11]]),
            Err(SolveError::ZeroDiagonal { row: 1 })
        );
        assert_eq!(check_diagonal(&[vec![1.0, 0.0], vec![0.0, -1e-9]]), Ok(()));
    }

    #[test]
    fn test_check_system() {
        let sys = LinearSystem::new(vec![vec![2.0, 1.0], vec![1.0, 3.0]], vec![3.0, 5.0])
            .build()
            .unwrap();
        assert!(check_system(&sys).is_ok());
    }
}
