use num_traits::{Float, NumCast};

/// Converts an `f64` constant into `T`, falling back to zero if it cannot be
/// represented.
pub(crate) fn cast<T: Float>(v: f64) -> T {
    <T as NumCast>::from(v).unwrap_or_else(T::zero)
}

/// Computes the infinity norm: `max(abs(a))`. Zero for an empty slice.
pub fn norm_inf<T: Float>(a: &[T]) -> T {
    a.iter().fold(T::zero(), |max, v| max.max(v.abs()))
}

/// Folds `|d|` into a running maximum. A NaN difference poisons the result
/// so that a diverged iterate can never pass a `< tol` test.
pub(crate) fn max_abs<T: Float>(max: T, d: T) -> T {
    let d = d.abs();
    if d > max || d.is_nan() {
        d
    } else {
        max
    }
}

/// Returns `max |a_i - b_i|`.
pub(crate) fn max_abs_diff<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .fold(T::zero(), |max, (&ai, &bi)| max_abs(max, ai - bi))
}

/// Returns the 2-norm (Euclidean) of `a`.
pub fn norm<T: Float>(a: &[T]) -> T {
    a.iter().fold(T::zero(), |sqsum, &v| sqsum + v * v).sqrt()
}

/// Computes the dot-product of `a` and `b`.
pub fn dot<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .fold(T::zero(), |acc, (&ai, &bi)| acc + ai * bi)
}

/// Returns the residual vector `A x - b`.
pub fn residual<T: Float>(a_mat: &[Vec<T>], x: &[T], b: &[T]) -> Vec<T> {
    a_mat
        .iter()
        .zip(b)
        .map(|(row, &bi)| dot(row, x) - bi)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norms() {
        let a = [3.0, -4.0];
        assert_eq!(norm_inf(&a), 4.0);
        assert_relative_eq!(norm(&a), 5.0);
        assert_eq!(norm_inf::<f64>(&[]), 0.0);
    }

    #[test]
    fn test_residual() {
        let a_mat = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
        let r = residual(&a_mat, &[0.8, 1.4], &[3.0, 5.0]);
        assert_relative_eq!(r[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(r[1], 0.0, epsilon = 1e-12);

        let r = residual(&a_mat, &[0.0, 0.0], &[3.0, 5.0]);
        assert_eq!(r, vec![-3.0, -5.0]);
    }

    #[test]
    fn test_max_abs_diff() {
        assert_eq!(max_abs_diff(&[1.0, 2.0], &[1.5, 0.0]), 2.0);
        assert!(max_abs_diff(&[f64::NAN, 2.0], &[1.0, 0.0]).is_nan());
        assert!(max_abs_diff(&[1.0, f64::NAN], &[1.0, 0.0]).is_nan());
    }

    #[test]
    fn test_cast() {
        let t: f32 = cast(1e-10);
        assert!(t > 0.0);
    }
}
