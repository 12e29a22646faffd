use ndarray::{Array1, Array2};

/// Lower-triangular Toeplitz matrix whose first column is `seed`: `A[r][c] = seed[r - c]` for
/// `r >= c`, zero above the diagonal.
pub fn make_toeplitz(seed: &Array1<f64>) -> Array2<f64> {
    let n = seed.len();
    Array2::from_shape_fn((n, n), |(r, c)| if r >= c { seed[r - c] } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_lower_triangular_structure() {
        let t = make_toeplitz(&array![1.0, 2.0, 3.0]);
        assert_eq!(t, array![[1.0, 0.0, 0.0], [2.0, 1.0, 0.0], [3.0, 2.0, 1.0]]);
    }

    #[test]
    fn test_diagonals_are_constant() {
        let seed = array![0.5, -1.0, 2.0, 4.0, -3.0];
        let t = make_toeplitz(&seed);
        for r in 0..5 {
            for c in 0..5 {
                let expected = if r >= c { seed[r - c] } else { 0.0 };
                assert_eq!(t[[r, c]], expected);
            }
        }
    }

    #[test]
    fn test_empty_seed() {
        assert_eq!(make_toeplitz(&Array1::zeros(0)).dim(), (0, 0));
    }
}
