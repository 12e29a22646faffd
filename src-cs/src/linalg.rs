//! Dense linear-algebra provider: LU solve and singular value decomposition
//!
//! The engine only talks to the [`LinearAlgebra`] trait; [`DenseLinalg`] implements it on top of
//! nalgebra so no system LAPACK is needed.

use nalgebra::{DMatrix, DVector, SVD};
use ndarray::{Array1, Array2};

use crate::error::CuckooError;

const SVD_MAX_ITER: usize = 10_000;

/// Singular value decomposition A = U diag(s) V^T with `s` in descending order.
/// Columns of `u` and `v` are the left and right singular vectors.
#[derive(Debug, Clone)]
pub struct Svd {
    pub u: Array2<f64>,
    pub s: Array1<f64>,
    pub v: Array2<f64>,
}

pub trait LinearAlgebra {
    /// Solve `a x = b` through an LU factorization
    fn solve(&self, a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, CuckooError>;

    /// Singular values in descending order
    fn singular_values(&self, a: &Array2<f64>) -> Result<Array1<f64>, CuckooError>;

    fn svd(&self, a: &Array2<f64>) -> Result<Svd, CuckooError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DenseLinalg;

fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

fn descending_order(s: &DVector<f64>) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..s.len()).collect();
    idx.sort_by(|&a, &b| s[b].total_cmp(&s[a]));
    idx
}

impl DenseLinalg {
    fn decompose(
        &self,
        a: &Array2<f64>,
        vectors: bool,
    ) -> Result<SVD<f64, nalgebra::Dyn, nalgebra::Dyn>, CuckooError> {
        let (rows, cols) = a.dim();
        if rows == 0 || cols == 0 || a.iter().any(|x| !x.is_finite()) {
            return Err(CuckooError::Decomposition { rows, cols });
        }
        SVD::try_new(to_dmatrix(a), vectors, vectors, f64::EPSILON, SVD_MAX_ITER)
            .ok_or(CuckooError::Decomposition { rows, cols })
    }
}

impl LinearAlgebra for DenseLinalg {
    fn solve(&self, a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, CuckooError> {
        let n = b.len();
        if a.nrows() != n || a.ncols() != n {
            return Err(CuckooError::DimensionMismatch { expected: n, got: a.nrows() });
        }
        if n == 0 {
            return Err(CuckooError::InvalidConfig("empty linear system".into()));
        }
        let lu = to_dmatrix(a).lu();
        let rhs = DVector::from_iterator(n, b.iter().copied());
        let x = lu.solve(&rhs).ok_or_else(|| CuckooError::SingularSystem {
            n,
            reason: "zero pivot in LU factorization".into(),
        })?;
        if x.iter().any(|v| !v.is_finite()) {
            return Err(CuckooError::SingularSystem { n, reason: "non-finite solution".into() });
        }
        Ok(Array1::from_iter(x.iter().copied()))
    }

    fn singular_values(&self, a: &Array2<f64>) -> Result<Array1<f64>, CuckooError> {
        let svd = self.decompose(a, false)?;
        let order = descending_order(&svd.singular_values);
        Ok(order.iter().map(|&k| svd.singular_values[k]).collect())
    }

    fn svd(&self, a: &Array2<f64>) -> Result<Svd, CuckooError> {
        let (rows, cols) = a.dim();
        let svd = self.decompose(a, true)?;
        let (Some(u), Some(v_t)) = (svd.u.as_ref(), svd.v_t.as_ref()) else {
            return Err(CuckooError::Decomposition { rows, cols });
        };
        let order = descending_order(&svd.singular_values);
        let k = order.len();
        let s = order.iter().map(|&i| svd.singular_values[i]).collect();
        let u = Array2::from_shape_fn((u.nrows(), k), |(i, j)| u[(i, order[j])]);
        let v = Array2::from_shape_fn((v_t.ncols(), k), |(i, j)| v_t[(order[j], i)]);
        Ok(Svd { u, s, v })
    }
}
