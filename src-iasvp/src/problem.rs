use ndarray::{Array1, Array2};
use rand::Rng;

use cuckoo_search::newton::norm2;
use cuckoo_search::{DenseLinalg, LinearAlgebra};

use crate::error::IasvpError;
use crate::toeplitz::make_toeplitz;

/// Inverse additive singular value problem for lower-triangular Toeplitz matrices:
/// find `x` such that `T(x)` has the target singular values.
#[derive(Debug, Clone)]
pub struct Iasvp<L: LinearAlgebra = DenseLinalg> {
    sigma: Array1<f64>,
    linalg: L,
}

impl Iasvp<DenseLinalg> {
    /// Target the singular values of `T(seed)`
    pub fn from_seed(seed: &Array1<f64>) -> Result<Self, IasvpError> {
        Self::new(seed, DenseLinalg)
    }
}

impl<L: LinearAlgebra> Iasvp<L> {
    pub fn new(seed: &Array1<f64>, linalg: L) -> Result<Self, IasvpError> {
        let sigma = linalg.singular_values(&make_toeplitz(seed))?;
        Ok(Self { sigma, linalg })
    }

    /// Random instance with seed coordinates uniform in [-1, 1]; the seed is returned with it
    pub fn random<R: Rng + ?Sized>(
        nd: usize,
        rng: &mut R,
        linalg: L,
    ) -> Result<(Self, Array1<f64>), IasvpError> {
        let seed = Array1::from_shape_fn(nd, |_| rng.random_range(-1.0..=1.0));
        let problem = Self::new(&seed, linalg)?;
        Ok((problem, seed))
    }

    pub fn nd(&self) -> usize {
        self.sigma.len()
    }

    /// Target singular values, descending
    pub fn sigma(&self) -> &Array1<f64> {
        &self.sigma
    }

    /// `sv(T(x)) - sigma`. A failed decomposition or a point of the wrong dimension yields NaN
    /// entries.
    pub fn vector_field(&self, x: &Array1<f64>) -> Array1<f64> {
        if x.len() != self.nd() {
            log::warn!("point has dimension {}, problem has {}", x.len(), self.nd());
            return Array1::from_elem(self.nd(), f64::NAN);
        }
        match self.linalg.singular_values(&make_toeplitz(x)) {
            Ok(s) => s - &self.sigma,
            Err(e) => {
                log::warn!("singular values unavailable: {}", e);
                Array1::from_elem(self.nd(), f64::NAN)
            }
        }
    }

    /// `||sv(T(x)) - sigma||_2`
    pub fn fitness(&self, x: &Array1<f64>) -> f64 {
        norm2(&self.vector_field(x))
    }

    pub fn relative_error(&self, x: &Array1<f64>) -> f64 {
        self.fitness(x) / norm2(&self.sigma)
    }

    /// Jacobian of [`Iasvp::vector_field`]: with `T(x) = P S Q^T`,
    /// `J[i][j] = sum_{r >= j} p_i[r] * q_i[r - j]`.
    pub fn jacobian(&self, x: &Array1<f64>) -> Array2<f64> {
        let n = x.len();
        if n != self.nd() {
            log::warn!("point has dimension {}, problem has {}", n, self.nd());
            return Array2::from_elem((self.nd(), self.nd()), f64::NAN);
        }
        let svd = match self.linalg.svd(&make_toeplitz(x)) {
            Ok(svd) => svd,
            Err(e) => {
                log::warn!("jacobian unavailable: {}", e);
                return Array2::from_elem((n, n), f64::NAN);
            }
        };
        let p = &svd.u;
        let q = &svd.v;
        Array2::from_shape_fn((n, n), |(i, j)| (j..n).map(|r| p[[r, i]] * q[[r - j, i]]).sum())
    }
}
