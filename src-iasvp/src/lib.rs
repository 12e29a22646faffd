//! Inverse additive singular value problem (IASVP) for lower-triangular Toeplitz matrices
//!
//! Given target singular values `sigma`, find a first column `x` such that the Toeplitz matrix
//! built from `x` has exactly those singular values. The objective plugs into the cuckoo search
//! engine as a fitness function; its vector field and Jacobian feed the hybrid Newton operator.
//!
//! ```rust
//! use cuckoo_iasvp::{Iasvp, make_toeplitz};
//! use ndarray::array;
//!
//! let seed = array![1.0, 2.0, 3.0];
//! let problem = Iasvp::from_seed(&seed).unwrap();
//! assert!(problem.fitness(&seed) < 1e-12);
//! assert_eq!(make_toeplitz(&seed)[[2, 0]], 3.0);
//! ```

pub mod error;
pub mod load;
pub mod problem;
pub mod toeplitz;

pub use error::IasvpError;
pub use load::load_vector;
pub use problem::Iasvp;
pub use toeplitz::make_toeplitz;

use cuckoo_search::{HybridEmptyNest, LinearAlgebra, NewtonConfig};

/// Number of bundled test cases: three families times five sizes
pub const NUM_CASES: usize = 15;

/// File name and dimension of bundled test case `pos`: `c{1,2,3}x{10,20,30,40,50}`
pub fn test_case(pos: usize) -> Option<(String, usize)> {
    if pos >= NUM_CASES {
        return None;
    }
    let family = pos / 5 + 1;
    let nd = (pos % 5 + 1) * 10;
    Some((format!("c{}x{}", family, nd), nd))
}

/// Hybrid empty-nest operator whose Newton polish solves `sv(T(x)) = sigma`
pub fn hybrid_refinement<'a, L: LinearAlgebra + 'a>(problem: &'a Iasvp<L>) -> HybridEmptyNest<'a> {
    hybrid_refinement_with(problem, NewtonConfig::default())
}

pub fn hybrid_refinement_with<'a, L: LinearAlgebra + 'a>(
    problem: &'a Iasvp<L>,
    newton: NewtonConfig,
) -> HybridEmptyNest<'a> {
    HybridEmptyNest::new(move |x| problem.vector_field(x), move |x| problem.jacobian(x)).with_newton(newton)
}
