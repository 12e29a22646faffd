//! Function types the engine is parameterized over, plus a few ready-made ones

use ndarray::{Array1, Array2};
use rand::Rng;
use rand::rngs::StdRng;

use crate::candidate::Candidate;

/// Domain objective; lower is better
pub type FitnessFn<'a> = dyn Fn(&Array1<f64>) -> f64 + 'a;

/// Coordinate generator used to build the initial nest
pub type GeneratorFn<'a> = dyn FnMut(&mut StdRng) -> f64 + 'a;

/// Convergence predicate evaluated against the best candidate
pub type StopFn<'a> = dyn FnMut(&Candidate) -> bool + 'a;

/// Vector field F: R^n -> R^n handed to the Newton refinement
pub type VectorFieldFn<'a> = dyn Fn(&Array1<f64>) -> Array1<f64> + 'a;

/// Jacobian J: R^n -> R^{n x n} of a [`VectorFieldFn`]
pub type JacobianFn<'a> = dyn Fn(&Array1<f64>) -> Array2<f64> + 'a;

/// Uniform coordinates in `[lb, ub]`
pub fn uniform(lb: f64, ub: f64) -> impl FnMut(&mut StdRng) -> f64 {
    move |rng: &mut StdRng| if lb < ub { rng.random_range(lb..=ub) } else { lb }
}

/// Stop once the best fitness is strictly below `tol`
pub fn fitness_below(tol: f64) -> impl FnMut(&Candidate) -> bool {
    move |c: &Candidate| c.fitness < tol
}

/// Stop below `tol`, or after `max_iter` pipeline passes.
///
/// The engine asks the predicate once before every pass, so the call count doubles as an
/// iteration counter.
pub fn fitness_below_or_max_iter(tol: f64, max_iter: usize) -> impl FnMut(&Candidate) -> bool {
    let mut calls = 0usize;
    move |c: &Candidate| {
        let done = c.fitness < tol || calls >= max_iter;
        calls += 1;
        done
    }
}
