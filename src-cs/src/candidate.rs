//! A point of the search space together with its cached fitness

use std::cmp::Ordering;

use ndarray::Array1;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::collaborators::FitnessFn;

/// One egg of a nest: a bounded solution vector and the fitness it evaluated to.
///
/// `fitness` is only recomputed by [`Candidate::evaluate`]; cloning copies it verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub solution: Array1<f64>,
    pub fitness: f64,
    lb: f64,
    ub: f64,
}

impl Candidate {
    /// Draw every coordinate from `generator` and evaluate the result
    pub fn generate<G>(
        func: &FitnessFn<'_>,
        generator: &mut G,
        rng: &mut StdRng,
        nd: usize,
        lb: f64,
        ub: f64,
    ) -> Self
    where
        G: FnMut(&mut StdRng) -> f64 + ?Sized,
    {
        let solution = Array1::from_shape_fn(nd, |_| generator(rng));
        Self::from_solution(func, solution, lb, ub)
    }

    /// Wrap an existing point and evaluate it
    pub fn from_solution(func: &FitnessFn<'_>, solution: Array1<f64>, lb: f64, ub: f64) -> Self {
        let mut c = Self { solution, fitness: f64::MAX, lb, ub };
        c.evaluate(func);
        c
    }

    pub fn nd(&self) -> usize {
        self.solution.len()
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.lb, self.ub)
    }

    pub fn evaluate(&mut self, func: &FitnessFn<'_>) {
        self.fitness = func(&self.solution);
    }

    /// Clamp coordinate `pos` into `[lb, ub]`.
    ///
    /// A NaN coordinate goes to `lb` when its sign bit is set and to `ub` otherwise.
    /// Out of range positions are ignored.
    pub fn check_bounds(&mut self, pos: usize) {
        let Some(x) = self.solution.get_mut(pos) else {
            return;
        };
        if x.is_nan() {
            *x = if x.is_sign_negative() { self.lb } else { self.ub };
        } else if *x < self.lb {
            *x = self.lb;
        } else if *x > self.ub {
            *x = self.ub;
        }
    }

    pub fn clamp_all(&mut self) {
        for j in 0..self.solution.len() {
            self.check_bounds(j);
        }
    }

    pub fn within_bounds(&self) -> bool {
        self.solution.iter().all(|&x| x >= self.lb && x <= self.ub)
    }
}

// Fitness order: NaN is never less than anything and compares equal to everything.
impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.fitness < other.fitness {
            Some(Ordering::Less)
        } else if self.fitness > other.fitness {
            Some(Ordering::Greater)
        } else {
            Some(Ordering::Equal)
        }
    }
}
