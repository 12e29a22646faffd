use std::cell::Cell;
use std::rc::Rc;

use ndarray::{Array1, Array2};

use crate::CuckooSearch;
use crate::collaborators::{JacobianFn, VectorFieldFn};
use crate::empty_nest::abandon_nests;
use crate::error::CuckooError;
use crate::linalg::{DenseLinalg, LinearAlgebra};
use crate::newton::{NewtonConfig, damped_newton};
use crate::operator::Operator;

/// Biased replacement whose rebuilt nests are polished by a damped Newton solve of
/// `field(x) = 0` before evaluation.
///
/// A Newton failure (singular Jacobian) aborts the operator and, through it, the search.
#[derive(Clone)]
pub struct HybridEmptyNest<'r> {
    field: Rc<VectorFieldFn<'r>>,
    jacobian: Rc<JacobianFn<'r>>,
    linalg: Rc<dyn LinearAlgebra + 'r>,
    newton: NewtonConfig,
}

impl<'r> HybridEmptyNest<'r> {
    pub fn new<F, J>(field: F, jacobian: J) -> Self
    where
        F: Fn(&Array1<f64>) -> Array1<f64> + 'r,
        J: Fn(&Array1<f64>) -> Array2<f64> + 'r,
    {
        Self {
            field: Rc::new(field),
            jacobian: Rc::new(jacobian),
            linalg: Rc::new(DenseLinalg),
            newton: NewtonConfig::default(),
        }
    }

    pub fn with_newton(mut self, newton: NewtonConfig) -> Self {
        self.newton = newton;
        self
    }

    pub fn with_linalg<L: LinearAlgebra + 'r>(mut self, linalg: L) -> Self {
        self.linalg = Rc::new(linalg);
        self
    }

    pub fn newton_config(&self) -> &NewtonConfig {
        &self.newton
    }
}

impl Operator for HybridEmptyNest<'_> {
    fn name(&self) -> &'static str {
        "hybrid-empty-nest"
    }

    fn apply(&self, cs: &mut CuckooSearch<'_>) -> Result<(), CuckooError> {
        let solves = Cell::new(0usize);
        let newton_iters = Cell::new(0usize);
        abandon_nests(cs, |x| {
            let report = damped_newton(
                &*self.field,
                x,
                &*self.jacobian,
                self.linalg.as_ref(),
                &self.newton,
            )?;
            solves.set(solves.get() + 1);
            newton_iters.set(newton_iters.get() + report.nit);
            Ok(report.x)
        })?;
        log::trace!("hybrid-empty-nest: {} newton solves, {} iterations", solves.get(), newton_iters.get());
        Ok(())
    }
}
