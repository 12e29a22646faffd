//! Damped Newton solver for square nonlinear systems F(x) = 0
//!
//! Each outer iteration solves `J(x) s = -F(x)` and then halves the step towards `x` while the
//! residual norm at `x + s` is worse than at `x` by more than [`DAMPING_SLACK`].

use ndarray::{Array1, Array2};

use crate::error::CuckooError;
use crate::linalg::LinearAlgebra;

/// Absolute slack of the damping test, independent of the convergence tolerances
pub const DAMPING_SLACK: f64 = 1.0e-10;

/// Tolerances and budgets of [`damped_newton`]
#[derive(Debug, Clone, Copy)]
pub struct NewtonConfig {
    pub rel_tol: f64,
    pub abs_tol: f64,
    pub max_iter: usize,
    /// Upper bound on step halvings inside one outer iteration
    pub max_halvings: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self { rel_tol: 1.0e-7, abs_tol: 1.0e-7, max_iter: 10, max_halvings: 60 }
    }
}

#[derive(Debug, Clone)]
pub struct NewtonReport {
    pub x: Array1<f64>,
    /// Outer iterations actually performed
    pub nit: usize,
    /// ||F(x)||_2 at the returned point
    pub residual: f64,
    pub converged: bool,
}

pub fn norm2(v: &Array1<f64>) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Refine `x0` towards a root of `f`.
///
/// Running out of iterations or halvings is not an error: the last accepted point is returned
/// with `converged == false`. A singular Jacobian is.
pub fn damped_newton<F, J, L>(
    f: F,
    x0: Array1<f64>,
    jac: J,
    linalg: &L,
    config: &NewtonConfig,
) -> Result<NewtonReport, CuckooError>
where
    F: Fn(&Array1<f64>) -> Array1<f64>,
    J: Fn(&Array1<f64>) -> Array2<f64>,
    L: LinearAlgebra + ?Sized,
{
    let mut x = x0;
    let mut fx = f(&x);
    let r0 = norm2(&fx);
    let mut n2fx = r0;
    let target = config.rel_tol * r0 + config.abs_tol;
    let mut nit = 0;

    while n2fx > target && nit < config.max_iter {
        let jx = jac(&x);
        let s = linalg.solve(&jx, &fx.mapv(|v| -v))?;

        let mut newx = &x + &s;
        let mut n2fnewx = norm2(&f(&newx));
        let mut halvings = 0;
        while n2fnewx - n2fx > DAMPING_SLACK || n2fnewx.is_nan() {
            if halvings == config.max_halvings {
                log::debug!(
                    "newton: no descent after {} halvings at iteration {} (|F|={:.3e})",
                    halvings,
                    nit,
                    n2fx
                );
                return Ok(NewtonReport { x, nit, residual: n2fx, converged: false });
            }
            newx = (&newx + &x) * 0.5;
            n2fnewx = norm2(&f(&newx));
            halvings += 1;
        }

        x = newx;
        fx = f(&x);
        n2fx = norm2(&fx);
        nit += 1;
        log::trace!("newton iter {:3}  |F|={:.6e}  halvings={}", nit, n2fx, halvings);
    }

    Ok(NewtonReport { x, nit, residual: n2fx, converged: n2fx <= target })
}
