use rand::Rng;
use rand_distr::StandardNormal;

use crate::CuckooSearch;
use crate::error::CuckooError;
use crate::levy::{BETA, levy_sigma, levy_step};
use crate::operator::Operator;

/// Scale applied to the Lévy step before it multiplies the distance to the best nest
pub const STEP_SCALE: f64 = 0.01;

/// Global perturbation: every nest takes a Lévy flight scaled by its distance to the best nest.
/// Results land in the proposed nest, clamped and evaluated.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetCuckoos;

impl Operator for GetCuckoos {
    fn name(&self) -> &'static str {
        "get-cuckoos"
    }

    fn apply(&self, cs: &mut CuckooSearch<'_>) -> Result<(), CuckooError> {
        let sigma = levy_sigma(BETA);
        let best = cs.best;

        for i in 0..cs.eggs() {
            let x = &cs.nest[i].solution;
            let b = &cs.nest[best].solution;
            let mut trial = x.clone();
            for j in 0..trial.len() {
                let step = levy_step(&mut cs.rng, sigma, BETA);
                let stepsize = STEP_SCALE * step * (x[j] - b[j]);
                let noise: f64 = cs.rng.sample(StandardNormal);
                trial[j] = x[j] + stepsize * noise;
            }

            let slot = &mut cs.new_nest[i];
            slot.solution = trial;
            slot.clamp_all();
            cs.evaluate_new(i);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CSConfigBuilder, collaborators::uniform};
    use ndarray::Array1;

    fn sphere(x: &Array1<f64>) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_proposals_are_bounded_and_evaluated() {
        let config = CSConfigBuilder::new().eggs(15).seed(3).build();
        let mut cs =
            CuckooSearch::new(&sphere, uniform(-1.0, 1.0), |_| true, 6, (-1.0, 1.0), config).unwrap();
        cs.check_best_nest();

        for _ in 0..50 {
            GetCuckoos.apply(&mut cs).unwrap();
            for c in cs.new_nest() {
                assert!(c.within_bounds());
                assert_eq!(c.fitness, sphere(&c.solution));
            }
        }
    }

    #[test]
    fn test_best_nest_does_not_move() {
        let config = CSConfigBuilder::new().eggs(8).seed(5).build();
        let mut cs =
            CuckooSearch::new(&sphere, uniform(-4.0, 4.0), |_| true, 3, (-4.0, 4.0), config).unwrap();
        cs.check_best_nest();
        let best = cs.best_index();

        GetCuckoos.apply(&mut cs).unwrap();

        assert_eq!(cs.new_nest()[best].solution, cs.nest()[best].solution);
    }
}
