use ndarray::Array1;
use rand::Rng;

use crate::CuckooSearch;
use crate::error::CuckooError;
use crate::operator::Operator;

/// Biased replacement: each nest is abandoned with probability `1 - pa` and rebuilt as
/// `x_i + r * (x_perm1[i] - x_perm2[i])`; the others are copied unchanged into the proposed nest.
///
/// `r` is drawn once per application and shared by every rebuilt nest and coordinate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyNest;

impl Operator for EmptyNest {
    fn name(&self) -> &'static str {
        "empty-nest"
    }

    fn apply(&self, cs: &mut CuckooSearch<'_>) -> Result<(), CuckooError> {
        abandon_nests(cs, Ok)
    }
}

/// Shared body of the plain and hybrid replacement operators. `refine` post-processes each
/// rebuilt point before it is clamped and evaluated.
pub(crate) fn abandon_nests<R>(cs: &mut CuckooSearch<'_>, mut refine: R) -> Result<(), CuckooError>
where
    R: FnMut(Array1<f64>) -> Result<Array1<f64>, CuckooError>,
{
    let r: f64 = cs.rng.random();
    cs.shuffle();

    let pa = cs.pa();
    let nd = cs.nd();
    let mut rebuilt = 0usize;
    for i in 0..cs.eggs() {
        if cs.rng.random::<f64>() > pa {
            let diff = &cs.nest[cs.perm1[i]].solution - &cs.nest[cs.perm2[i]].solution;
            let trial = refine(&cs.nest[i].solution + &(diff * r))?;
            if trial.len() != nd {
                return Err(CuckooError::DimensionMismatch { expected: nd, got: trial.len() });
            }
            let slot = &mut cs.new_nest[i];
            slot.solution = trial;
            slot.clamp_all();
            cs.evaluate_new(i);
            rebuilt += 1;
        } else {
            cs.new_nest[i].clone_from(&cs.nest[i]);
        }
    }
    log::trace!("empty-nest: rebuilt {}/{} nests (r={:.4})", rebuilt, cs.eggs(), r);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CSConfigBuilder, collaborators::uniform};

    fn sphere(x: &Array1<f64>) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_pa_one_copies_everything() {
        let config = CSConfigBuilder::new().eggs(10).pa(1.0).seed(9).build();
        let mut cs =
            CuckooSearch::new(&sphere, uniform(-3.0, 3.0), |_| true, 3, (-3.0, 3.0), config).unwrap();
        let nfev = cs.nfev();

        EmptyNest.apply(&mut cs).unwrap();

        assert_eq!(cs.nfev(), nfev);
        for (p, c) in cs.new_nest().iter().zip(cs.nest()) {
            assert_eq!(p.solution, c.solution);
            assert_eq!(p.fitness, c.fitness);
        }
    }

    #[test]
    fn test_pa_zero_rebuilds_everything_within_bounds() {
        let config = CSConfigBuilder::new().eggs(10).pa(0.0).seed(21).build();
        let mut cs =
            CuckooSearch::new(&sphere, uniform(-3.0, 3.0), |_| true, 3, (-3.0, 3.0), config).unwrap();
        let nfev = cs.nfev();

        for round in 1..=20 {
            EmptyNest.apply(&mut cs).unwrap();
            assert_eq!(cs.nfev(), nfev + round * 10);
            for c in cs.new_nest() {
                assert!(c.within_bounds());
                assert_eq!(c.fitness, sphere(&c.solution));
            }
        }
    }

    #[test]
    fn test_rebuilt_nests_share_one_random_factor() {
        // 1-D nests at distinct points: every rebuilt nest must satisfy
        // new_i - x_i = r * (x_p1 - x_p2) with the same r
        let values = [0.0, 1.0, 3.0, 7.0, 15.0];
        let mut k = 0;
        let generator = move |_: &mut rand::rngs::StdRng| {
            let v = values[k % values.len()];
            k += 1;
            v
        };
        let config = CSConfigBuilder::new().eggs(5).pa(0.0).seed(4).build();
        let mut cs =
            CuckooSearch::new(&sphere, generator, |_| true, 1, (-100.0, 100.0), config).unwrap();

        EmptyNest.apply(&mut cs).unwrap();

        let mut factors = Vec::new();
        for i in 0..5 {
            let d = cs.nest()[cs.perm1[i]].solution[0] - cs.nest()[cs.perm2[i]].solution[0];
            if d != 0.0 {
                factors.push((cs.new_nest()[i].solution[0] - cs.nest()[i].solution[0]) / d);
            }
        }
        assert!(!factors.is_empty());
        for f in &factors {
            assert!((f - factors[0]).abs() < 1e-12);
            assert!((0.0..1.0).contains(f));
        }
    }
}
