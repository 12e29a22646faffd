use crate::CuckooSearch;
use crate::error::CuckooError;
use crate::operator::Operator;

/// Elitist selection: a proposed nest replaces its counterpart when it is not worse,
/// and the best index follows any strict improvement.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestNest;

impl Operator for BestNest {
    fn name(&self) -> &'static str {
        "best-nest"
    }

    fn apply(&self, cs: &mut CuckooSearch<'_>) -> Result<(), CuckooError> {
        let mut accepted = 0usize;
        for i in 0..cs.eggs() {
            if cs.new_nest[i] <= cs.nest[i] {
                cs.nest[i].clone_from(&cs.new_nest[i]);
                accepted += 1;
                if cs.nest[i] < cs.nest[cs.best] {
                    cs.best = i;
                }
            }
        }
        log::trace!(
            "best-nest: accepted {}/{}, best={:.6e} at {}",
            accepted,
            cs.eggs(),
            cs.nest[cs.best].fitness,
            cs.best
        );
        Ok(())
    }
}
