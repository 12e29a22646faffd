//! Operator trait and pipeline assembly

use std::fmt;
use std::str::FromStr;

use crate::CuckooSearch;
use crate::best_nest::BestNest;
use crate::empty_nest::EmptyNest;
use crate::error::CuckooError;
use crate::get_cuckoos::GetCuckoos;
use crate::hybrid_empty_nest::HybridEmptyNest;

/// One stage of the per-iteration pipeline.
///
/// An operator reads and writes the engine's current and proposed nests and may move the
/// best index; it draws randomness only from the engine's RNG.
pub trait Operator {
	fn name(&self) -> &'static str;

	fn apply(&self, cs: &mut CuckooSearch<'_>) -> Result<(), CuckooError>;
}

/// Ordered list of operators applied once per iteration
pub type Pipeline<'p> = Vec<Box<dyn Operator + 'p>>;

/// Operator names accepted in textual pipeline descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
	/// Lévy-flight perturbation of every nest into the proposed nest
	GetCuckoos,
	/// Replace-if-not-worse selection tracking the global best
	BestNest,
	/// Abandon a fraction of nests and rebuild them from random differences
	EmptyNest,
	/// [`OperatorKind::EmptyNest`] followed by a damped Newton polish of rebuilt nests
	HybridEmptyNest,
}

impl FromStr for OperatorKind {
	type Err = CuckooError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let t = s.trim().to_lowercase();
		match t.as_str() {
			"get-cuckoos" | "get_cuckoos" | "getcuckoos" | "levy" => Ok(OperatorKind::GetCuckoos),
			"best-nest" | "best_nest" | "bestnest" | "select" => Ok(OperatorKind::BestNest),
			"empty-nest" | "empty_nest" | "emptynest" | "abandon" => Ok(OperatorKind::EmptyNest),
			"hybrid-empty-nest" | "hybrid_empty_nest" | "hybridemptynest" | "hybrid" => {
				Ok(OperatorKind::HybridEmptyNest)
			}
			_ => Err(CuckooError::UnknownOperator(s.to_string())),
		}
	}
}

impl fmt::Display for OperatorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			OperatorKind::GetCuckoos => "get-cuckoos",
			OperatorKind::BestNest => "best-nest",
			OperatorKind::EmptyNest => "empty-nest",
			OperatorKind::HybridEmptyNest => "hybrid-empty-nest",
		};
		f.write_str(name)
	}
}

/// Parse a comma separated list such as `get-cuckoos,best-nest,empty-nest,best-nest`
pub fn parse_pipeline(s: &str) -> Result<Vec<OperatorKind>, CuckooError> {
	let kinds = s
		.split(',')
		.filter(|t| !t.trim().is_empty())
		.map(OperatorKind::from_str)
		.collect::<Result<Vec<_>, _>>()?;
	if kinds.is_empty() {
		return Err(CuckooError::InvalidConfig("empty operator pipeline".into()));
	}
	Ok(kinds)
}

/// get-cuckoos, best-nest, empty-nest, best-nest
pub fn default_pipeline<'p>() -> Pipeline<'p> {
	vec![Box::new(GetCuckoos), Box::new(BestNest), Box::new(EmptyNest), Box::new(BestNest)]
}

/// Instantiate `kinds` in order. `refinement` is required when the hybrid operator is listed.
pub fn build_pipeline<'p>(
	kinds: &[OperatorKind],
	refinement: Option<&HybridEmptyNest<'p>>,
) -> Result<Pipeline<'p>, CuckooError> {
	kinds
		.iter()
		.map(|kind| -> Result<Box<dyn Operator + 'p>, CuckooError> {
			Ok(match kind {
				OperatorKind::GetCuckoos => Box::new(GetCuckoos),
				OperatorKind::BestNest => Box::new(BestNest),
				OperatorKind::EmptyNest => Box::new(EmptyNest),
				OperatorKind::HybridEmptyNest => match refinement {
					Some(h) => Box::new(h.clone()),
					None => return Err(CuckooError::MissingRefinement(kind.to_string())),
				},
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_operator_variants() {
		assert_eq!("get-cuckoos".parse::<OperatorKind>().unwrap(), OperatorKind::GetCuckoos);
		assert_eq!("Best_Nest".parse::<OperatorKind>().unwrap(), OperatorKind::BestNest);
		assert_eq!("abandon".parse::<OperatorKind>().unwrap(), OperatorKind::EmptyNest);
		assert_eq!("hybrid".parse::<OperatorKind>().unwrap(), OperatorKind::HybridEmptyNest);
		assert!(matches!(
			"crossover".parse::<OperatorKind>(),
			Err(CuckooError::UnknownOperator(_))
		));
	}

	#[test]
	fn test_parse_pipeline_round_trips_names() {
		let kinds = parse_pipeline("get-cuckoos, best-nest,hybrid-empty-nest,best-nest").unwrap();
		let names: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
		assert_eq!(names, ["get-cuckoos", "best-nest", "hybrid-empty-nest", "best-nest"]);
		assert!(parse_pipeline(" , ").is_err());
	}

	#[test]
	fn test_build_pipeline_needs_refinement_for_hybrid() {
		let kinds = [OperatorKind::GetCuckoos, OperatorKind::HybridEmptyNest];
		assert!(matches!(build_pipeline(&kinds, None), Err(CuckooError::MissingRefinement(_))));

		let plain = [OperatorKind::GetCuckoos, OperatorKind::BestNest, OperatorKind::EmptyNest];
		let pipeline = build_pipeline(&plain, None).unwrap();
		let names: Vec<&str> = pipeline.iter().map(|op| op.name()).collect();
		assert_eq!(names, ["get-cuckoos", "best-nest", "empty-nest"]);
	}

	#[test]
	fn test_default_pipeline_order() {
		let names: Vec<&str> = default_pipeline().iter().map(|op| op.name()).collect();
		assert_eq!(names, ["get-cuckoos", "best-nest", "empty-nest", "best-nest"]);
	}
}
