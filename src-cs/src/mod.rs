//! Cuckoo Search global optimizer in pure Rust using ndarray
//!
//! A population ("nest") of candidate solutions evolves through an ordered pipeline of
//! operators applied once per iteration until a caller supplied stop predicate accepts the
//! best candidate.
//!
//! Supported features:
//! - Scalar box constraints [lb, ub] shared by every coordinate
//! - Operators: Lévy-flight perturbation (get-cuckoos), elitist selection (best-nest),
//!   biased replacement (empty-nest) and biased replacement with damped Newton polish
//!   (hybrid-empty-nest)
//! - A single seedable RNG threaded through every operator for reproducible runs
//! - Per-iteration observer callback and CSV recording of progress

#![allow(missing_docs)]
use std::fmt;

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

pub mod best_nest;
pub mod candidate;
pub mod collaborators;
pub mod empty_nest;
pub mod error;
pub mod get_cuckoos;
pub mod hybrid_empty_nest;
pub mod levy;
pub mod linalg;
pub mod newton;
pub mod operator;
pub mod recorder;
pub mod run_recorded;

pub use best_nest::BestNest;
pub use candidate::Candidate;
pub use collaborators::{
	FitnessFn, GeneratorFn, JacobianFn, StopFn, VectorFieldFn, fitness_below,
	fitness_below_or_max_iter, uniform,
};
pub use empty_nest::EmptyNest;
pub use error::CuckooError;
pub use get_cuckoos::GetCuckoos;
pub use hybrid_empty_nest::HybridEmptyNest;
pub use linalg::{DenseLinalg, LinearAlgebra, Svd};
pub use newton::{NewtonConfig, NewtonReport, damped_newton};
pub use operator::{
	Operator, OperatorKind, Pipeline, build_pipeline, default_pipeline, parse_pipeline,
};
pub use recorder::{OptimizationRecord, OptimizationRecorder};
pub use run_recorded::run_recorded_cuckoo_search;

pub(crate) fn argmin(nest: &[Candidate]) -> usize {
	let mut best_i = 0usize;
	for (i, c) in nest.iter().enumerate() {
		if c < &nest[best_i] {
			best_i = i;
		}
	}
	best_i
}

/// Information passed to the observer callback after each iteration
pub struct CSIntermediate {
	pub x: Array1<f64>,
	pub fun: f64,
	pub iter: usize,
	pub nfev: usize,
}

/// Configuration for the Cuckoo Search engine
pub struct CSConfig {
	/// Number of nests (population size)
	pub eggs: usize,
	/// Probability that a nest survives the empty-nest operator; `1 - pa` are abandoned
	pub pa: f64,
	pub seed: Option<u64>,
	/// Log progress at info level
	pub disp: bool,
	/// Optional per-iteration observer; it cannot stop the run
	pub callback: Option<Box<dyn FnMut(&CSIntermediate)>>,
}

impl Default for CSConfig {
	fn default() -> Self {
		Self { eggs: 25, pa: 0.25, seed: None, disp: false, callback: None }
	}
}

/// Fluent builder for `CSConfig`
pub struct CSConfigBuilder {
	cfg: CSConfig,
}
impl Default for CSConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}
impl CSConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: CSConfig::default() }
	}
	pub fn eggs(mut self, v: usize) -> Self {
		self.cfg.eggs = v;
		self
	}
	pub fn pa(mut self, v: f64) -> Self {
		self.cfg.pa = v;
		self
	}
	pub fn seed(mut self, v: u64) -> Self {
		self.cfg.seed = Some(v);
		self
	}
	pub fn disp(mut self, v: bool) -> Self {
		self.cfg.disp = v;
		self
	}
	pub fn callback(mut self, cb: Box<dyn FnMut(&CSIntermediate)>) -> Self {
		self.cfg.callback = Some(cb);
		self
	}
	pub fn build(self) -> CSConfig {
		self.cfg
	}
}

/// Result/Report of a Cuckoo Search run
#[derive(Clone, Serialize)]
pub struct CSReport {
	pub x: Array1<f64>,
	pub fun: f64,
	pub nit: usize,
	pub nfev: usize,
	pub population: Array2<f64>,
	pub population_fitness: Array1<f64>,
}

impl fmt::Debug for CSReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CSReport")
			.field("x", &format!("len={}", self.x.len()))
			.field("fun", &self.fun)
			.field("nit", &self.nit)
			.field("nfev", &self.nfev)
			.field(
				"population",
				&format!("{}x{}", self.population.nrows(), self.population.ncols()),
			)
			.field("population_fitness", &format!("len={}", self.population_fitness.len()))
			.finish()
	}
}

/// Cuckoo Search engine: two parallel nests, the best index and the run counters
pub struct CuckooSearch<'a> {
	func: &'a FitnessFn<'a>,
	stop: Box<StopFn<'a>>,
	pub(crate) nest: Vec<Candidate>,
	pub(crate) new_nest: Vec<Candidate>,
	pub(crate) perm1: Vec<usize>,
	pub(crate) perm2: Vec<usize>,
	pub(crate) best: usize,
	pub(crate) rng: StdRng,
	niter: usize,
	nfev: usize,
	nd: usize,
	lb: f64,
	ub: f64,
	config: CSConfig,
}

impl<'a> CuckooSearch<'a> {
	/// Build the initial nest: `config.eggs` candidates of dimension `nd`, each coordinate drawn
	/// from `generator`, in bounds `(lb, ub)`.
	pub fn new<G, S>(
		func: &'a FitnessFn<'a>,
		mut generator: G,
		stop: S,
		nd: usize,
		bounds: (f64, f64),
		config: CSConfig,
	) -> Result<Self, CuckooError>
	where
		G: FnMut(&mut StdRng) -> f64,
		S: FnMut(&Candidate) -> bool + 'a,
	{
		let (lb, ub) = bounds;
		if config.eggs == 0 {
			return Err(CuckooError::InvalidConfig("eggs must be at least 1".into()));
		}
		if nd == 0 {
			return Err(CuckooError::InvalidConfig("dimension must be at least 1".into()));
		}
		if !lb.is_finite() || !ub.is_finite() || lb > ub {
			return Err(CuckooError::InvalidConfig(format!("invalid bounds [{}, {}]", lb, ub)));
		}
		if !(0.0..=1.0).contains(&config.pa) {
			return Err(CuckooError::InvalidConfig(format!("pa={} not in [0, 1]", config.pa)));
		}

		let mut rng: StdRng = match config.seed {
			Some(s) => StdRng::seed_from_u64(s),
			None => {
				let mut thread_rng = rand::rng();
				StdRng::from_rng(&mut thread_rng)
			}
		};

		let eggs = config.eggs;
		let nest: Vec<Candidate> = (0..eggs)
			.map(|_| Candidate::generate(func, &mut generator, &mut rng, nd, lb, ub))
			.collect();
		let new_nest = nest.clone();

		if config.disp {
			log::info!(
				"CS Init: {} dimensions, eggs={}, pa={:.3}, bounds=[{}, {}]",
				nd,
				eggs,
				config.pa,
				lb,
				ub
			);
		}

		Ok(Self {
			func,
			stop: Box::new(stop),
			nest,
			new_nest,
			perm1: (0..eggs).collect(),
			perm2: (0..eggs).collect(),
			best: 0,
			rng,
			niter: 0,
			nfev: eggs,
			nd,
			lb,
			ub,
			config,
		})
	}

	pub fn eggs(&self) -> usize {
		self.nest.len()
	}
	pub fn nd(&self) -> usize {
		self.nd
	}
	pub fn bounds(&self) -> (f64, f64) {
		(self.lb, self.ub)
	}
	pub fn pa(&self) -> f64 {
		self.config.pa
	}
	/// Completed pipeline passes
	pub fn niter(&self) -> usize {
		self.niter
	}
	/// Fitness evaluations so far, including the initial nest
	pub fn nfev(&self) -> usize {
		self.nfev
	}
	pub fn best_index(&self) -> usize {
		self.best
	}
	pub fn best(&self) -> &Candidate {
		&self.nest[self.best]
	}
	pub fn nest(&self) -> &[Candidate] {
		&self.nest
	}
	pub fn new_nest(&self) -> &[Candidate] {
		&self.new_nest
	}

	/// Re-establish the best index with a full scan of the current nest
	pub fn check_best_nest(&mut self) {
		self.best = argmin(&self.nest);
	}

	pub(crate) fn shuffle(&mut self) {
		self.perm1.shuffle(&mut self.rng);
		self.perm2.shuffle(&mut self.rng);
	}

	pub(crate) fn evaluate_new(&mut self, i: usize) {
		self.new_nest[i].evaluate(self.func);
		self.nfev += 1;
	}

	/// Run the default pipeline: get-cuckoos, best-nest, empty-nest, best-nest
	pub fn search(&mut self) -> Result<Candidate, CuckooError> {
		let pipeline = default_pipeline();
		self.search_with(&pipeline)
	}

	/// Apply `pipeline` once per iteration until the stop predicate accepts the best nest.
	///
	/// There is no iteration cap: a predicate that never fires runs forever.
	pub fn search_with(&mut self, pipeline: &[Box<dyn Operator + '_>]) -> Result<Candidate, CuckooError> {
		self.check_best_nest();

		if self.config.disp {
			let names: Vec<&str> = pipeline.iter().map(|op| op.name()).collect();
			log::info!("CS pipeline: [{}]", names.join(", "));
			log::info!("CS iter {:6}  best_f={:.6e}", self.niter, self.nest[self.best].fitness);
		}

		while !(self.stop)(&self.nest[self.best]) {
			let prev_best = self.nest[self.best].fitness;
			for op in pipeline {
				op.apply(self)?;
			}
			self.niter += 1;

			let best_f = self.nest[self.best].fitness;
			if best_f < prev_best {
				log::debug!("CS iter {:6}  best_f={:.6e}  nfev={}", self.niter, best_f, self.nfev);
				if self.config.disp {
					log::info!("CS iter {:6}  best_f={:.6e}", self.niter, best_f);
				}
			}

			if self.config.callback.is_some() {
				let intermediate = CSIntermediate {
					x: self.nest[self.best].solution.clone(),
					fun: best_f,
					iter: self.niter,
					nfev: self.nfev,
				};
				if let Some(ref mut cb) = self.config.callback {
					cb(&intermediate);
				}
			}
		}

		if self.config.disp {
			log::info!(
				"CS finished after {} iterations, {} evaluations: best_f={:.6e}",
				self.niter,
				self.nfev,
				self.nest[self.best].fitness
			);
		}

		Ok(self.best().clone())
	}

	/// Snapshot of the current state as a report
	pub fn report(&self) -> CSReport {
		let best = self.best();
		let population = Array2::from_shape_fn((self.eggs(), self.nd), |(i, j)| self.nest[i].solution[j]);
		let population_fitness = self.nest.iter().map(|c| c.fitness).collect();
		CSReport {
			x: best.solution.clone(),
			fun: best.fitness,
			nit: self.niter,
			nfev: self.nfev,
			population,
			population_fitness,
		}
	}
}

/// Convenience function: build an engine, run the default pipeline, return the report
pub fn cuckoo_search<'a, G, S>(
	func: &'a FitnessFn<'a>,
	generator: G,
	stop: S,
	nd: usize,
	bounds: (f64, f64),
	config: CSConfig,
) -> Result<CSReport, CuckooError>
where
	G: FnMut(&mut StdRng) -> f64,
	S: FnMut(&Candidate) -> bool + 'a,
{
	let pipeline = default_pipeline();
	cuckoo_search_with(func, generator, stop, nd, bounds, config, &pipeline)
}

/// Same as [`cuckoo_search`] with an explicit operator pipeline
pub fn cuckoo_search_with<'a, G, S>(
	func: &'a FitnessFn<'a>,
	generator: G,
	stop: S,
	nd: usize,
	bounds: (f64, f64),
	config: CSConfig,
	pipeline: &[Box<dyn Operator + '_>],
) -> Result<CSReport, CuckooError>
where
	G: FnMut(&mut StdRng) -> f64,
	S: FnMut(&Candidate) -> bool + 'a,
{
	let mut cs = CuckooSearch::new(func, generator, stop, nd, bounds, config)?;
	cs.search_with(pipeline)?;
	Ok(cs.report())
}

#[cfg(test)]
mod engine_tests {
	use super::*;
	use std::cell::Cell;
	use std::rc::Rc;

	fn sphere(x: &Array1<f64>) -> f64 {
		x.iter().map(|v| v * v).sum()
	}

	#[test]
	fn test_invalid_configuration_is_rejected() {
		let bad = [
			(CSConfigBuilder::new().eggs(0).build(), 2, (-1.0, 1.0)),
			(CSConfigBuilder::new().build(), 0, (-1.0, 1.0)),
			(CSConfigBuilder::new().build(), 2, (1.0, -1.0)),
			(CSConfigBuilder::new().build(), 2, (f64::NEG_INFINITY, 1.0)),
			(CSConfigBuilder::new().pa(1.5).build(), 2, (-1.0, 1.0)),
		];
		for (config, nd, bounds) in bad {
			let r = CuckooSearch::new(&sphere, uniform(-1.0, 1.0), |_| true, nd, bounds, config);
			assert!(matches!(r, Err(CuckooError::InvalidConfig(_))));
		}
	}

	#[test]
	fn test_construction_evaluates_every_egg_once() {
		let evals = Cell::new(0usize);
		let func = |x: &Array1<f64>| {
			evals.set(evals.get() + 1);
			sphere(x)
		};
		let config = CSConfigBuilder::new().eggs(7).seed(1).build();
		let cs = CuckooSearch::new(&func, uniform(-1.0, 1.0), |_| true, 3, (-1.0, 1.0), config)
			.unwrap();
		assert_eq!(evals.get(), 7);
		assert_eq!(cs.nfev(), 7);
		assert_eq!(cs.eggs(), 7);
		assert_eq!(cs.new_nest().len(), 7);
		assert_eq!(cs.perm1, (0..7).collect::<Vec<_>>());
		assert_eq!(cs.perm2, (0..7).collect::<Vec<_>>());
	}

	#[test]
	fn test_immediate_stop_runs_zero_iterations() {
		let config = CSConfigBuilder::new().eggs(9).seed(12).build();
		let mut cs =
			CuckooSearch::new(&sphere, uniform(-5.0, 5.0), |_| true, 2, (-5.0, 5.0), config).unwrap();
		let pre_scan_best =
			cs.nest().iter().map(|c| c.fitness).fold(f64::INFINITY, f64::min);

		let best = cs.search().unwrap();

		assert_eq!(cs.niter(), 0);
		assert_eq!(cs.nfev(), 9);
		assert_eq!(best.fitness, pre_scan_best);
		assert_eq!(cs.best().fitness, pre_scan_best);
	}

	#[test]
	fn test_sphere_with_deterministic_generator() {
		let sequence = [4.5, -3.0, 2.0, -4.0, 1.0, 3.5, -2.5, 0.5, -1.5, 4.0];
		let mut k = 0;
		let generator = move |_: &mut StdRng| {
			let v = sequence[k % sequence.len()];
			k += 1;
			v
		};
		let config = CSConfigBuilder::new().eggs(10).seed(2024).build();
		let mut cs = CuckooSearch::new(
			&sphere,
			generator,
			fitness_below_or_max_iter(1e-3, 20_000),
			2,
			(-5.0, 5.0),
			config,
		)
		.unwrap();

		let best = cs.search().unwrap();

		assert!(best.fitness < 1e-3, "fitness {} after {} iterations", best.fitness, cs.niter());
		assert!(cs.niter() > 0);
		assert!(best.within_bounds());
	}

	#[test]
	fn test_seeded_runs_are_reproducible() {
		let run = |seed: u64| {
			let config = CSConfigBuilder::new().eggs(10).seed(seed).build();
			cuckoo_search(
				&sphere,
				uniform(-5.0, 5.0),
				fitness_below_or_max_iter(0.0, 30),
				3,
				(-5.0, 5.0),
				config,
			)
			.unwrap()
		};
		let a = run(77);
		let b = run(77);
		assert_eq!(a.x, b.x);
		assert_eq!(a.fun, b.fun);
		assert_eq!(a.nit, 30);
		assert_eq!(a.nfev, b.nfev);
		assert_eq!(a.population.dim(), (10, 3));
	}

	#[test]
	fn test_report_serializes_to_json() {
		let config = CSConfigBuilder::new().eggs(4).seed(8).build();
		let report = cuckoo_search(
			&sphere,
			uniform(-1.0, 1.0),
			fitness_below_or_max_iter(0.0, 3),
			2,
			(-1.0, 1.0),
			config,
		)
		.unwrap();
		let json: serde_json::Value = serde_json::to_value(&report).unwrap();
		assert_eq!(json["nit"], 3);
		assert_eq!(json["fun"].as_f64().unwrap(), report.fun);
		assert!(format!("{:?}", report).contains("population: \"4x2\""));
	}

	#[test]
	fn test_callback_sees_every_iteration() {
		let seen = Rc::new(Cell::new(0usize));
		let seen_cb = seen.clone();
		let config = CSConfigBuilder::new()
			.eggs(6)
			.seed(3)
			.callback(Box::new(move |it: &CSIntermediate| {
				assert_eq!(it.iter, seen_cb.get() + 1);
				seen_cb.set(it.iter);
			}))
			.build();
		let report = cuckoo_search(
			&sphere,
			uniform(-5.0, 5.0),
			fitness_below_or_max_iter(0.0, 12),
			2,
			(-5.0, 5.0),
			config,
		)
		.unwrap();
		assert_eq!(report.nit, 12);
		assert_eq!(seen.get(), 12);
	}

	#[test]
	fn test_bounds_hold_after_every_operator() {
		let config = CSConfigBuilder::new().eggs(10).pa(0.5).seed(99).build();
		let mut cs =
			CuckooSearch::new(&sphere, uniform(-0.5, 0.5), |_| true, 5, (-0.5, 0.5), config).unwrap();
		cs.check_best_nest();
		for _ in 0..30 {
			for op in default_pipeline() {
				op.apply(&mut cs).unwrap();
				assert!(cs.nest().iter().all(Candidate::within_bounds));
				assert!(cs.new_nest().iter().all(Candidate::within_bounds));
			}
		}
	}
}
