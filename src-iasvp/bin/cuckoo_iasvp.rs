use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use ndarray::Array1;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::Serialize;

use cuckoo_env::{get_input_dir, get_records_dir};
use cuckoo_iasvp::{Iasvp, NUM_CASES, hybrid_refinement, load_vector, test_case};
use cuckoo_search::{
	CSConfigBuilder, CSReport, Candidate, CuckooSearch, OptimizationRecorder,
	build_pipeline, fitness_below, fitness_below_or_max_iter, parse_pipeline, uniform,
};

const DEFAULT_PIPELINE: &str = "get-cuckoos,best-nest,hybrid-empty-nest,best-nest";

/// CLI arguments for the Toeplitz IASVP solver
#[derive(Parser, Debug)]
#[command(name = "cuckoo-iasvp")]
#[command(about = "Solve the Toeplitz inverse additive singular value problem with hybrid cuckoo search")]
struct Args {
	/// Test case index (0 <= pos < 15) into $CUCKOO_DIR/input
	pos: Option<usize>,

	/// Read the seed from this file instead of a bundled test case
	#[arg(long, requires = "nd", conflicts_with = "pos")]
	input: Option<PathBuf>,

	/// Dimension of the --input seed
	#[arg(long)]
	nd: Option<usize>,

	/// Solve a random instance of this dimension
	#[arg(long, conflicts_with_all = ["pos", "input"])]
	random: Option<usize>,

	/// Number of nests
	#[arg(long, default_value_t = 25)]
	eggs: usize,

	/// Survival probability of a nest in the empty-nest step
	#[arg(long, default_value_t = 0.25)]
	pa: f64,

	#[arg(long, default_value_t = -32.0, allow_negative_numbers = true)]
	lb: f64,

	#[arg(long, default_value_t = 32.0, allow_negative_numbers = true)]
	ub: f64,

	/// Stop once the best fitness drops below this value
	#[arg(long, default_value_t = 1.0e-5)]
	tol: f64,

	/// Seed for reproducible runs
	#[arg(long)]
	seed: Option<u64>,

	/// Give up after this many iterations
	#[arg(long)]
	max_iter: Option<usize>,

	/// Comma separated operator pipeline
	#[arg(long, default_value = DEFAULT_PIPELINE)]
	pipeline: String,

	/// Write per-iteration progress as CSV into this directory, $CUCKOO_DIR/data_generated/records
	/// when no directory is given
	#[arg(long, num_args = 0..=1, value_name = "DIR")]
	record: Option<Option<PathBuf>>,

	/// Print the full report as JSON instead of one CSV line
	#[arg(long)]
	json: bool,

	#[arg(short, long)]
	verbose: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
	problem: &'a str,
	elapsed: f64,
	fitness: f64,
	relative_error: f64,
	iterations: usize,
	nd: usize,
	report: CSReport,
}

/// Label and seed of the instance to solve. `Err` carries the usage message.
fn select_seed(args: &Args) -> Result<(String, Array1<f64>), String> {
	let (label, seed) = if let Some(nd) = args.random {
		if nd == 0 {
			return Err("--random needs a dimension of at least 1".into());
		}
		let mut rng = match args.seed {
			Some(s) => StdRng::seed_from_u64(s),
			None => StdRng::from_rng(&mut rand::rng()),
		};
		let seed = Array1::from_shape_fn(nd, |_| rng.random_range(-1.0..=1.0));
		(format!("random{}", nd), seed)
	} else if let Some(path) = &args.input {
		let nd = args.nd.unwrap_or_default();
		if nd == 0 {
			return Err("--nd must be at least 1".into());
		}
		let seed = load_vector(path, nd).map_err(|e| e.to_string())?;
		(path.display().to_string(), seed)
	} else if let Some(pos) = args.pos {
		let Some((name, nd)) = test_case(pos) else {
			return Err(format!("0 <= pos < {}", NUM_CASES));
		};
		let path = get_input_dir().map_err(|e| e.to_string())?.join(&name);
		let seed = load_vector(&path, nd).map_err(|e| e.to_string())?;
		(name, seed)
	} else {
		return Err("missing test case: give <POS>, --input <FILE> --nd <N>, or --random <N>".into());
	};
	Ok((label, seed))
}

/// Usage problems are reported on stdout and end the process successfully
fn usage(message: &str) -> Result<(), Box<dyn Error>> {
	println!("{}", message);
	Args::command().print_help()?;
	Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(e) => {
			e.print()?;
			return Ok(());
		}
	};

	let level = if args.verbose { "info" } else { "warn" };
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

	let (label, seed) = match select_seed(&args) {
		Ok(selected) => selected,
		Err(message) => return usage(&message),
	};

	let kinds = match parse_pipeline(&args.pipeline) {
		Ok(kinds) => kinds,
		Err(e) => return usage(&e.to_string()),
	};

	let nd = seed.len();
	let problem = Iasvp::from_seed(&seed)?;
	let refinement = hybrid_refinement(&problem);
	let pipeline = build_pipeline(&kinds, Some(&refinement))?;

	let recorder = OptimizationRecorder::new(format!("iasvp_{}", label.replace(['/', '\\'], "_")));
	let mut builder = CSConfigBuilder::new().eggs(args.eggs).pa(args.pa).disp(args.verbose);
	if let Some(s) = args.seed {
		builder = builder.seed(s);
	}
	if args.record.is_some() {
		builder = builder.callback(recorder.create_callback());
	}

	let fitness = |x: &Array1<f64>| problem.fitness(x);
	let stop: Box<dyn FnMut(&Candidate) -> bool> = match args.max_iter {
		Some(max_iter) => Box::new(fitness_below_or_max_iter(args.tol, max_iter)),
		None => Box::new(fitness_below(args.tol)),
	};

	let start = Instant::now();
	let mut cs = match CuckooSearch::new(
		&fitness,
		uniform(args.lb, args.ub),
		stop,
		nd,
		(args.lb, args.ub),
		builder.build(),
	) {
		Ok(cs) => cs,
		Err(e) => return usage(&e.to_string()),
	};
	let best = cs.search_with(&pipeline)?;
	let elapsed = start.elapsed().as_secs_f64();

	if let Some(dir) = &args.record {
		let dir = match dir {
			Some(dir) => dir.clone(),
			None => get_records_dir()?,
		};
		let path = recorder.save_to_csv(&dir)?;
		log::info!("recorded {} iterations to {}", recorder.num_iterations(), path.display());
	}

	let relative_error = problem.relative_error(&best.solution);
	if args.json {
		let summary = Summary {
			problem: &label,
			elapsed,
			fitness: best.fitness,
			relative_error,
			iterations: cs.niter(),
			nd,
			report: cs.report(),
		};
		println!("{}", serde_json::to_string_pretty(&summary)?);
	} else {
		println!("{:.6},{:e},{:e},{},{}", elapsed, best.fitness, relative_error, cs.niter(), nd);
	}

	Ok(())
}
