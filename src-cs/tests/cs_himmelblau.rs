use cuckoo_search::{CSConfigBuilder, fitness_below_or_max_iter, run_recorded_cuckoo_search};
use cuckoo_testfunctions::{get_function_metadata, himmelblau};

#[test]
fn test_cs_himmelblau() {
    let dir = tempfile::tempdir().unwrap();
    let metadata = get_function_metadata();
    let meta = &metadata["himmelblau"];
    let config = CSConfigBuilder::new().seed(23).build();

    let (report, _) = run_recorded_cuckoo_search(
        "himmelblau",
        himmelblau,
        2,
        meta.bounds,
        fitness_below_or_max_iter(1e-6, 10_000),
        config,
        dir.path(),
    )
    .unwrap();

    assert!(report.fun < 1e-6, "f = {:e}", report.fun);
    // Any of the four global minima will do
    let nearest = meta
        .global_minima
        .iter()
        .map(|(x, _)| ((report.x[0] - x[0]).powi(2) + (report.x[1] - x[1]).powi(2)).sqrt())
        .fold(f64::INFINITY, f64::min);
    assert!(nearest < 1e-2, "distance to nearest minimum {}", nearest);
}
