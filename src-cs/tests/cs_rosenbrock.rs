use cuckoo_search::{CSConfigBuilder, fitness_below_or_max_iter, run_recorded_cuckoo_search};
use cuckoo_testfunctions::{get_function_bounds, rosenbrock};

#[test]
fn test_cs_rosenbrock_2d() {
    let dir = tempfile::tempdir().unwrap();
    let bounds = get_function_bounds("rosenbrock").unwrap();
    let config = CSConfigBuilder::new().seed(11).eggs(25).build();

    let (report, _) = run_recorded_cuckoo_search(
        "rosenbrock",
        rosenbrock,
        2,
        bounds,
        fitness_below_or_max_iter(1e-2, 20_000),
        config,
        dir.path(),
    )
    .unwrap();

    // the valley floor is flat, so only the value is checked tightly
    assert!(report.fun < 1e-2, "f = {:e} after {} iterations", report.fun, report.nit);
    for &xi in report.x.iter() {
        assert!((xi - 1.0).abs() < 0.5);
    }
}
