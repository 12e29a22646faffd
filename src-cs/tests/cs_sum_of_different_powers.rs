use cuckoo_search::{CSConfigBuilder, fitness_below_or_max_iter, run_recorded_cuckoo_search};
use cuckoo_testfunctions::{get_function_bounds, sum_of_different_powers};

#[test]
fn test_cs_sum_of_different_powers_3d() {
    let dir = tempfile::tempdir().unwrap();
    let bounds = get_function_bounds("sum_of_different_powers").unwrap();
    let config = CSConfigBuilder::new().seed(31).build();

    let (report, _) = run_recorded_cuckoo_search(
        "sum_of_different_powers",
        sum_of_different_powers,
        3,
        bounds,
        fitness_below_or_max_iter(1e-6, 5_000),
        config,
        dir.path(),
    )
    .unwrap();

    assert!(report.fun < 1e-6, "f = {:e} after {} iterations", report.fun, report.nit);
    assert!(report.x[0].abs() < 1e-2);
    assert!(report.x.iter().all(|&xi| (bounds.0..=bounds.1).contains(&xi)));
}
