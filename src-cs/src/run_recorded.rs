//! Recording wrapper for Cuckoo Search, mostly for tests and analysis

use std::path::{Path, PathBuf};

use ndarray::Array1;

use crate::recorder::OptimizationRecorder;
use crate::{CSConfig, CSIntermediate, CSReport, Candidate, cuckoo_search, uniform};
use crate::error::CuckooError;

/// Run Cuckoo Search with a uniform initial nest over `bounds`, recording every iteration
/// to `<output_dir>/<function_name>.csv`.
///
/// A callback already present in `config` still fires, after the recorder.
pub fn run_recorded_cuckoo_search<F, S>(
    function_name: &str,
    func: F,
    nd: usize,
    bounds: (f64, f64),
    stop: S,
    mut config: CSConfig,
    output_dir: impl AsRef<Path>,
) -> Result<(CSReport, PathBuf), CuckooError>
where
    F: Fn(&Array1<f64>) -> f64,
    S: FnMut(&Candidate) -> bool,
{
    let recorder = OptimizationRecorder::new(function_name);
    let mut record = recorder.create_callback();
    let callback: Box<dyn FnMut(&CSIntermediate)> = match config.callback.take() {
        Some(mut user) => Box::new(move |it: &CSIntermediate| {
            record(it);
            user(it);
        }),
        None => record,
    };
    config.callback = Some(callback);

    let report = cuckoo_search(&func, uniform(bounds.0, bounds.1), stop, nd, bounds, config)?;
    let csv_path = recorder.save_to_csv(output_dir)?;
    log::debug!(
        "recorded {} iterations of '{}' to {}",
        recorder.num_iterations(),
        function_name,
        csv_path.display()
    );

    Ok((report, csv_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CSConfigBuilder, fitness_below_or_max_iter};

    #[test]
    fn test_run_recorded_basic() {
        let quadratic = |x: &Array1<f64>| -> f64 { x.iter().map(|&xi| xi * xi).sum() };
        let dir = tempfile::tempdir().unwrap();
        let config = CSConfigBuilder::new().seed(42).eggs(15).build();

        let (report, csv_path) = run_recorded_cuckoo_search(
            "test_quadratic",
            quadratic,
            2,
            (-5.0, 5.0),
            fitness_below_or_max_iter(1e-3, 5_000),
            config,
            dir.path(),
        )
        .unwrap();

        assert!(report.fun < 1e-3, "Function value too high: {}", report.fun);
        assert!(csv_path.exists());

        let rows = csv::Reader::from_path(&csv_path).unwrap().records().count();
        assert_eq!(rows, report.nit);
    }
}
