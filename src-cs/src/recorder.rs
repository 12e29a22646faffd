use std::cell::RefCell;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::CSIntermediate;
use crate::error::CuckooError;

/// Records optimization progress via CS callbacks
#[derive(Debug, Clone)]
pub struct OptimizationRecorder {
    /// Function name (used for CSV filename)
    function_name: String,
    records: Rc<RefCell<Vec<OptimizationRecord>>>,
    best_value: Rc<RefCell<Option<f64>>>,
}

/// A single optimization iteration record
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationRecord {
    pub iteration: usize,
    /// Best x found so far
    pub x: Vec<f64>,
    /// Best function result so far
    pub best_result: f64,
    /// Fitness evaluations spent up to this iteration
    pub nfev: usize,
    /// Whether this iteration improved the best known result
    pub is_improvement: bool,
}

impl OptimizationRecorder {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            records: Rc::new(RefCell::new(Vec::new())),
            best_value: Rc::new(RefCell::new(None)),
        }
    }

    /// Create a callback that appends one record per iteration
    pub fn create_callback(&self) -> Box<dyn FnMut(&CSIntermediate)> {
        let records = Rc::clone(&self.records);
        let best_value = Rc::clone(&self.best_value);

        Box::new(move |intermediate: &CSIntermediate| {
            let mut best = best_value.borrow_mut();
            let is_improvement = match *best {
                Some(b) => intermediate.fun < b,
                None => true,
            };
            if is_improvement {
                *best = Some(intermediate.fun);
            }

            records.borrow_mut().push(OptimizationRecord {
                iteration: intermediate.iter,
                x: intermediate.x.to_vec(),
                best_result: intermediate.fun,
                nfev: intermediate.nfev,
                is_improvement,
            });
        })
    }

    /// Save all recorded iterations to `<output_dir>/<function_name>.csv`
    pub fn save_to_csv(&self, output_dir: impl AsRef<Path>) -> Result<PathBuf, CuckooError> {
        let output_dir = output_dir.as_ref();
        create_dir_all(output_dir)?;
        let path = output_dir.join(format!("{}.csv", self.function_name));

        let records = self.records.borrow();
        let mut writer = csv::Writer::from_path(&path)?;
        if records.is_empty() {
            writer.flush()?;
            return Ok(path);
        }

        let num_dimensions = records[0].x.len();
        let mut header = vec!["iteration".to_string()];
        header.extend((0..num_dimensions).map(|i| format!("x{}", i)));
        header.extend(["best_result", "nfev", "is_improvement"].map(String::from));
        writer.write_record(&header)?;

        for record in records.iter() {
            let mut row = Vec::with_capacity(num_dimensions + 4);
            row.push(record.iteration.to_string());
            row.extend(record.x.iter().map(|xi| format!("{:.16}", xi)));
            row.push(format!("{:.16}", record.best_result));
            row.push(record.nfev.to_string());
            row.push(record.is_improvement.to_string());
            writer.write_record(&row)?;
        }
        writer.flush()?;

        Ok(path)
    }

    pub fn get_records(&self) -> Vec<OptimizationRecord> {
        self.records.borrow().clone()
    }

    pub fn num_iterations(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
        *self.best_value.borrow_mut() = None;
    }

    /// Last recorded best solution and its value
    pub fn get_best_solution(&self) -> Option<(Vec<f64>, f64)> {
        self.records.borrow().last().map(|r| (r.x.clone(), r.best_result))
    }
}
