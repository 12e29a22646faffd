//! Optimization test functions library
//!
//! Benchmark objectives used to validate the cuckoo search engine:
//!
//! - **Unimodal**: Single global optimum functions (sphere, rosenbrock, etc.)
//! - **Multimodal**: Multiple local minima functions (ackley, rastrigin, etc.)
//!
//! Bounds are scalar: the same `[lb, ub]` applies to every coordinate.
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use cuckoo_testfunctions::*;
//!
//! let x = Array1::from_vec(vec![0.0, 0.0]);
//! assert_eq!(sphere(&x), 0.0);
//! assert_eq!(get_function_bounds("sphere"), Some((-5.0, 5.0)));
//! ```

use ndarray::Array1;
use std::collections::HashMap;

pub mod functions;
pub use functions::*;

/// Metadata for a test function
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    pub name: String,
    /// Scalar bounds (min, max) shared by every dimension
    pub bounds: (f64, f64),
    /// Global minima locations (for the smallest supported dimension) and values
    pub global_minima: Vec<(Vec<f64>, f64)>,
    pub description: String,
    pub multimodal: bool,
    /// Typical dimension(s) for the function
    pub dimensions: Vec<usize>,
    pub function: fn(&Array1<f64>) -> f64,
}

fn entry(
    name: &str,
    bounds: (f64, f64),
    global_minima: Vec<(Vec<f64>, f64)>,
    description: &str,
    multimodal: bool,
    dimensions: Vec<usize>,
    function: fn(&Array1<f64>) -> f64,
) -> (String, FunctionMetadata) {
    (
        name.to_string(),
        FunctionMetadata {
            name: name.to_string(),
            bounds,
            global_minima,
            description: description.to_string(),
            multimodal,
            dimensions,
            function,
        },
    )
}

/// Get metadata for all available test functions
pub fn get_function_metadata() -> HashMap<String, FunctionMetadata> {
    HashMap::from([
        entry(
            "sphere",
            (-5.0, 5.0),
            vec![(vec![0.0, 0.0], 0.0)],
            "N-dimensional quadratic function",
            false,
            vec![2, 5, 10],
            sphere,
        ),
        entry(
            "rosenbrock",
            (-2.048, 2.048),
            vec![(vec![1.0, 1.0], 0.0)],
            "N-dimensional banana function",
            false,
            vec![2, 4, 10],
            rosenbrock,
        ),
        entry(
            "booth",
            (-10.0, 10.0),
            vec![(vec![1.0, 3.0], 0.0)],
            "2D unimodal function",
            false,
            vec![2],
            booth,
        ),
        entry(
            "matyas",
            (-10.0, 10.0),
            vec![(vec![0.0, 0.0], 0.0)],
            "2D unimodal function",
            false,
            vec![2],
            matyas,
        ),
        entry(
            "sum_of_different_powers",
            (-1.0, 1.0),
            vec![(vec![0.0, 0.0], 0.0)],
            "N-dimensional unimodal function with uneven curvature",
            false,
            vec![2, 5, 10],
            sum_of_different_powers,
        ),
        entry(
            "rastrigin",
            (-5.12, 5.12),
            vec![(vec![0.0, 0.0], 0.0)],
            "N-dimensional highly multimodal function",
            true,
            vec![2, 5],
            rastrigin,
        ),
        entry(
            "ackley",
            (-32.768, 32.768),
            vec![(vec![0.0, 0.0], 0.0)],
            "N-dimensional multimodal function",
            true,
            vec![2, 5, 10],
            ackley,
        ),
        entry(
            "himmelblau",
            (-5.0, 5.0),
            vec![
                (vec![3.0, 2.0], 0.0),
                (vec![-2.805118, 3.131312], 0.0),
                (vec![-3.779310, -3.283186], 0.0),
                (vec![3.584428, -1.848126], 0.0),
            ],
            "2D multimodal function with 4 global minima",
            true,
            vec![2],
            himmelblau,
        ),
    ])
}

/// Bounds of a named function, if known
pub fn get_function_bounds(function_name: &str) -> Option<(f64, f64)> {
    get_function_metadata().get(function_name).map(|meta| meta.bounds)
}

/// Evaluate a named function at `x`
pub fn call_function(name: &str, x: &Array1<f64>) -> Option<f64> {
    get_function_metadata().get(name).map(|meta| (meta.function)(x))
}
