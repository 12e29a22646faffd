use std::fs;
use std::path::Path;

use ndarray::Array1;

use crate::error::IasvpError;

/// Read exactly `n` whitespace-separated reals from `path`. Test case files hold one per line.
pub fn load_vector(path: impl AsRef<Path>, n: usize) -> Result<Array1<f64>, IasvpError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| IasvpError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let values = text
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| IasvpError::Parse {
                path: path.to_path_buf(),
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    if values.len() != n {
        return Err(IasvpError::Count { path: path.to_path_buf(), expected: n, got: values.len() });
    }
    Ok(Array1::from(values))
}
