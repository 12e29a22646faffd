//! Environment variable utilities
//!
//! The CUCKOO_DIR variable points to the project root; generated data and the singular-value
//! test cases are located relative to it.

use crate::constants::{CUCKOO_DIR, DATA_GENERATED, INPUT};
use std::env;
use std::path::PathBuf;

/// Error type for environment variable issues
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "CUCKOO_DIR environment variable is not set. Please set it to the project root directory (e.g., export CUCKOO_DIR=/path/to/cuckoo)"
    )]
    CuckooDirNotSet,

    #[error("CUCKOO_DIR points to a non-existent directory: {0}")]
    CuckooDirNotFound(PathBuf),

    #[error("Input directory does not exist: {0}")]
    InputDirNotFound(PathBuf),

    #[error("Failed to create data_generated directory: {0}")]
    DataGeneratedCreationFailed(std::io::Error),
}

/// Get the CUCKOO_DIR environment variable and validate it exists
///
/// # Errors
///
/// Returns an error if:
/// - CUCKOO_DIR is not set
/// - CUCKOO_DIR points to a non-existent directory
///
/// # Example
///
/// ```no_run
/// use cuckoo_env::env_utils::get_cuckoo_dir;
///
/// let root = get_cuckoo_dir()?;
/// println!("Project directory: {}", root.display());
/// # Ok::<(), cuckoo_env::env_utils::EnvError>(())
/// ```
pub fn get_cuckoo_dir() -> Result<PathBuf, EnvError> {
    let dir = env::var(CUCKOO_DIR).map_err(|_| EnvError::CuckooDirNotSet)?;

    let path = PathBuf::from(dir);

    if !path.exists() {
        return Err(EnvError::CuckooDirNotFound(path));
    }

    Ok(path)
}

/// Get the path to the data_generated directory, creating it if necessary
pub fn get_data_generated_dir() -> Result<PathBuf, EnvError> {
    let data_generated = get_cuckoo_dir()?.join(DATA_GENERATED);

    if !data_generated.exists() {
        std::fs::create_dir_all(&data_generated).map_err(EnvError::DataGeneratedCreationFailed)?;
    }

    Ok(data_generated)
}

/// Get the path to the records subdirectory within data_generated
///
/// This is a convenience function for the common case of writing
/// optimization records.
pub fn get_records_dir() -> Result<PathBuf, EnvError> {
    let records_dir = get_data_generated_dir()?.join("records");

    if !records_dir.exists() {
        std::fs::create_dir_all(&records_dir).map_err(EnvError::DataGeneratedCreationFailed)?;
    }

    Ok(records_dir)
}

/// Get the directory holding the `c{case}x{n}` singular-value files. It is never created.
pub fn get_input_dir() -> Result<PathBuf, EnvError> {
    let input = get_cuckoo_dir()?.join(INPUT);
    if !input.is_dir() {
        return Err(EnvError::InputDirNotFound(input));
    }
    Ok(input)
}
