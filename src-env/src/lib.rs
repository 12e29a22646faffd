//! Environment helpers shared by the cuckoo search binaries and tests

pub mod constants;
pub mod env_utils;

pub use env_utils::{EnvError, get_cuckoo_dir, get_data_generated_dir, get_input_dir, get_records_dir};
