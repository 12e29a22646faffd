//! Test function implementations organized by category
//!
//! - `unimodal`: Single-optimum functions (bowl-shaped, valley-shaped)
//! - `multimodal`: Multi-optimum functions with many local minima

pub mod multimodal;
pub mod unimodal;

// Re-export all functions for easy access
pub use multimodal::*;
pub use unimodal::*;
