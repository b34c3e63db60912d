//! # Algorithms

pub mod selection;

pub use selection::{sample_size, select_miners};
