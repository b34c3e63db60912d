//! # Algorithms

pub mod node_holder;

pub use node_holder::NodeHolder;
