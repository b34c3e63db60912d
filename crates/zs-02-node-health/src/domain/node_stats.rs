//! # Node Statistics
//!
//! Bounded ring of recent request outcomes for one node.

use std::collections::VecDeque;

/// Outcomes kept per node.
pub const STAT_SIZE: usize = 20;

/// Recent outcomes and the derived weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStats {
    samples: VecDeque<i8>,
    weight: i64,
}

impl Default for NodeStats {
    /// A fresh node counts as one success.
    fn default() -> Self {
        let mut samples = VecDeque::with_capacity(STAT_SIZE);
        samples.push_back(1);
        Self { samples, weight: 1 }
    }
}

impl NodeStats {
    /// Record an outcome, dropping the oldest beyond `STAT_SIZE`, and
    /// recompute the weight.
    pub fn record(&mut self, success: bool) {
        self.samples.push_back(if success { 1 } else { -1 });
        if self.samples.len() > STAT_SIZE {
            self.samples.pop_front();
        }
        self.weight = Self::weight_of(&self.samples);
    }

    /// `Σ i·s[i]` with `i = 1` for the oldest sample.
    fn weight_of(samples: &VecDeque<i8>) -> i64 {
        samples
            .iter()
            .enumerate()
            .map(|(i, s)| (i as i64 + 1) * i64::from(*s))
            .sum()
    }

    /// Current weight.
    pub fn weight(&self) -> i64 {
        self.weight
    }

    /// Samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = i8> + '_ {
        self.samples.iter().copied()
    }

    /// Number of samples held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Never true: a node always holds its seed sample until pushed out.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
