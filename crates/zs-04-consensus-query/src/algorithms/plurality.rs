//! # Plurality Vote
//!
//! Counts keyed values; the first key to strictly exceed the running maximum
//! holds the lead, so ties keep the earlier arrival.

use std::collections::HashMap;
use std::hash::Hash;

/// Running plurality vote over `K`, remembering one `V` per key.
#[derive(Debug, Clone)]
pub struct Plurality<K, V> {
    counts: HashMap<K, (usize, V)>,
    leader: Option<K>,
    max_count: usize,
    total: usize,
}

impl<K: Eq + Hash + Clone, V> Default for Plurality<K, V> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            leader: None,
            max_count: 0,
            total: 0,
        }
    }
}

impl<K: Eq + Hash + Clone, V> Plurality<K, V> {
    /// Empty vote.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cast a vote for `key`. The first value seen for a key is kept.
    pub fn add(&mut self, key: K, value: V) {
        self.total += 1;
        let entry = self.counts.entry(key.clone()).or_insert((0, value));
        entry.0 += 1;
        if entry.0 > self.max_count {
            self.max_count = entry.0;
            self.leader = Some(key);
        }
    }

    /// Votes for the leader.
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Votes cast.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Leading value and its vote count.
    pub fn winner(&self) -> Option<(&V, usize)> {
        let key = self.leader.as_ref()?;
        self.counts.get(key).map(|(count, value)| (value, *count))
    }

    /// Consume the vote, returning the leading value.
    pub fn into_winner(mut self) -> Option<(V, usize)> {
        let key = self.leader.take()?;
        self.counts.remove(&key).map(|(count, value)| (value, count))
    }
}
