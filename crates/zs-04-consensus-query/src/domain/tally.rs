//! # Consensus Tally
//!
//! Per-query accumulator. Never shared across queries.
//!
//! Two levels are tracked:
//! - status codes, with a dominant status that prefers 200 on ties
//! - canonical body digests per status, with a best body per status that
//!   only changes when a digest's count strictly exceeds the current best

use std::collections::HashMap;

use super::canonical::canonical_digest;

#[derive(Debug, Clone)]
struct DigestEntry {
    count: usize,
    body: String,
}

#[derive(Debug, Clone, Default)]
struct BestBody {
    count: usize,
    body: String,
}

/// Tally of one fan-out.
#[derive(Debug, Clone, Default)]
pub struct ConsensusTally {
    status_counts: HashMap<u16, usize>,
    max_count: usize,
    dominant: Option<u16>,
    digests: HashMap<(u16, String), DigestEntry>,
    best: HashMap<u16, BestBody>,
    responses: usize,
}

impl ConsensusTally {
    /// Empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one response.
    pub fn add(&mut self, status: u16, body: &str) {
        self.responses += 1;

        let count = {
            let c = self.status_counts.entry(status).or_insert(0);
            *c += 1;
            *c
        };
        if count > self.max_count {
            self.max_count = count;
        }
        if self.is_dominant(status) {
            self.dominant = Some(status);
        }

        let digest = canonical_digest(body);
        let entry = self
            .digests
            .entry((status, digest))
            .or_insert_with(|| DigestEntry {
                count: 0,
                body: body.to_string(),
            });
        entry.count += 1;

        let best = self.best.entry(status).or_default();
        if entry.count > best.count {
            best.count = entry.count;
            best.body = entry.body.clone();
        }
    }

    /// `count[s] == max_count && (s == 200 || count[200] < max_count)`.
    pub fn is_dominant(&self, status: u16) -> bool {
        let count = self.count(status);
        count > 0
            && count == self.max_count
            && (status == 200 || self.count(200) < self.max_count)
    }

    /// Responses seen with `status`.
    pub fn count(&self, status: u16) -> usize {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }

    /// Highest per-status count.
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Total responses counted.
    pub fn responses(&self) -> usize {
        self.responses
    }

    /// Dominant status, if any response was counted.
    pub fn dominant_status(&self) -> Option<u16> {
        self.dominant
    }

    /// `max_count * 100 / consensus`; 0 for a zero consensus.
    pub fn rate(&self, consensus: usize) -> usize {
        if consensus == 0 {
            return 0;
        }
        self.max_count * 100 / consensus
    }

    /// Best body of the dominant status.
    pub fn winning_body(&self) -> Option<&str> {
        let status = self.dominant?;
        self.best.get(&status).map(|b| b.body.as_str())
    }

    /// Count of the most agreed-upon 200 body.
    pub fn success_agreement(&self) -> usize {
        self.best.get(&200).map_or(0, |b| b.count)
    }

    /// Most agreed-upon 200 body.
    pub fn success_body(&self) -> Option<&str> {
        self.best.get(&200).map(|b| b.body.as_str())
    }

    /// Best body of the most frequent non-200 status (lowest code on ties).
    pub fn winning_error_body(&self) -> Option<&str> {
        let status = self
            .status_counts
            .iter()
            .filter(|(s, _)| **s != 200)
            .max_by(|(sa, ca), (sb, cb)| ca.cmp(cb).then(sb.cmp(sa)))
            .map(|(s, _)| *s)?;
        self.best.get(&status).map(|b| b.body.as_str())
    }
}
