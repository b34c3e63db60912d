//! # Miner Sampling

use rand::seq::SliceRandom;

/// `max(1, ceil(percent * total / 100))`, never more than `total`.
pub fn sample_size(percent: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let wanted = (percent * total).div_ceil(100);
    wanted.clamp(1, total)
}

/// Random `sample_size(min_submit, |pool|)` miners from `pool`.
pub fn select_miners(pool: &[String], min_submit: usize) -> Vec<String> {
    let n = sample_size(min_submit, pool.len());
    pool.choose_multiple(&mut rand::thread_rng(), n)
        .cloned()
        .collect()
}
