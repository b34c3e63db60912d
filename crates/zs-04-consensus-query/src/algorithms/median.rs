//! # Lower Median

/// Element at index `(n - 1) / 2` after sorting; always one of the inputs.
pub fn lower_median(values: &mut [i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    Some(values[(values.len() - 1) / 2])
}
