//! Summary statistics for decomposition arithmetic and bootstrap aggregation.

/// Arithmetic mean of a slice. Empty input yields `None` rather than NaN.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of `values` restricted to the given row indices.
pub fn mean_at(values: &[f64], rows: &[usize]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    Some(rows.iter().map(|&i| values[i]).sum::<f64>() / rows.len() as f64)
}

/// Percentile with linear interpolation between closest ranks.
///
/// `q` is in `[0, 100]`. Matches the default interpolation of common
/// numerical libraries: rank `q/100 * (n-1)`, interpolated between the
/// surrounding order statistics.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=100.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
