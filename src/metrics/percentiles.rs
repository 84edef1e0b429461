//! Order statistics over sorted response times.
//!
//! Quantiles use the exclusive method: the sample is treated as `n + 1`
//! equal-probability cut points and values between neighbours are linearly
//! interpolated. Small samples fall back to the maximum (see [`tail_latency`]).

/// p95 needs strictly more samples than this before interpolating.
pub(super) const P95_MIN_SAMPLES: usize = 20;
/// p99 needs strictly more samples than this before interpolating.
pub(super) const P99_MIN_SAMPLES: usize = 100;

/// Cut point `index` of `parts` equal-probability intervals over `sorted`.
///
/// `sorted` must be ascending with at least two elements and `0 < index < parts`.
pub(super) fn quantile_exclusive(sorted: &[f64], parts: usize, index: usize) -> Option<f64> {
    let len = sorted.len();
    if len < 2 || parts == 0 || index == 0 || index >= parts {
        return None;
    }
    let position = index.checked_mul(len.checked_add(1)?)?;
    let lower = position.checked_div(parts)?.clamp(1, len.saturating_sub(1));
    let weight = position as f64 - lower.checked_mul(parts)? as f64;
    let parts_f = parts as f64;

    let below = *sorted.get(lower.checked_sub(1)?)?;
    let above = *sorted.get(lower)?;
    Some((below * (parts_f - weight) + above * weight) / parts_f)
}

/// Tail percentile `index / parts`, or the sample maximum when the sample is
/// not larger than `min_samples`.
pub(super) fn tail_latency(
    sorted: &[f64],
    parts: usize,
    index: usize,
    min_samples: usize,
) -> f64 {
    let max = sorted.last().copied().unwrap_or(0.0);
    if sorted.len() > min_samples {
        quantile_exclusive(sorted, parts, index).unwrap_or(max)
    } else {
        max
    }
}

/// Middle value, or the mean of the two middle values for even lengths.
pub(super) fn median(sorted: &[f64]) -> f64 {
    let len = sorted.len();
    if len == 0 {
        return 0.0;
    }
    let mid = len / 2;
    if len % 2 == 1 {
        sorted.get(mid).copied().unwrap_or(0.0)
    } else {
        let low = mid.checked_sub(1).and_then(|idx| sorted.get(idx)).copied();
        let high = sorted.get(mid).copied();
        match (low, high) {
            (Some(low), Some(high)) => (low + high) / 2.0,
            _ => 0.0,
        }
    }
}

pub(super) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
