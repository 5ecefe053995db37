//! Beat-snapping and bar-counting over downbeat grids
//!
//! Grids can contain hundreds of entries per track, so both operations use a
//! binary-search bracket instead of a linear scan.

/// Snap a timestamp to the nearest downbeat position
///
/// Returns the original timestamp if the grid is empty. Ties between the
/// bracketing candidates resolve to the earlier one.
pub fn snap_to_downbeat(timestamp: f64, downbeats: &[f64]) -> f64 {
    if downbeats.is_empty() {
        return timestamp;
    }

    // First index with downbeat >= timestamp
    let idx = downbeats.partition_point(|&d| d < timestamp);

    let before = idx.checked_sub(1).map(|i| downbeats[i]);
    let after = downbeats.get(idx).copied();

    match (before, after) {
        (Some(b), Some(a)) => {
            if (a - timestamp).abs() < (timestamp - b).abs() {
                a
            } else {
                b
            }
        }
        (Some(b), None) => b,
        (None, Some(a)) => a,
        (None, None) => timestamp,
    }
}

/// Count the bars in the half-open range `[start, end)`
///
/// A bar is counted for each downbeat that falls within the range; adjacent
/// segments sharing a boundary never double-count it. A segment spanning any
/// real time always has at least one bar, even when no downbeat lands inside
/// it or the grid is empty.
pub fn count_bars(start: f64, end: f64, downbeats: &[f64]) -> usize {
    if downbeats.is_empty() {
        return if end > start { 1 } else { 0 };
    }

    let lo = downbeats.partition_point(|&d| d < start);
    let hi = downbeats.partition_point(|&d| d < end);
    // hi < lo only for an inverted range, which counts as zero bars
    let count = hi.saturating_sub(lo);

    if count == 0 && end > start {
        return 1;
    }
    count
}
