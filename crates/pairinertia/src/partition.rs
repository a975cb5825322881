use std::num::NonZeroUsize;
use std::ops::Range;

/// Splits the cell ids `0..n_cells` into `n_parts` contiguous, disjoint
/// ranges of (nearly) equal length.
///
/// When `n_cells` isn't divisible by `n_parts`, each of the first
/// `n_cells % n_parts` ranges holds 1 extra cell. When `n_parts` exceeds
/// `n_cells`, the trailing ranges are empty.
///
/// Each range can be passed to a separate invocation of
/// [`inertia_tensors`](crate::inertia_tensors) (e.g. on a separate thread).
pub fn partition_cell_range(n_cells: usize, n_parts: NonZeroUsize) -> Vec<Range<usize>> {
    let n_parts = n_parts.get();
    let base_len = n_cells / n_parts;
    let n_longer = n_cells % n_parts;

    let mut out = Vec::with_capacity(n_parts);
    let mut start = 0;
    for i in 0..n_parts {
        let len = if i < n_longer { base_len + 1 } else { base_len };
        out.push(start..(start + len));
        start += len;
    }
    out
}
