//! Lane-array emulation of the vector kernels.
//!
//! Used when the host lacks the extension a vector kernel needs. Arithmetic
//! is identical to the intrinsics versions: `LANES` independent
//! accumulators, a horizontal reduction, then a scalar tail.

use crate::lane::Lane;

/// Sum `data` in `LANES` lane-wise accumulators.
pub fn sum_lanes<T: Lane, const LANES: usize>(data: &[T]) -> T {
    let mut acc = [T::ZERO; LANES];
    let chunks = data.chunks_exact(LANES);
    let tail = chunks.remainder();

    for chunk in chunks {
        for (a, &x) in acc.iter_mut().zip(chunk) {
            *a = a.wrapping_add(x);
        }
    }

    // Horizontal reduction
    let mut total = acc.iter().fold(T::ZERO, |s, &x| s.wrapping_add(x));

    for &x in tail {
        total = total.wrapping_add(x);
    }
    total
}
