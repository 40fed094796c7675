//! Scalar summation kernels: one accumulator, one add per element.
//!
//! The accumulator passes through `pessimize::hide` after every add, which
//! keeps LLVM from turning these loops into vector code. They measure the
//! scalar add chain and nothing else.

use pessimize::hide;

use crate::lane::Lane;

/// Sequential accumulate, one element per loop step.
pub fn single_scalar<T: Lane>(data: &[T]) -> T {
    let mut total = T::ZERO;
    for &x in data {
        total = hide(total.wrapping_add(x));
    }
    total
}

/// Two elements per loop step into the same accumulator.
///
/// Lengths that are not a multiple of 2 finish with a scalar tail.
pub fn unroll2_scalar<T: Lane>(data: &[T]) -> T {
    let mut total = T::ZERO;
    let pairs = data.chunks_exact(2);
    let tail = pairs.remainder();
    for pair in pairs {
        total = hide(total.wrapping_add(pair[0]));
        total = hide(total.wrapping_add(pair[1]));
    }
    for &x in tail {
        total = hide(total.wrapping_add(x));
    }
    total
}

/// Four elements per loop step into the same accumulator.
///
/// Lengths that are not a multiple of 4 finish with a scalar tail.
pub fn unroll4_scalar<T: Lane>(data: &[T]) -> T {
    let mut total = T::ZERO;
    let quads = data.chunks_exact(4);
    let tail = quads.remainder();
    for quad in quads {
        total = hide(total.wrapping_add(quad[0]));
        total = hide(total.wrapping_add(quad[1]));
        total = hide(total.wrapping_add(quad[2]));
        total = hide(total.wrapping_add(quad[3]));
    }
    for &x in tail {
        total = hide(total.wrapping_add(x));
    }
    total
}

/// Plain iterator fold, used to validate the other kernels.
pub fn reference_sum<T: Lane>(data: &[T]) -> T {
    data.iter().fold(T::ZERO, |acc, &x| acc.wrapping_add(x))
}

/// Sum of `0..n` reduced modulo 2^W: `n * (n - 1) / 2`.
pub fn triangular_sum<T: Lane>(n: usize) -> T {
    let n = n as u128;
    T::from_u128(n * n.saturating_sub(1) / 2)
}
