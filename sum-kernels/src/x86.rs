//! x86_64 vector kernels with SSSE3 (128-bit) and AVX2 (256-bit) intrinsics.
//!
//! The `#[target_feature]` functions are only reachable through
//! [`intrinsics_u32`] / [`intrinsics_u64`], which check the running CPU first.
#![allow(unsafe_op_in_unsafe_fn)]

use std::arch::x86_64::*;

use crate::kind::KernelKind;
use crate::SumFn;

/// Intrinsics kernel for u32 lanes, if this CPU supports `kind`.
pub fn intrinsics_u32(kind: KernelKind) -> Option<SumFn<u32>> {
    match kind {
        KernelKind::Simd128 if is_x86_feature_detected!("ssse3") => Some(simd128_u32 as SumFn<u32>),
        KernelKind::Simd256 if is_x86_feature_detected!("avx2") => Some(simd256_u32 as SumFn<u32>),
        _ => None,
    }
}

/// Intrinsics kernel for u64 lanes, if this CPU supports `kind`.
pub fn intrinsics_u64(kind: KernelKind) -> Option<SumFn<u64>> {
    match kind {
        KernelKind::Simd128 if is_x86_feature_detected!("ssse3") => Some(simd128_u64 as SumFn<u64>),
        KernelKind::Simd256 if is_x86_feature_detected!("avx2") => Some(simd256_u64 as SumFn<u64>),
        _ => None,
    }
}

// Safe entry points. Only handed out after the feature check above.

fn simd128_u32(data: &[u32]) -> u32 {
    // Safety: intrinsics_u32 checked SSSE3 is available
    unsafe { sum_ssse3_u32(data) }
}

fn simd256_u32(data: &[u32]) -> u32 {
    // Safety: intrinsics_u32 checked AVX2 is available
    unsafe { sum_avx2_u32(data) }
}

fn simd128_u64(data: &[u64]) -> u64 {
    // Safety: intrinsics_u64 checked SSSE3 is available
    unsafe { sum_ssse3_u64(data) }
}

fn simd256_u64(data: &[u64]) -> u64 {
    // Safety: intrinsics_u64 checked AVX2 is available
    unsafe { sum_avx2_u64(data) }
}

/// 4 x u32 lanes, horizontal reduce with two `phaddd`.
#[target_feature(enable = "ssse3")]
unsafe fn sum_ssse3_u32(data: &[u32]) -> u32 {
    let chunks = data.chunks_exact(4);
    let tail = chunks.remainder();

    let mut acc = _mm_setzero_si128();
    for chunk in chunks {
        let v = _mm_loadu_si128(chunk.as_ptr() as *const __m128i);
        acc = _mm_add_epi32(acc, v);
    }

    acc = _mm_hadd_epi32(acc, acc);
    acc = _mm_hadd_epi32(acc, acc);
    let mut total = _mm_cvtsi128_si32(acc) as u32;

    for &x in tail {
        total = total.wrapping_add(x);
    }
    total
}

/// 8 x u32 lanes, folded to 128 bits and then reduced like the SSSE3 path.
#[target_feature(enable = "avx2")]
unsafe fn sum_avx2_u32(data: &[u32]) -> u32 {
    let chunks = data.chunks_exact(8);
    let tail = chunks.remainder();

    let mut acc = _mm256_setzero_si256();
    for chunk in chunks {
        let v = _mm256_loadu_si256(chunk.as_ptr() as *const __m256i);
        acc = _mm256_add_epi32(acc, v);
    }

    let lo = _mm256_castsi256_si128(acc);
    let hi = _mm256_extracti128_si256::<1>(acc);
    let mut sum128 = _mm_add_epi32(lo, hi);
    sum128 = _mm_hadd_epi32(sum128, sum128);
    sum128 = _mm_hadd_epi32(sum128, sum128);
    let mut total = _mm_cvtsi128_si32(sum128) as u32;

    for &x in tail {
        total = total.wrapping_add(x);
    }
    total
}

/// 2 x u64 lanes; there is no 64-bit hadd, so swap halves and add.
#[target_feature(enable = "ssse3")]
unsafe fn sum_ssse3_u64(data: &[u64]) -> u64 {
    let chunks = data.chunks_exact(2);
    let tail = chunks.remainder();

    let mut acc = _mm_setzero_si128();
    for chunk in chunks {
        let v = _mm_loadu_si128(chunk.as_ptr() as *const __m128i);
        acc = _mm_add_epi64(acc, v);
    }

    let mut total = hsum_epi64(acc);
    for &x in tail {
        total = total.wrapping_add(x);
    }
    total
}

/// 4 x u64 lanes.
#[target_feature(enable = "avx2")]
unsafe fn sum_avx2_u64(data: &[u64]) -> u64 {
    let chunks = data.chunks_exact(4);
    let tail = chunks.remainder();

    let mut acc = _mm256_setzero_si256();
    for chunk in chunks {
        let v = _mm256_loadu_si256(chunk.as_ptr() as *const __m256i);
        acc = _mm256_add_epi64(acc, v);
    }

    let lo = _mm256_castsi256_si128(acc);
    let hi = _mm256_extracti128_si256::<1>(acc);
    let mut total = hsum_epi64(_mm_add_epi64(lo, hi));

    for &x in tail {
        total = total.wrapping_add(x);
    }
    total
}

#[inline(always)]
unsafe fn hsum_epi64(v: __m128i) -> u64 {
    let hi = _mm_unpackhi_epi64(v, v);
    _mm_cvtsi128_si64(_mm_add_epi64(v, hi)) as u64
}
