use std::fmt;

use crate::kind::KernelKind;
use crate::portable::sum_lanes;
use crate::scalar;
use crate::SumFn;

mod private {
    pub trait Sealed {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// Unsigned integer element type the kernels can sum.
///
/// Sealed: only u32 and u64 are valid. All arithmetic is modular at the
/// lane's width, so every kernel produces the same wrapped result.
pub trait Lane:
    private::Sealed
    + Copy
    + Default
    + PartialEq
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + pessimize::Pessimize
    + 'static
{
    /// Width of the lane in bits (32 or 64).
    const BITS: u32;
    /// Short type name for reports ("u32", "u64").
    const NAME: &'static str;
    const ZERO: Self;

    fn wrapping_add(self, rhs: Self) -> Self;

    /// Truncating conversion used to fill buffers with `0..n`.
    fn from_index(i: usize) -> Self;

    /// Truncating conversion from a 128-bit intermediate.
    fn from_u128(v: u128) -> Self;

    fn to_u64(self) -> u64;

    /// Intrinsics kernel for `kind`, if the running CPU supports it.
    ///
    /// Returns `None` for scalar kinds and on CPUs lacking the extension.
    fn intrinsics_kernel(kind: KernelKind) -> Option<SumFn<Self>>;

    /// Kernel for `kind` that runs on any target.
    ///
    /// Vector kinds get the lane-array emulation; scalar kinds are already portable.
    fn portable_kernel(kind: KernelKind) -> SumFn<Self>;
}

macro_rules! impl_lane {
    ($ty:ty, $bits:expr, $lanes128:expr, $lanes256:expr, $native:path) => {
        impl Lane for $ty {
            const BITS: u32 = $bits;
            const NAME: &'static str = stringify!($ty);
            const ZERO: Self = 0;

            #[inline(always)]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$ty>::wrapping_add(self, rhs)
            }

            #[inline(always)]
            fn from_index(i: usize) -> Self {
                i as $ty
            }

            #[inline(always)]
            fn from_u128(v: u128) -> Self {
                v as $ty
            }

            #[inline(always)]
            fn to_u64(self) -> u64 {
                self as u64
            }

            fn intrinsics_kernel(kind: KernelKind) -> Option<SumFn<Self>> {
                $native(kind)
            }

            fn portable_kernel(kind: KernelKind) -> SumFn<Self> {
                match kind {
                    KernelKind::SingleScalar => scalar::single_scalar::<$ty> as SumFn<Self>,
                    KernelKind::Unroll2Scalar => scalar::unroll2_scalar::<$ty> as SumFn<Self>,
                    KernelKind::Unroll4Scalar => scalar::unroll4_scalar::<$ty> as SumFn<Self>,
                    KernelKind::Simd128 => sum_lanes::<$ty, $lanes128> as SumFn<Self>,
                    KernelKind::Simd256 => sum_lanes::<$ty, $lanes256> as SumFn<Self>,
                }
            }
        }

        // Lane counts must fill the 128-bit and 256-bit registers exactly.
        const _: () = assert!($lanes128 * $bits == 128 && $lanes256 * $bits == 256);
    };
}

#[cfg(target_arch = "x86_64")]
mod native {
    pub use crate::x86::{intrinsics_u32 as u32_kernel, intrinsics_u64 as u64_kernel};
}

#[cfg(not(target_arch = "x86_64"))]
mod native {
    use crate::kind::KernelKind;
    use crate::SumFn;

    pub fn u32_kernel(_kind: KernelKind) -> Option<SumFn<u32>> {
        None
    }

    pub fn u64_kernel(_kind: KernelKind) -> Option<SumFn<u64>> {
        None
    }
}

impl_lane!(u32, 32, 4, 8, native::u32_kernel);
impl_lane!(u64, 64, 2, 4, native::u64_kernel);
