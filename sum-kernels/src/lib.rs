//! Integer-array summation kernels: scalar, unrolled scalar and SIMD.
//!
//! All kernels compute the same modular sum. They differ only in how many
//! adds the CPU can retire per cycle, which is what `sum-bench` measures.
//!
//! ```
//! use sum_kernels::{Kernel, KernelKind};
//! use sum_primitives::CpuFeatures;
//!
//! let data: Vec<u32> = (0..5000).collect();
//! let kernel = Kernel::<u32>::select(KernelKind::Simd256, &CpuFeatures::detect());
//! assert_eq!(kernel.sum(&data), 12_497_500);
//! ```

use std::fmt;

use sum_primitives::CpuFeatures;

pub mod kind;
pub mod lane;
pub mod portable;
pub mod scalar;

#[cfg(target_arch = "x86_64")]
mod x86;

pub use kind::{Backend, KernelKind};
pub use lane::Lane;
pub use scalar::{reference_sum, triangular_sum};

/// Signature shared by every kernel.
pub type SumFn<T> = fn(&[T]) -> T;

#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error("{kernel} requires the {required} CPU extension")]
    UnsupportedHardware {
        kernel: &'static str,
        required: &'static str,
    },
    #[error("unknown kernel '{0}'. Available: scalar, unroll2, unroll4, simd128, simd256")]
    UnknownKernel(String),
}

/// A resolved kernel: what it computes and how it runs on this host.
#[derive(Clone, Copy)]
pub struct Kernel<T: Lane> {
    kind: KernelKind,
    backend: Backend,
    func: SumFn<T>,
}

impl<T: Lane> Kernel<T> {
    /// The kernel backed by hardware intrinsics (or the plain scalar loop).
    ///
    /// Fails when `features` lacks the extension a vector kind needs, or the
    /// running CPU does not actually have it.
    pub fn native(kind: KernelKind, features: &CpuFeatures) -> Result<Self, KernelError> {
        if let Some(func) = scalar_kernel::<T>(kind) {
            return Ok(Self {
                kind,
                backend: Backend::Scalar,
                func,
            });
        }

        let required = kind.required_feature().unwrap_or("simd");
        let unsupported = KernelError::UnsupportedHardware {
            kernel: kind.name(),
            required,
        };
        if !features.has(required) {
            return Err(unsupported);
        }
        let func = T::intrinsics_kernel(kind).ok_or(unsupported)?;
        Ok(Self {
            kind,
            backend: Backend::Intrinsics,
            func,
        })
    }

    /// The lane-array emulation of `kind`; scalar kinds are returned as-is.
    pub fn portable(kind: KernelKind) -> Self {
        let backend = if kind.is_vector() {
            Backend::Portable
        } else {
            Backend::Scalar
        };
        Self {
            kind,
            backend,
            func: T::portable_kernel(kind),
        }
    }

    /// Intrinsics when the CPU supports them, the portable kernel otherwise.
    pub fn select(kind: KernelKind, features: &CpuFeatures) -> Self {
        match Self::native(kind, features) {
            Ok(kernel) => kernel,
            Err(e) => {
                log::info!("{} ({}): {}, using portable kernel", kind, T::NAME, e);
                Self::portable(kind)
            }
        }
    }

    /// Sum `data` with modular arithmetic at the lane width.
    #[inline(always)]
    pub fn sum(&self, data: &[T]) -> T {
        (self.func)(data)
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Report title, e.g. "Simd256" or "Simd256 (portable)".
    pub fn label(&self) -> String {
        match self.backend {
            Backend::Portable => format!("{} (portable)", self.kind.name()),
            _ => self.kind.name().to_string(),
        }
    }
}

impl<T: Lane> fmt::Debug for Kernel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("kind", &self.kind)
            .field("backend", &self.backend)
            .field("lane", &T::NAME)
            .field("lanes", &self.kind.lanes::<T>())
            .finish()
    }
}

fn scalar_kernel<T: Lane>(kind: KernelKind) -> Option<SumFn<T>> {
    match kind {
        KernelKind::SingleScalar => Some(scalar::single_scalar::<T> as SumFn<T>),
        KernelKind::Unroll2Scalar => Some(scalar::unroll2_scalar::<T> as SumFn<T>),
        KernelKind::Unroll4Scalar => Some(scalar::unroll4_scalar::<T> as SumFn<T>),
        KernelKind::Simd128 | KernelKind::Simd256 => None,
    }
}

/// The fastest kind with an intrinsics implementation on this CPU.
///
/// Falls back to `Unroll4Scalar` when no vector extension is present.
pub fn best_available(features: &CpuFeatures) -> KernelKind {
    let best = [KernelKind::Simd256, KernelKind::Simd128]
        .into_iter()
        .find(|&kind| {
            Kernel::<u32>::native(kind, features).is_ok()
                && Kernel::<u64>::native(kind, features).is_ok()
        })
        .unwrap_or(KernelKind::Unroll4Scalar);
    log::info!("best available kernel: {}", best);
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_kinds_always_native() {
        for kind in [
            KernelKind::SingleScalar,
            KernelKind::Unroll2Scalar,
            KernelKind::Unroll4Scalar,
        ] {
            let k = Kernel::<u32>::native(kind, &CpuFeatures::none()).unwrap();
            assert_eq!(k.backend(), Backend::Scalar);
            assert_eq!(k.label(), kind.name());
        }
    }

    #[test]
    fn test_native_vector_requires_feature() {
        let err = Kernel::<u64>::native(KernelKind::Simd256, &CpuFeatures::none()).unwrap_err();
        match err {
            KernelError::UnsupportedHardware { kernel, required } => {
                assert_eq!(kernel, "Simd256");
                assert_eq!(required, "avx2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_select_falls_back_to_portable() {
        let k = Kernel::<u32>::select(KernelKind::Simd128, &CpuFeatures::none());
        assert_eq!(k.backend(), Backend::Portable);
        assert_eq!(k.label(), "Simd128 (portable)");
        let data: Vec<u32> = (0..4097).collect();
        assert_eq!(k.sum(&data), triangular_sum::<u32>(4097));
    }

    #[test]
    fn test_select_uses_intrinsics_when_detected() {
        let features = CpuFeatures::detect();
        let k = Kernel::<u32>::select(KernelKind::Simd256, &features);
        if features.avx2 {
            assert_eq!(k.backend(), Backend::Intrinsics);
        } else {
            assert_eq!(k.backend(), Backend::Portable);
        }
    }

    #[test]
    fn test_best_available_without_features() {
        assert_eq!(best_available(&CpuFeatures::none()), KernelKind::Unroll4Scalar);
    }

    #[test]
    fn test_best_available_matches_detected_features() {
        let features = CpuFeatures::detect();
        let best = best_available(&features);
        if features.avx2 {
            assert_eq!(best, KernelKind::Simd256);
        } else if features.ssse3 {
            assert_eq!(best, KernelKind::Simd128);
        } else {
            assert_eq!(best, KernelKind::Unroll4Scalar);
        }
    }

    #[test]
    fn test_every_kind_sums_5000_u32() {
        let data: Vec<u32> = (0..5000).collect();
        let features = CpuFeatures::detect();
        for kind in KernelKind::ALL {
            let k = Kernel::<u32>::select(kind, &features);
            assert_eq!(k.sum(&data), 12_497_500, "{}", k.label());
        }
    }

    #[test]
    fn test_debug_names_lane() {
        let k = Kernel::<u64>::portable(KernelKind::Simd128);
        let dbg = format!("{:?}", k);
        assert!(dbg.contains("Simd128") && dbg.contains("u64"), "{dbg}");
        assert!(dbg.contains("lanes: 2"), "{dbg}");
    }

    #[test]
    fn test_portable_backend_per_kind() {
        for kind in KernelKind::ALL {
            let k = Kernel::<u32>::portable(kind);
            let expected = if kind.is_vector() {
                Backend::Portable
            } else {
                Backend::Scalar
            };
            assert_eq!(k.backend(), expected, "{kind}");
            assert_eq!(k.sum(&[1, 2, 3, 4, 5]), 15, "{kind}");
        }
    }
}
