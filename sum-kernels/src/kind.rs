use std::fmt;

use crate::lane::Lane;
use crate::KernelError;

/// The five summation strategies, in the order they are benchmarked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    SingleScalar,
    Unroll2Scalar,
    Unroll4Scalar,
    Simd128,
    Simd256,
}

impl KernelKind {
    /// Every kind in benchmark order: scalar, unroll-2, unroll-4, 128-bit, 256-bit.
    pub const ALL: [KernelKind; 5] = [
        KernelKind::SingleScalar,
        KernelKind::Unroll2Scalar,
        KernelKind::Unroll4Scalar,
        KernelKind::Simd128,
        KernelKind::Simd256,
    ];

    /// Display name used as the report title.
    pub fn name(self) -> &'static str {
        match self {
            KernelKind::SingleScalar => "SingleScalar",
            KernelKind::Unroll2Scalar => "Unroll2Scalar",
            KernelKind::Unroll4Scalar => "Unroll4Scalar",
            KernelKind::Simd128 => "Simd128",
            KernelKind::Simd256 => "Simd256",
        }
    }

    /// Short name used for CLI selection (e.g., "simd256").
    pub fn slug(self) -> &'static str {
        match self {
            KernelKind::SingleScalar => "scalar",
            KernelKind::Unroll2Scalar => "unroll2",
            KernelKind::Unroll4Scalar => "unroll4",
            KernelKind::Simd128 => "simd128",
            KernelKind::Simd256 => "simd256",
        }
    }

    /// Parse a slug or display name, case-insensitively.
    pub fn from_slug(s: &str) -> Result<Self, KernelError> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.slug().eq_ignore_ascii_case(s) || k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| KernelError::UnknownKernel(s.to_string()))
    }

    /// CPU extension the intrinsics version needs, if any.
    pub fn required_feature(self) -> Option<&'static str> {
        match self {
            KernelKind::Simd128 => Some("ssse3"),
            KernelKind::Simd256 => Some("avx2"),
            _ => None,
        }
    }

    /// Vector register width in bits, or `None` for scalar kinds.
    pub fn register_bits(self) -> Option<u32> {
        match self {
            KernelKind::Simd128 => Some(128),
            KernelKind::Simd256 => Some(256),
            _ => None,
        }
    }

    /// Parallel lanes for element type `T`: 1 for scalar kinds.
    pub fn lanes<T: Lane>(self) -> usize {
        self.register_bits()
            .map(|bits| (bits / T::BITS) as usize)
            .unwrap_or(1)
    }

    /// Whether the kind sums in a vector register rather than one accumulator.
    pub fn is_vector(self) -> bool {
        self.register_bits().is_some()
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a kernel is executed on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Plain scalar loop.
    Scalar,
    /// SSSE3 / AVX2 intrinsics.
    Intrinsics,
    /// Lane-array emulation of a vector kernel.
    Portable,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::Intrinsics => "intrinsics",
            Backend::Portable => "portable",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
