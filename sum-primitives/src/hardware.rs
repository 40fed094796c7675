//! CPU detection: brand string and the vector extensions the kernels need.
//!
//! Detection happens at runtime so a single binary picks the widest kernel
//! the host supports.

use serde::Serialize;

/// Instruction-set extensions relevant to the summation kernels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CpuFeatures {
    pub sse2: bool,
    pub ssse3: bool,
    pub avx2: bool,
}

impl CpuFeatures {
    /// Query the running CPU.
    #[cfg(target_arch = "x86_64")]
    pub fn detect() -> Self {
        Self {
            sse2: is_x86_feature_detected!("sse2"),
            ssse3: is_x86_feature_detected!("ssse3"),
            avx2: is_x86_feature_detected!("avx2"),
        }
    }

    /// Query the running CPU. No x86 extensions exist off x86_64.
    #[cfg(not(target_arch = "x86_64"))]
    pub fn detect() -> Self {
        Self::none()
    }

    /// A feature set with every extension disabled.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the named extension ("sse2", "ssse3", "avx2") is present.
    pub fn has(&self, name: &str) -> bool {
        match name {
            "sse2" => self.sse2,
            "ssse3" => self.ssse3,
            "avx2" => self.avx2,
            _ => false,
        }
    }

    /// Names of the detected extensions, narrowest first.
    pub fn names(&self) -> Vec<&'static str> {
        [("sse2", self.sse2), ("ssse3", self.ssse3), ("avx2", self.avx2)]
            .into_iter()
            .filter_map(|(name, on)| on.then_some(name))
            .collect()
    }
}

/// Hardware information for the current host.
#[derive(Debug, Clone, Serialize)]
pub struct HardwareInfo {
    /// CPU brand (e.g., "AMD Ryzen 9 7950X 16-Core Processor").
    pub cpu_name: String,
    pub features: CpuFeatures,
    /// Logical CPUs visible to this process.
    pub logical_cores: usize,
}

impl HardwareInfo {
    pub fn detect() -> Self {
        let cpu_name = cpu_brand().unwrap_or_else(|| "unknown".to_string());
        let features = CpuFeatures::detect();
        let logical_cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        log::info!(
            "detected {} ({} logical cores, features: {:?})",
            cpu_name,
            logical_cores,
            features.names()
        );

        Self {
            cpu_name,
            features,
            logical_cores,
        }
    }
}

/// Read the processor brand string from CPUID leaves 0x8000_0002..=0x8000_0004.
#[cfg(target_arch = "x86_64")]
#[allow(unused_unsafe)]
fn cpu_brand() -> Option<String> {
    use std::arch::x86_64::__cpuid;

    // SAFETY: cpuid is available on every x86_64 CPU.
    let max_ext = unsafe { __cpuid(0x8000_0000) }.eax;
    if max_ext < 0x8000_0004 {
        return None;
    }

    let mut bytes = Vec::with_capacity(48);
    for leaf in 0x8000_0002u32..=0x8000_0004 {
        let r = unsafe { __cpuid(leaf) };
        for reg in [r.eax, r.ebx, r.ecx, r.edx] {
            bytes.extend_from_slice(&reg.to_le_bytes());
        }
    }
    parse_brand(&bytes)
}

#[cfg(not(target_arch = "x86_64"))]
fn cpu_brand() -> Option<String> {
    None
}

/// Trim the NUL padding and surrounding spaces of a raw brand string.
#[cfg_attr(not(target_arch = "x86_64"), allow(dead_code))]
fn parse_brand(raw: &[u8]) -> Option<String> {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let brand = String::from_utf8_lossy(&raw[..end]).trim().to_string();
    if brand.is_empty() {
        None
    } else {
        Some(brand)
    }
}
