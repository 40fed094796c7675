pub mod hardware;
pub mod timing;

pub use hardware::{CpuFeatures, HardwareInfo};
pub use timing::BenchTimer;
pub use timing::{select_counter, CounterChoice, CycleCounter, MonotonicCounter, TimingError};

#[cfg(target_arch = "x86_64")]
pub use timing::Tsc;
