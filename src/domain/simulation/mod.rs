//! Stochastic models behind the synthetic metrics.
//!
//! Each generator owns its slice of state and takes the RNG by reference, so
//! callers decide where randomness comes from (seeded in tests, OS entropy in
//! production).

pub mod cpu;
pub mod memory;
pub mod profile;
pub mod traffic;

pub use cpu::CpuGenerator;
pub use memory::MemoryGenerator;
pub use profile::{
    CpuProfile, DiurnalBand, HourBand, MemoryProfile, SimulationProfile, TrafficProfile,
    UniformRange,
};
pub use traffic::{RequestTotals, TrafficGenerator};

/// Read-only view of the simulator's evolving state between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorState {
    pub cpu_base: f64,
    pub memory_base: f64,
    pub request_count: u64,
    pub error_count: u64,
}
