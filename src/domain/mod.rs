pub mod errors;
pub mod metrics;
pub mod ports;
pub mod simulation;
