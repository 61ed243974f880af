// Synthetic metric model driver
pub mod simulator;

// Scheduling and shutdown
pub mod system;
