use thiserror::Error;

/// Errors raised while handing a snapshot to a metrics sink.
///
/// None of these are fatal to the generator: the loop logs them, counts them
/// and moves on to the next tick with its state untouched.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Collector rejected metrics with HTTP {status}")]
    Rejected { status: u16 },

    #[error("Transport failure: {reason}")]
    Transport { reason: String },

    #[error("Failed to write metrics: {reason}")]
    Io { reason: String },
}

impl PublishError {
    /// Short label used for the `reason` dimension of the failure counter.
    pub fn reason_label(&self) -> &'static str {
        match self {
            PublishError::Rejected { .. } => "status",
            PublishError::Transport { .. } => "transport",
            PublishError::Io { .. } => "io",
        }
    }
}

/// Errors related to invalid generator parameters
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("{field} must be a probability in [0, 1], got {value}")]
    InvalidProbability { field: &'static str, value: f64 },

    #[error("{field} range is inverted: {lo} > {hi}")]
    InvertedRange {
        field: &'static str,
        lo: f64,
        hi: f64,
    },

    #[error("{field} = {value} lies outside its bounds [{lo}, {hi}]")]
    OutOfBounds {
        field: &'static str,
        value: f64,
        lo: f64,
        hi: f64,
    },

    #[error("Poisson mean for {band} hours must be positive and finite, got {lambda}")]
    InvalidRequestRate { band: &'static str, lambda: f64 },

    #[error("Hour band {field} must stay within 0..=23, got {start}..={end}")]
    InvalidHourBand {
        field: &'static str,
        start: u32,
        end: u32,
    },
}
