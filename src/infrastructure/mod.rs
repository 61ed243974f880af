pub mod clock;
pub mod core;
pub mod mock;
pub mod observability;
pub mod pushgateway;
pub mod stdout_sink;

pub use clock::{FixedClock, SystemClock};
pub use mock::InMemorySink;
pub use pushgateway::PushgatewaySink;
pub use stdout_sink::StdoutSink;
