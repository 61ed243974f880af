//! Prometheus text exposition (format 0.0.4) for snapshots.
//!
//! Only the bare `<name> <value>` sample lines are emitted: no labels,
//! no `# HELP` or `# TYPE` headers.

use crate::domain::metrics::MetricSnapshot;
use std::fmt::Write;

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

pub fn encode_snapshot(snapshot: &MetricSnapshot) -> String {
    let mut body = String::with_capacity(128);
    for (name, value) in snapshot.samples() {
        // Writing into a String cannot fail
        let _ = writeln!(body, "{} {}", name, value);
    }
    body
}
