pub mod aggregate;
pub mod baseline;
pub mod bootstrap;
pub mod diagnostics;
pub mod failures;
pub mod gate;
pub mod latency;
pub mod metrics;
pub mod stats;
