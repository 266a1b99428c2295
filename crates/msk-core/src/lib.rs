pub mod error;
pub use error::{CycleError, SinkError};

pub mod metrics;
pub use metrics::{CycleOutcome, MetricsBackend, Mode, NoopMetrics};

mod cycle;
pub use cycle::{discover_with_timeout, observe_cycle};

mod render;
pub use render::OutputFormat;

mod sink;
pub use sink::FileSink;

mod scheduler;
pub use scheduler::{PushScheduler, RefreshState};

#[cfg(test)]
pub(crate) mod testing;
