use thiserror::Error;
use tracing_subscriber::{filter::ParseError, util::TryInitError};

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format {0:?} (expected text, json or journald)")]
    InvalidFormat(String),

    #[error("journald output needs linux and the `journald` feature")]
    JournaldNotSupported,

    #[error("journald socket unavailable: {0}")]
    Journald(#[source] std::io::Error),

    #[error("invalid log level {level:?}: {source}")]
    InvalidLevel {
        level: String,
        #[source]
        source: ParseError,
    },

    #[error("a global subscriber is already installed")]
    AlreadyInstalled(#[source] TryInitError),
}
