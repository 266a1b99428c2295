use std::{fmt, str::FromStr};

use crate::logger::error::LoggerError;

/// Where and how log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggerFormat {
    /// Human readable lines on stdout.
    #[default]
    Text,
    /// One JSON object per line on stdout.
    Json,
    /// Native systemd journal fields.
    Journald,
}

impl LoggerFormat {
    /// Whether this build can emit the format.
    pub const fn is_supported(self) -> bool {
        match self {
            LoggerFormat::Journald => cfg!(all(target_os = "linux", feature = "journald")),
            LoggerFormat::Text | LoggerFormat::Json => true,
        }
    }
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = if s.trim().eq_ignore_ascii_case("text") {
            LoggerFormat::Text
        } else if s.trim().eq_ignore_ascii_case("json") {
            LoggerFormat::Json
        } else if s.trim().eq_ignore_ascii_case("journald") {
            LoggerFormat::Journald
        } else {
            return Err(LoggerError::InvalidFormat(s.to_string()));
        };

        if !format.is_supported() {
            return Err(LoggerError::JournaldNotSupported);
        }
        Ok(format)
    }
}

impl fmt::Display for LoggerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoggerFormat::Text => "text",
            LoggerFormat::Json => "json",
            LoggerFormat::Journald => "journald",
        })
    }
}
