use std::{path::Path, str::FromStr};

use msk_model::StaticTargetRecord;

use crate::error::SinkError;

/// Document format of the file sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// `.json` selects JSON; anything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Yaml,
        }
    }

    pub fn render(&self, records: &[StaticTargetRecord]) -> Result<Vec<u8>, SinkError> {
        match self {
            OutputFormat::Yaml => Ok(serde_yaml::to_string(records)?.into_bytes()),
            OutputFormat::Json => {
                let mut body = serde_json::to_vec_pretty(records)?;
                body.push(b'\n');
                Ok(body)
            }
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("invalid output format: {s} (expected: yaml|json)")),
        }
    }
}
