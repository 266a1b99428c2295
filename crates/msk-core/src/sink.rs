use std::{
    io::Write,
    path::{Path, PathBuf},
};

use msk_model::StaticTargetRecord;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{error::SinkError, render::OutputFormat};

/// File consumed by Prometheus `file_sd_configs`.
///
/// Every write replaces the whole file atomically: a temp file in the same directory is
/// written, synced and renamed over the destination, so readers never see a partial document.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    format: OutputFormat,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Sink whose format follows the file extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = OutputFormat::from_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn write(&self, records: &[StaticTargetRecord]) -> Result<(), SinkError> {
        let body = self.format.render(records)?;
        self.replace(&body)?;
        debug!(path = %self.path.display(), bytes = body.len(), "sink file replaced");
        Ok(())
    }

    fn replace(&self, body: &[u8]) -> Result<(), SinkError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io(e))?;
        tmp.write_all(body).map_err(|e| self.io(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io(e))?;

        // Temp files are created 0600; the scraper usually runs as another user.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o644))
                .map_err(|e| self.io(e))?;
        }

        tmp.persist(&self.path).map_err(|e| self.io(e.error))?;
        Ok(())
    }

    fn io(&self, source: std::io::Error) -> SinkError {
        SinkError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
