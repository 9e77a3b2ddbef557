/// Exports file management
///
/// Reads `/etc/exports` (or the configured override) and removes individual
/// export rules. The file is never rewritten wholesale: removal is a single
/// in-place `sed` line-delete followed by an `exportfs -ra` reload.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::core::runner::{CommandRequest, CommandRunner, RunnerError};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0}")]
    Validation(String),

    #[error("failed to read exports file: {0}")]
    Read(RunnerError),

    #[error("failed to edit exports file: {0}")]
    Edit(RunnerError),

    #[error("failed to reload exports: {0}")]
    Reload(RunnerError),
}

#[derive(Clone)]
pub struct ExportManager {
    runner: Arc<dyn CommandRunner>,
    exports_file: String,
}

impl ExportManager {
    pub fn new(runner: Arc<dyn CommandRunner>, exports_file: impl Into<String>) -> Self {
        Self {
            runner,
            exports_file: exports_file.into(),
        }
    }

    pub fn exports_file(&self) -> &str {
        &self.exports_file
    }

    /// Current contents of the exports file.
    pub fn read(&self) -> Result<String, ExportError> {
        let request = CommandRequest::new("cat").arg(&self.exports_file);
        self.runner.run_elevated(&request).map_err(ExportError::Read)
    }

    /// Deletes the export rule for `path` and reloads the NFS export table.
    /// Validation happens before any external command is constructed.
    pub fn remove(&self, path: &str) -> Result<(), ExportError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(ExportError::Validation("No export path provided.".to_string()));
        }
        if !path.starts_with('/') {
            return Err(ExportError::Validation("Path must start with '/'.".to_string()));
        }

        let pattern = sed_delete_pattern(path);
        debug!(%path, %pattern, "removing export entry");

        let edit = CommandRequest::new("sed")
            .arg("-i")
            .arg(&pattern)
            .arg(&self.exports_file);
        self.runner.run_elevated(&edit).map_err(ExportError::Edit)?;

        let reload = CommandRequest::new("exportfs").arg("-ra");
        self.runner.run_elevated(&reload).map_err(ExportError::Reload)?;

        Ok(())
    }
}

/// Builds the sed script deleting lines that start with `path` followed by a
/// single space. Entries whose path is followed by a tab or multiple spaces
/// are not matched and survive the edit.
fn sed_delete_pattern(path: &str) -> String {
    let escaped = path.replace('/', "\\/");
    format!("\\|^{escaped} |d")
}
