//! Record template table read from disk.

use std::path::PathBuf;

use async_trait::async_trait;
use dns_onboarder_core::{CoreError, CoreResult, RecordTable, RecordTemplateSource};
use tokio::fs;

use super::file_io::storage_error;

/// Reads the table on every call, so edits apply to the next provisioning
/// without a restart.
pub struct FileRecordTemplateSource {
    path: PathBuf,
}

impl FileRecordTemplateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordTemplateSource for FileRecordTemplateSource {
    async fn load(&self) -> CoreResult<RecordTable> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| storage_error(&self.path, &e))?;

        RecordTable::parse(&content).map_err(|e| match e {
            CoreError::RecordTableError(msg) => {
                CoreError::RecordTableError(format!("{}: {msg}", self.path.display()))
            }
            other => other,
        })
    }
}
