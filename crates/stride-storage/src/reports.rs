use std::path::{Path, PathBuf};
use std::time::SystemTime;

use stride_core::artifact_names::{is_valid_report_filename, REPORT_EXTENSION};
use stride_core::models::artifact::ReportInfo;

use crate::error::StorageError;

/// Directory of generated report files.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    /// Open the store, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        let key = root.display().to_string();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| StorageError::write(key, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a report file. Validates the name.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_report_filename(filename) {
            return Err(StorageError::InvalidKey {
                key: filename.to_string(),
            });
        }
        Ok(self.root.join(filename))
    }

    /// Write a report. The file appears atomically under its final name.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<ReportInfo, StorageError> {
        let path = self.path_for(filename)?;
        let tmp_path = self.root.join(format!(".{filename}.tmp"));

        tokio::fs::write(&tmp_path, bytes)
            .await
            .map_err(|e| StorageError::write(filename.to_string(), e))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| StorageError::write(filename.to_string(), e))?;

        tracing::info!(path = %path.display(), size = bytes.len(), "report saved");
        self.info(filename).await
    }

    pub async fn info(&self, filename: &str) -> Result<ReportInfo, StorageError> {
        let path = self.path_for(filename)?;
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| StorageError::io(filename, e, StorageError::read))?;
        if !metadata.is_file() {
            return Err(StorageError::NotFound {
                key: filename.to_string(),
            });
        }
        Ok(report_info(filename, &metadata))
    }

    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(filename)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| StorageError::io(filename, e, StorageError::read))
    }

    /// All reports, newest first.
    pub async fn list(&self) -> Result<Vec<ReportInfo>, StorageError> {
        let key = self.root.display().to_string();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::list(key, e)),
        };

        let mut reports = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::list(key.clone(), e))?
        {
            let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !filename.ends_with(REPORT_EXTENSION) {
                continue;
            }
            // Entries can disappear between listing and stat.
            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            if metadata.is_file() {
                reports.push(report_info(&filename, &metadata));
            }
        }

        reports.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.filename.cmp(&b.filename))
        });
        Ok(reports)
    }

    pub async fn delete(&self, filename: &str) -> Result<(), StorageError> {
        let path = self.path_for(filename)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| StorageError::io(filename, e, StorageError::delete))?;
        tracing::info!(path = %path.display(), "report deleted");
        Ok(())
    }
}

fn report_info(filename: &str, metadata: &std::fs::Metadata) -> ReportInfo {
    let modified_at = to_timestamp(metadata.modified().ok());
    let created_at = metadata
        .created()
        .ok()
        .map(|t| to_timestamp(Some(t)))
        .unwrap_or(modified_at);

    ReportInfo {
        filename: filename.to_string(),
        size: metadata.len(),
        created_at,
        modified_at,
    }
}

fn to_timestamp(time: Option<SystemTime>) -> jiff::Timestamp {
    time.and_then(|t| jiff::Timestamp::try_from(t).ok())
        .unwrap_or(jiff::Timestamp::UNIX_EPOCH)
}
