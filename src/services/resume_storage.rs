use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use crate::error::{Error, Result};

/// Blob store for uploaded resumes. Returns an opaque reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResumeStorage: Send + Sync {
    async fn store(&self, account_id: i64, extension: &str, data: Bytes) -> Result<String>;
}

/// Writes resumes under `<root>/resumes`; references are relative to `root`.
#[derive(Clone)]
pub struct LocalResumeStorage {
    root: PathBuf,
}

impl LocalResumeStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResumeStorage for LocalResumeStorage {
    async fn store(&self, account_id: i64, extension: &str, data: Bytes) -> Result<String> {
        let dir = self.root.join("resumes");
        fs::create_dir_all(&dir).await?;

        let file_name = format!("{}_{}.{}", account_id, uuid::Uuid::new_v4(), extension);
        let path = dir.join(&file_name);
        fs::write(&path, &data).await.map_err(|e| {
            tracing::error!("Failed to write resume file: {}", e);
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

        Ok(format!("resumes/{}", file_name))
    }
}

/// Accepts only non-empty PDF uploads within `max_bytes`; returns the extension.
pub fn check_resume_upload(filename: &str, data: &[u8], max_bytes: usize) -> Result<&'static str> {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if ext != "pdf" {
        return Err(Error::BadRequest("Please upload only pdf file".into()));
    }
    if data.is_empty() {
        return Err(Error::BadRequest("Please upload your resume".into()));
    }
    if data.len() > max_bytes {
        return Err(Error::BadRequest(format!(
            "Resume is larger than {} bytes",
            max_bytes
        )));
    }
    if !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }
    Ok("pdf")
}
