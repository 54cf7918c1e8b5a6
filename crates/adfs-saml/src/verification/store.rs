//! Audit storage for raw SAML responses.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::SamlResult;
use crate::types::SamlResponse;

/// Persists decoded responses so that failed sign-ins can be debugged.
#[async_trait::async_trait]
pub trait ResponseStore: Send + Sync {
    /// Stores the response and returns where it was written.
    async fn store(&self, response: &SamlResponse) -> SamlResult<PathBuf>;
}

/// Writes each response to `<directory>/<YYYY-mm-dd HH-MM-SS>-<user>.log`.
#[derive(Debug, Clone)]
pub struct FileResponseStore {
    directory: PathBuf,
}

impl FileResponseStore {
    /// Creates a store writing into `directory`, created on first use.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Returns the target directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the file name used for a response received at `at`.
    #[must_use]
    pub fn file_name(response: &SamlResponse, at: DateTime<Local>) -> String {
        let user: String = response
            .username_local_part()
            .chars()
            .map(|c| if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
            .collect();
        format!("{}-{}.log", at.format("%Y-%m-%d %H-%M-%S"), user)
    }
}

#[async_trait::async_trait]
impl ResponseStore for FileResponseStore {
    async fn store(&self, response: &SamlResponse) -> SamlResult<PathBuf> {
        tokio::fs::create_dir_all(&self.directory).await?;

        let path = self
            .directory
            .join(Self::file_name(response, Local::now()));
        tokio::fs::write(&path, response.xml_string()).await?;

        tracing::debug!(path = %path.display(), "stored SAML response");
        Ok(path)
    }
}
