use crate::domain::ports::KeySource;
use crate::error::{Result, TokenizeError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Private key stored as a PEM file named after the deployment.
///
/// The file lives at `<keys_dir>/private-<project_id>.pem`.
#[derive(Debug, Clone)]
pub struct PemKeyFile {
    path: PathBuf,
}

impl PemKeyFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locates the key for `project_id` under `keys_dir`.
    pub fn for_project(keys_dir: impl AsRef<Path>, project_id: &str) -> Self {
        Self::new(keys_dir.as_ref().join(format!("private-{}.pem", project_id)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl KeySource for PemKeyFile {
    async fn load_pem(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            TokenizeError::KeyUnavailable(format!("{}: {}", self.path.display(), e))
        })
    }
}
