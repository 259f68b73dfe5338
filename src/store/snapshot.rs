//! Snapshot backends for the saloon store.
//!
//! A snapshot is the complete saloon sequence. Every persist replaces it wholesale.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::errors::AppError;
use crate::models::Saloon;

/// Layout written by the original Node service, still accepted on load.
const LEGACY_PREFIX: &str = "const saloons = ";
const LEGACY_SUFFIX: &str = "module.exports = saloons;";

/// Durable storage for the full saloon sequence.
#[async_trait]
pub trait SnapshotBackend: Send + Sync {
    /// Read the stored sequence, creating an empty snapshot if none exists yet.
    async fn load(&self) -> Result<Vec<Saloon>, AppError>;

    /// Replace the stored sequence with `saloons`.
    async fn persist(&self, saloons: &[Saloon]) -> Result<(), AppError>;
}

/// Pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshot {
    path: PathBuf,
}

impl JsonFileSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the new snapshot is written to before being renamed into place.
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()))
    }
}

#[async_trait]
impl SnapshotBackend for JsonFileSnapshot {
    async fn load(&self) -> Result<Vec<Saloon>, AppError> {
        match fs::read_to_string(&self.path).await {
            Ok(text) => parse_snapshot(&text).map_err(|e| {
                AppError::Snapshot(format!("{} is not a saloon list: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No snapshot at {:?}, creating an empty one", self.path);
                if let Some(parent) = self.path.parent() {
                    fs::create_dir_all(parent).await.ok();
                }
                self.persist(&[]).await?;
                Ok(Vec::new())
            }
            Err(e) => Err(AppError::Snapshot(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn persist(&self, saloons: &[Saloon]) -> Result<(), AppError> {
        let data = serde_json::to_vec_pretty(saloons)?;
        let temp_path = self.temp_path();

        fs::write(&temp_path, data).await?;
        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            fs::remove_file(&temp_path).await.ok();
            return Err(e.into());
        }

        tracing::debug!("Snapshot written with {} saloons", saloons.len());
        Ok(())
    }
}

/// Parse a snapshot as either a bare JSON array or the legacy module wrapper.
fn parse_snapshot(text: &str) -> Result<Vec<Saloon>, serde_json::Error> {
    let trimmed = text.trim();
    let body = match trimmed.strip_prefix(LEGACY_PREFIX) {
        Some(rest) => rest
            .strip_suffix(LEGACY_SUFFIX)
            .unwrap_or(rest)
            .trim_end()
            .trim_end_matches(';'),
        None => trimmed,
    };
    serde_json::from_str(body)
}
