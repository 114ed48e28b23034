use crate::errors::AppError;
use crate::models::{ACCOUNT_VERSION, AppData};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::info;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not a valid budget document, fix or move it before starting: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Loads the document. A missing file is an empty store; an unreadable one is
/// an error and the file is left untouched.
pub async fn load_data(path: &Path) -> Result<AppData, StorageError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(AppData::default()),
        Err(source) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut data: AppData = serde_json::from_slice(&bytes).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    for account in data.accounts.values_mut() {
        account.version = ACCOUNT_VERSION;
    }
    info!(accounts = data.accounts.len(), "loaded {}", path.display());
    Ok(data)
}

/// Writes the whole document to a sibling temp file, then renames it over
/// the old one.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, payload).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
