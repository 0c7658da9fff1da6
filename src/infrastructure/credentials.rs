//! On-disk persistence of the pricing-service API key.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(default)]
    api_key: String,
}

/// File-backed credential store under the user configuration directory.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store at the platform configuration directory.
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .context("failed to get user config directory")?
            .join("bestprice");
        Ok(Self {
            path: config_dir.join("credentials.json"),
        })
    }

    /// Store at an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The persisted API key, or the empty string when nothing is stored.
    pub async fn load_api_key(&self) -> Result<String> {
        if !self.path.exists() {
            return Ok(String::new());
        }
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read credentials from {:?}", self.path))?;
        let stored: StoredCredentials = serde_json::from_str(&content)
            .with_context(|| format!("credentials file {:?} is not valid JSON", self.path))?;
        Ok(stored.api_key)
    }

    /// Persist the API key, creating the directory on first run.
    pub async fn save_api_key(&self, key: &str) -> Result<bool> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .await
                    .with_context(|| format!("failed to create config directory {dir:?}"))?;
            }
        }
        let stored = StoredCredentials {
            api_key: key.to_string(),
        };
        let content =
            serde_json::to_string_pretty(&stored).context("failed to serialize credentials")?;
        fs::write(&self.path, content)
            .await
            .with_context(|| format!("failed to write credentials to {:?}", self.path))?;
        info!("persisted API credential");
        Ok(true)
    }
}
