use anyhow::Result;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::question::Question;

pub const FILE_ENV: &str = "QUESTIONSET_FILE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    pub questions: Vec<Question>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage {
    pub fn new() -> Self {
        Storage {
            questions: Vec::new(),
            updated_at: None,
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            // Create directory if it doesn't exist
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }
            debug!("No question file at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).await?;
        let storage: Storage = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid question file {}: {}", path.display(), e))?;
        debug!(
            "Loaded {} question(s) from {}",
            storage.questions.len(),
            path.display()
        );
        Ok(storage)
    }

    pub async fn save(&mut self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        self.updated_at = Some(Utc::now());
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        debug!(
            "Saved {} question(s) to {}",
            self.questions.len(),
            path.display()
        );
        Ok(())
    }

    /// `--file` wins, then `QUESTIONSET_FILE`, then `~/.questionset/questions.json`.
    pub fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path);
        }

        if let Ok(path) = std::env::var(FILE_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        let home = directories::UserDirs::new()
            .ok_or_else(|| anyhow::anyhow!("Failed to get home directory"))?
            .home_dir()
            .to_path_buf();

        Ok(home.join(".questionset").join("questions.json"))
    }
}
