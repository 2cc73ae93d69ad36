//! Path resolution for watchworthy files

use std::path::PathBuf;

/// Resolves standard paths under the watchworthy home directory
#[derive(Debug, Clone)]
pub struct Paths {
    pub root: PathBuf,
}

impl Paths {
    /// Resolve `~/.watchworthy`
    pub fn new() -> std::io::Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self {
            root: home.join(".watchworthy"),
        })
    }

    /// Use an explicit root directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get config.json path
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// Directory backing the file key-value store
    pub fn storage_dir(&self) -> PathBuf {
        self.root.join("storage")
    }
}
