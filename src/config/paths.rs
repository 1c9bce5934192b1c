//! Path resolution for studykit configuration files.
//!
//! Everything lives in `~/.studykit/`:
//! - `config.yaml` - Main configuration file
//! - `credentials.yaml` - Bearer token written by `studykit login`

use std::path::PathBuf;

use crate::error::StudyError;

/// Paths to studykit files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.studykit/`
    pub root: PathBuf,
    /// Config file: `~/.studykit/config.yaml`
    pub config_file: PathBuf,
    /// Credentials file: `~/.studykit/credentials.yaml`
    pub credentials_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, StudyError> {
        let home = std::env::var("HOME")
            .map_err(|_| StudyError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".studykit")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            credentials_file: root.join("credentials.yaml"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StudyError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                StudyError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}
