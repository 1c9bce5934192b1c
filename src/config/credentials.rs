//! Stored bearer token.
//!
//! `studykit login` writes `~/.studykit/credentials.yaml`; `studykit logout`
//! removes it. The file is readable only by its owner on Unix.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StudyError;

/// Contents of the credentials file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Bearer token for API requests.
    pub token: String,
    /// Email the token was issued for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Credentials {
    /// Load credentials, or `None` if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from_path(path: &Path) -> Result<Option<Self>, StudyError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)?;
        let credentials: Self = serde_yaml::from_str(&contents).map_err(|e| {
            StudyError::Config(format!(
                "Failed to parse credentials file {}: {e}",
                path.display()
            ))
        })?;
        if credentials.token.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(credentials))
    }

    /// Write credentials, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), StudyError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| StudyError::Config(format!("Failed to serialize credentials: {e}")))?;
        let mut file = open_private(path)?;
        file.write_all(contents.as_bytes())?;
        Ok(())
    }

    /// Delete the credentials file. Returns false if there was none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove_at(path: &Path) -> Result<bool, StudyError> {
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)?;
        Ok(true)
    }
}

/// Open for writing with owner-only permissions from creation on. An
/// existing file keeps its mode, so it is tightened as well.
#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_remove() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.yaml");

        assert_eq!(Credentials::load_from_path(&path).unwrap(), None);

        let credentials = Credentials {
            token: "abc.def".to_string(),
            email: Some("sam@example.com".to_string()),
        };
        credentials.save_to_path(&path).unwrap();
        assert_eq!(
            Credentials::load_from_path(&path).unwrap(),
            Some(credentials)
        );

        assert!(Credentials::remove_at(&path).unwrap());
        assert!(!Credentials::remove_at(&path).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.yaml");
        Credentials {
            token: "t".to_string(),
            email: None,
        }
        .save_to_path(&path)
        .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_file_is_tightened_and_replaced() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.yaml");
        std::fs::write(&path, "token: old-token-that-is-longer\nemail: old@example.com\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let credentials = Credentials {
            token: "new".to_string(),
            email: None,
        };
        credentials.save_to_path(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(
            Credentials::load_from_path(&path).unwrap(),
            Some(credentials)
        );
    }

    #[test]
    fn test_blank_token_counts_as_logged_out() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.yaml");
        std::fs::write(&path, "token: ''\n").unwrap();
        assert_eq!(Credentials::load_from_path(&path).unwrap(), None);
    }
}
