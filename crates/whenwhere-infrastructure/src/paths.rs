//! Platform path resolution for study data.
//!
//! All local study data lives under the platform data directory:
//!
//! ```text
//! ~/.local/share/whenwhere/        # Data directory (XDG on Linux)
//! ├── submissions.json             # Collected submission records
//! ├── submissions.json.lock        # Cross-process write lock
//! └── logs/                        # Application logs
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for the study prototype.
pub struct StudyPaths;

impl StudyPaths {
    /// Returns the study data directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to the data directory (e.g. `~/.local/share/whenwhere/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("whenwhere"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the submissions file.
    pub fn submissions_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("submissions.json"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("logs"))
    }
}
