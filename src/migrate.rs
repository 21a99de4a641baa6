//! One-shot relocation of the resource file to the XDG config directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::paths::{BACKUP_FILENAME, CONFIG_FILENAME};

/// The three locations involved in startup migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// `$HOME/.gtktermrc`
    pub legacy: PathBuf,
    /// `$XDG_CONFIG_HOME/.gtktermrc`
    pub current: PathBuf,
    /// `$XDG_CONFIG_HOME/.gtktermrc.v1`
    pub backup: PathBuf,
}

impl ConfigPaths {
    /// Resolve from the user's home and config directories
    pub fn resolve() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));
        Self::from_dirs(&home, &config_dir)
    }

    pub fn from_dirs(home: &Path, config_dir: &Path) -> Self {
        Self {
            legacy: home.join(CONFIG_FILENAME),
            current: config_dir.join(CONFIG_FILENAME),
            backup: config_dir.join(BACKUP_FILENAME),
        }
    }

    /// Move a legacy file into place and refresh the backup copy
    ///
    /// Best-effort: failures are logged, never returned.
    pub fn migrate(&self) {
        if !self.current.exists() && self.legacy.exists() {
            match move_file(&self.legacy, &self.current) {
                Ok(()) => info!(
                    from = %self.legacy.display(),
                    to = %self.current.display(),
                    "Moved configuration file to new location"
                ),
                Err(e) => warn!(
                    from = %self.legacy.display(),
                    to = %self.current.display(),
                    error = %e,
                    "Failed to move configuration file"
                ),
            }
        }

        // Fails quietly on first run when there is nothing to back up yet
        if let Err(e) = fs::copy(&self.current, &self.backup) {
            debug!(path = %self.backup.display(), error = %e, "Configuration backup skipped");
        }
    }
}

fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    // rename cannot cross file systems
    fs::copy(from, to)?;
    fs::remove_file(from)
}
