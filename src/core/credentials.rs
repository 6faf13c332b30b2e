//! # Credential Store
//!
//! Persists the API token as a small JSON file:
//!
//! ```json
//! {
//!     "api_token": "..."
//! }
//! ```
//!
//! Loading is forgiving: a missing, unreadable or malformed file, or an
//! empty token, all mean "no credential" and the session starts at the
//! token prompt.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
struct StoredToken {
    api_token: String,
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Option<String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No stored token at {}", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read token file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<StoredToken>(&contents) {
            Ok(stored) if !stored.api_token.is_empty() => {
                info!("Loaded API token from {}", self.path.display());
                Some(stored.api_token)
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring malformed token file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Writes atomically (`.tmp` then rename), owner-only on Unix.
    pub fn save(&self, token: &str) -> io::Result<()> {
        let stored = StoredToken {
            api_token: token.to_string(),
        };
        let data = serde_json::to_string_pretty(&stored)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        restrict_permissions(&tmp)?;
        fs::rename(&tmp, &self.path)?;
        info!("Saved API token to {}", self.path.display());
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
