//! Persisted credentials: bearer token plus the validated user record,
//! stored as JSON in the user's config directory.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::github::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredAuth {
    pub(crate) token: String,
    #[serde(default)]
    pub(crate) user: Option<User>,
}

pub(crate) fn auth_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("ghpaint").join("auth.json"))
}

pub(crate) fn load() -> Option<StoredAuth> {
    let path = auth_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub(crate) fn save(auth: &StoredAuth) -> Result<(), AuthError> {
    let Some(path) = auth_path() else {
        return Err(AuthError::Store(std::io::Error::other(
            "could not determine home directory",
        )));
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(AuthError::Store)?;
    }
    let json = serde_json::to_string_pretty(auth)
        .map_err(|e| AuthError::Store(std::io::Error::other(e)))?;
    fs::write(&path, json).map_err(AuthError::Store)?;

    // Token file should not be world-readable
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(&path, perms).map_err(AuthError::Store)?;
    }

    Ok(())
}

/// Remove stored credentials. Returns whether anything was removed.
pub(crate) fn clear() -> bool {
    match auth_path() {
        Some(path) if path.exists() => fs::remove_file(path).is_ok(),
        _ => false,
    }
}
