use std::fs;
use std::path::{Path, PathBuf};

use crate::authz::AuthzMode;
use crate::errors::{AppError, AppResult};
use crate::models::PermissionSet;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub authz_mode: AuthzMode,
    pub permissions_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let authz_mode = std::env::var("AUTHZ_MODE")
            .map(|val| val.parse::<AuthzMode>())
            .unwrap_or(Ok(AuthzMode::Off))?;

        let permissions_file = std::env::var("PERMISSIONS_FILE")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            authz_mode,
            permissions_file,
        })
    }
}

/// Load `.env` from the working directory, falling back to the crate-local one.
///
/// Returns the file that was loaded. Runs before tracing is initialized, so
/// the caller logs the outcome.
pub fn load_env() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        return Some(path);
    }

    let crate_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    dotenvy::from_path(&crate_env).ok().map(|_| crate_env)
}

pub fn parse_permission_set(json: &str) -> AppResult<PermissionSet> {
    let de = &mut serde_json::Deserializer::from_str(json);
    Ok(serde_path_to_error::deserialize(de)?)
}

/// Read a JSON array of grants as delivered by the session bootstrap.
pub fn load_permission_set(path: &Path) -> AppResult<PermissionSet> {
    let raw = fs::read_to_string(path)?;
    let set = parse_permission_set(&raw)?;
    tracing::debug!(path = %path.display(), grants = set.len(), "permission set loaded");
    Ok(set)
}
