//! Authorization module - permission evaluation and session state
//!
//! This module implements the resource/action permission model with:
//! - Per-resource action grants (create/read/update/delete/manage)
//! - `manage` implying `read`, and nothing else
//! - Super admin bypass, signaled by an empty permission set
//! - Configurable enforcement modes (off/advisory/strict)

mod evaluator;
mod guard;
mod session;

pub use evaluator::{
    filter_by_permission, has_all_permissions, has_any_permission, has_permission, is_super_admin,
};
pub use guard::enforce;
pub use session::{SessionPermissions, SessionStore};

use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Authorization enforcement mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthzMode {
    /// No permission checks (development mode)
    #[default]
    Off,
    /// Log denials but allow (testing mode)
    Advisory,
    /// Reject denied checks with `AppError::Forbidden`
    Strict,
}

impl AuthzMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthzMode::Off => "off",
            AuthzMode::Advisory => "advisory",
            AuthzMode::Strict => "strict",
        }
    }
}

impl fmt::Display for AuthzMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthzMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "off" => Ok(AuthzMode::Off),
            "advisory" => Ok(AuthzMode::Advisory),
            "strict" => Ok(AuthzMode::Strict),
            other => Err(AppError::configuration(format!(
                "AUTHZ_MODE must be one of off, advisory, strict (got `{other}`)"
            ))),
        }
    }
}
