pub mod authz;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;

// Re-export commonly used items for tests
pub use authz::{SessionPermissions, SessionStore};
pub use errors::{AppError, AppResult};
pub use models::{Action, ActionFlags, PermissionGrant, PermissionSet, Requirement, Resource};
