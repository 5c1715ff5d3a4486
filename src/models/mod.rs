pub mod labels;
pub mod permission;

pub use labels::{action_name, resource_name};
pub use permission::{Action, ActionFlags, PermissionGrant, PermissionSet, Requirement, Resource};
