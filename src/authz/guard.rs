use super::{evaluator, AuthzMode};
use crate::errors::{AppError, AppResult};
use crate::models::{Action, PermissionSet, Resource};

/// Apply a permission check under the configured enforcement mode.
///
/// Only `Strict` turns a denial into an error; `Advisory` logs it and lets the
/// caller through, `Off` skips evaluation entirely.
pub fn enforce(
    mode: AuthzMode,
    set: Option<&PermissionSet>,
    resource: Resource,
    action: Action,
) -> AppResult<()> {
    if mode == AuthzMode::Off {
        return Ok(());
    }

    if evaluator::has_permission(set, resource, action) {
        return Ok(());
    }

    match mode {
        AuthzMode::Strict => {
            tracing::warn!(%resource, %action, "permission denied");
            Err(AppError::forbidden(format!(
                "missing `{action}` on `{resource}`"
            )))
        }
        _ => {
            tracing::warn!(%resource, %action, "permission denied (advisory, allowing)");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionFlags, PermissionGrant};

    fn reader() -> PermissionSet {
        PermissionSet::from_grants([PermissionGrant::new(
            Resource::Documents,
            ActionFlags::none().with(Action::Read),
        )])
    }

    #[test]
    fn test_strict_rejects_denied_check() {
        let set = reader();
        assert!(enforce(AuthzMode::Strict, Some(&set), Resource::Documents, Action::Read).is_ok());

        let err = enforce(AuthzMode::Strict, Some(&set), Resource::Documents, Action::Delete)
            .expect_err("delete is not granted");
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(err.to_string(), "forbidden: missing `delete` on `documents`");
    }

    #[test]
    fn test_strict_fails_closed_when_unloaded() {
        assert!(enforce(AuthzMode::Strict, None, Resource::Dashboard, Action::Read).is_err());
    }

    #[test]
    fn test_advisory_and_off_allow() {
        assert!(enforce(AuthzMode::Advisory, None, Resource::Roles, Action::Manage).is_ok());
        assert!(enforce(AuthzMode::Off, None, Resource::Roles, Action::Manage).is_ok());
    }
}
