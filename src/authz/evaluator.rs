use crate::models::{Action, PermissionSet, Requirement, Resource};

/// True only when the set is loaded and holds zero grants.
///
/// An unloaded set is never treated as super admin.
pub fn is_super_admin(set: Option<&PermissionSet>) -> bool {
    set.is_some_and(PermissionSet::is_super_admin)
}

/// Decide a single (resource, action) check against the session grants.
///
/// Evaluation order:
/// 1. no set loaded -> deny
/// 2. no grants at all (super admin) -> allow
/// 3. no grant for the resource -> deny
/// 4. `read` with `manage` granted -> allow
/// 5. the stored flag for exactly the requested action
///
/// `manage` implies `read` and nothing else.
pub fn has_permission(set: Option<&PermissionSet>, resource: Resource, action: Action) -> bool {
    let Some(set) = set else {
        tracing::debug!(%resource, %action, "permission set not loaded");
        return false;
    };

    if set.is_super_admin() {
        tracing::debug!(%resource, %action, "super_admin bypass");
        return true;
    }

    let Some(grant) = set.grant_for(resource) else {
        tracing::debug!(%resource, %action, "no grant for resource");
        return false;
    };

    if action == Action::Read && grant.actions.manage {
        tracing::debug!(%resource, "read implied by manage");
        return true;
    }

    let allowed = grant.actions.allows(action);
    tracing::debug!(%resource, %action, allowed, "grant match");
    allowed
}

/// True when at least one requirement holds. An empty list is `false`.
pub fn has_any_permission<I>(set: Option<&PermissionSet>, requirements: I) -> bool
where
    I: IntoIterator,
    I::Item: Into<Requirement>,
{
    requirements.into_iter().any(|req| {
        let req = req.into();
        has_permission(set, req.resource, req.action)
    })
}

/// True when every requirement holds.
///
/// An empty list is vacuously satisfied, whether or not a set is loaded.
pub fn has_all_permissions<I>(set: Option<&PermissionSet>, requirements: I) -> bool
where
    I: IntoIterator,
    I::Item: Into<Requirement>,
{
    requirements.into_iter().all(|req| {
        let req = req.into();
        has_permission(set, req.resource, req.action)
    })
}

/// All-or-nothing gate over a collection: the items come back untouched when
/// the check passes, otherwise empty. Items are never inspected.
pub fn filter_by_permission<T>(
    items: Vec<T>,
    set: Option<&PermissionSet>,
    resource: Resource,
    action: Action,
) -> Vec<T> {
    if has_permission(set, resource, action) {
        items
    } else {
        Vec::new()
    }
}
