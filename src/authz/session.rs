use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use super::evaluator;
use crate::models::{Action, PermissionSet, Requirement, Resource};

/// Permission snapshot of the authenticated session, bound to the evaluator.
///
/// Cloning is cheap; the underlying set is shared and never mutated.
#[derive(Debug, Clone, Default)]
pub struct SessionPermissions {
    set: Option<Arc<PermissionSet>>,
    loaded_at: Option<DateTime<Utc>>,
}

impl SessionPermissions {
    /// Snapshot taken before login; every check fails closed.
    pub fn unloaded() -> Self {
        Self::default()
    }

    pub fn new(set: PermissionSet) -> Self {
        Self {
            set: Some(Arc::new(set)),
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn permission_set(&self) -> Option<&PermissionSet> {
        self.set.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.set.is_some()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn is_super_admin(&self) -> bool {
        evaluator::is_super_admin(self.permission_set())
    }

    pub fn can(&self, resource: Resource, action: Action) -> bool {
        evaluator::has_permission(self.permission_set(), resource, action)
    }

    pub fn can_any<I>(&self, requirements: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Requirement>,
    {
        evaluator::has_any_permission(self.permission_set(), requirements)
    }

    pub fn can_all<I>(&self, requirements: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Requirement>,
    {
        evaluator::has_all_permissions(self.permission_set(), requirements)
    }

    pub fn filter<T>(&self, items: Vec<T>, resource: Resource, action: Action) -> Vec<T> {
        evaluator::filter_by_permission(items, self.permission_set(), resource, action)
    }
}

/// Holder of the current session's permissions.
///
/// `login` installs a set (replacing any previous one wholesale), `logout`
/// discards it. Readers take immutable snapshots.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    current: Arc<RwLock<SessionPermissions>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&self, set: PermissionSet) {
        let grants = set.len();
        let super_admin = set.is_super_admin();
        let replaced = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let replaced = current.is_loaded();
            *current = SessionPermissions::new(set);
            replaced
        };
        tracing::info!(grants, super_admin, replaced, "session permissions loaded");
    }

    pub fn logout(&self) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if current.is_loaded() {
            *current = SessionPermissions::unloaded();
            tracing::info!("session permissions cleared");
        }
    }

    pub fn snapshot(&self) -> SessionPermissions {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_loaded()
    }
}
