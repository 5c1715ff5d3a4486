use anyhow::Result;
use serde_json::json;

use pm_authz::authz::{
    filter_by_permission, has_all_permissions, has_any_permission, has_permission, is_super_admin,
};
use pm_authz::{Action, ActionFlags, PermissionGrant, PermissionSet, Requirement, Resource};

fn grant(resource: Resource, actions: &[Action]) -> PermissionGrant {
    let flags = actions
        .iter()
        .fold(ActionFlags::none(), |flags, action| flags.with(*action));
    PermissionGrant::new(resource, flags)
}

#[test]
fn missing_set_fails_closed_for_every_pair() {
    for resource in Resource::ALL {
        for action in Action::ALL {
            assert!(
                !has_permission(None, resource, action),
                "{resource}:{action} allowed without a permission set"
            );
        }
    }
}

#[test]
fn super_admin_sentinel() {
    let empty = PermissionSet::super_admin();
    assert!(is_super_admin(Some(&empty)));
    assert!(!is_super_admin(None));

    let nothing_granted = PermissionSet::from_grants([grant(Resource::Photos, &[])]);
    assert!(!is_super_admin(Some(&nothing_granted)));

    let everything_granted = PermissionSet::from_grants([grant(Resource::Admin, &Action::ALL)]);
    assert!(!is_super_admin(Some(&everything_granted)));
}

#[test]
fn manage_implies_read_but_not_create() -> Result<()> {
    let set: PermissionSet = serde_json::from_value(json!([{
        "resource": "tasks",
        "actions": {"manage": true, "read": false, "create": false, "update": false, "delete": false}
    }]))?;

    assert!(has_permission(Some(&set), Resource::Tasks, Action::Read));
    assert!(!has_permission(Some(&set), Resource::Tasks, Action::Create));
    Ok(())
}

#[test]
fn unmatched_resource_is_denied() {
    let set = PermissionSet::from_grants([grant(Resource::Documents, &Action::ALL)]);
    assert!(!has_permission(Some(&set), Resource::Tasks, Action::Read));
}

#[test]
fn exact_action_match_without_manage() -> Result<()> {
    let set: PermissionSet = serde_json::from_value(json!([{
        "resource": "invoices",
        "actions": {"manage": false, "read": true, "create": true, "update": false, "delete": false}
    }]))?;

    assert!(!has_permission(Some(&set), Resource::Invoices, Action::Update));
    assert!(has_permission(Some(&set), Resource::Invoices, Action::Create));
    Ok(())
}

#[test]
fn any_and_all_combinators() {
    let set = PermissionSet::from_grants([grant(Resource::Projects, &[Action::Read])]);
    let requirements = [
        Requirement::new(Resource::Projects, Action::Read),
        Requirement::new(Resource::Tasks, Action::Read),
    ];

    assert!(has_any_permission(Some(&set), requirements));
    assert!(!has_all_permissions(Some(&set), requirements));
    assert!(has_all_permissions(Some(&set), [requirements[0]]));
    assert!(!has_any_permission(None, requirements));
}

#[test]
fn empty_requirements_are_vacuously_satisfied_for_all_but_not_any() {
    let set = PermissionSet::from_grants([grant(Resource::Projects, &[Action::Read])]);
    let none: [Requirement; 0] = [];

    assert!(has_all_permissions(Some(&set), none));
    assert!(has_all_permissions(None, none));
    assert!(!has_any_permission(Some(&set), none));
    assert!(!has_any_permission(None, none));
}

#[test]
fn filter_gate_returns_everything_or_nothing() {
    let set = PermissionSet::from_grants([grant(Resource::Folders, &[Action::Read])]);

    assert_eq!(
        filter_by_permission(vec![1, 2, 3], Some(&set), Resource::Folders, Action::Read),
        vec![1, 2, 3]
    );
    assert_eq!(
        filter_by_permission(vec![1, 2, 3], Some(&set), Resource::Folders, Action::Update),
        Vec::<i32>::new()
    );
    assert!(filter_by_permission(vec![1, 2, 3], None, Resource::Folders, Action::Read).is_empty());
}

#[test]
fn empty_set_allows_every_pair() {
    let set = PermissionSet::super_admin();
    for resource in Resource::ALL {
        for action in Action::ALL {
            assert!(
                has_permission(Some(&set), resource, action),
                "super admin denied {resource}:{action}"
            );
        }
    }
}

#[test]
fn create_only_photos_grant() -> Result<()> {
    let set: PermissionSet = serde_json::from_value(json!([{
        "resource": "photos",
        "actions": {"create": true, "read": false, "update": false, "delete": false, "manage": false}
    }]))?;

    assert!(has_permission(Some(&set), Resource::Photos, Action::Create));
    assert!(!has_permission(Some(&set), Resource::Photos, Action::Read));
    assert!(!has_permission(Some(&set), Resource::Photos, Action::Manage));
    assert!(!has_permission(Some(&set), Resource::Documents, Action::Read));
    Ok(())
}

#[test]
fn evaluation_never_mutates_the_set() -> Result<()> {
    let set: PermissionSet = serde_json::from_value(json!([
        {"resource": "roles", "actions": {"manage": true}},
        {"resource": "users", "actions": {"read": true}}
    ]))?;
    let before = set.clone();

    for resource in Resource::ALL {
        for action in Action::ALL {
            let _ = has_permission(Some(&set), resource, action);
        }
    }

    assert_eq!(set, before);
    assert!(!set.grant_for(Resource::Roles).map(|g| g.actions.read).unwrap_or(true));
    Ok(())
}
