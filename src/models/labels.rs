//! Human-readable names for resources and actions.

use std::borrow::Cow;

use super::permission::{Action, Resource};

impl Resource {
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Projects => "Projects",
            Resource::Documents => "Documents",
            Resource::Tasks => "Tasks",
            Resource::TimeTracking => "Time Tracking",
            Resource::Invoices => "Invoices",
            Resource::Contacts => "Contacts",
            Resource::Folders => "Folders",
            Resource::Users => "Users",
            Resource::Dashboard => "Dashboard",
            Resource::Admin => "Administration",
            Resource::Roles => "Roles",
            Resource::Todo => "To-Do",
            Resource::PurchaseOrders => "Purchase Orders",
            Resource::ImageLibrary => "Image Library",
            Resource::ProductLibrary => "Product Library",
            Resource::Photos => "Photos",
        }
    }
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Create => "Create",
            Action::Read => "View",
            Action::Update => "Edit",
            Action::Delete => "Delete",
            Action::Manage => "Manage",
        }
    }
}

/// Display name for a raw resource identifier; unknown identifiers are
/// returned unchanged.
pub fn resource_name(raw: &str) -> Cow<'_, str> {
    match raw.parse::<Resource>() {
        Ok(resource) => Cow::Borrowed(resource.label()),
        Err(_) => Cow::Borrowed(raw),
    }
}

/// Display name for a raw action identifier; unknown identifiers are returned
/// unchanged.
pub fn action_name(raw: &str) -> Cow<'_, str> {
    match raw.parse::<Action>() {
        Ok(action) => Cow::Borrowed(action.label()),
        Err(_) => Cow::Borrowed(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_identifiers_map_to_labels() {
        assert_eq!(resource_name("time_tracking"), "Time Tracking");
        assert_eq!(resource_name("purchase_orders"), "Purchase Orders");
        assert_eq!(action_name("read"), "View");
        assert_eq!(action_name("manage"), "Manage");
    }

    #[test]
    fn unknown_identifiers_pass_through() {
        assert_eq!(resource_name("spaceships"), "spaceships");
        assert_eq!(action_name("archive"), "archive");
        assert_eq!(resource_name(""), "");
    }

    #[test]
    fn every_variant_has_a_label() {
        for resource in Resource::ALL {
            assert!(!resource.label().is_empty());
            assert_ne!(resource.label(), resource.as_str());
        }
        for action in Action::ALL {
            assert!(!action.label().is_empty());
        }
    }
}
