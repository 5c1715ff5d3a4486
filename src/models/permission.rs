use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::AppError;

// =============================================================================
// RESOURCE
// =============================================================================

/// Domain object categories subject to access control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Projects,
    Documents,
    Tasks,
    TimeTracking,
    Invoices,
    Contacts,
    Folders,
    Users,
    Dashboard,
    Admin,
    Roles,
    Todo,
    PurchaseOrders,
    ImageLibrary,
    ProductLibrary,
    Photos,
}

impl Resource {
    pub const ALL: [Resource; 16] = [
        Resource::Projects,
        Resource::Documents,
        Resource::Tasks,
        Resource::TimeTracking,
        Resource::Invoices,
        Resource::Contacts,
        Resource::Folders,
        Resource::Users,
        Resource::Dashboard,
        Resource::Admin,
        Resource::Roles,
        Resource::Todo,
        Resource::PurchaseOrders,
        Resource::ImageLibrary,
        Resource::ProductLibrary,
        Resource::Photos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Projects => "projects",
            Resource::Documents => "documents",
            Resource::Tasks => "tasks",
            Resource::TimeTracking => "time_tracking",
            Resource::Invoices => "invoices",
            Resource::Contacts => "contacts",
            Resource::Folders => "folders",
            Resource::Users => "users",
            Resource::Dashboard => "dashboard",
            Resource::Admin => "admin",
            Resource::Roles => "roles",
            Resource::Todo => "todo",
            Resource::PurchaseOrders => "purchase_orders",
            Resource::ImageLibrary => "image_library",
            Resource::ProductLibrary => "product_library",
            Resource::Photos => "photos",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str() == s)
            .ok_or_else(|| AppError::unknown_resource(s))
    }
}

// =============================================================================
// ACTION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Manage,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Manage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Manage => "manage",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| AppError::unknown_action(s))
    }
}

// =============================================================================
// GRANT
// =============================================================================

/// Stored action flags for one resource. Flags are independent; a missing key
/// reads as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionFlags {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
    pub manage: bool,
}

impl ActionFlags {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: Action) -> Self {
        match action {
            Action::Create => self.create = true,
            Action::Read => self.read = true,
            Action::Update => self.update = true,
            Action::Delete => self.delete = true,
            Action::Manage => self.manage = true,
        }
        self
    }

    /// The stored flag for exactly `action`, with no implied hierarchy
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Create => self.create,
            Action::Read => self.read,
            Action::Update => self.update,
            Action::Delete => self.delete,
            Action::Manage => self.manage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub resource: Resource,
    #[serde(default)]
    pub actions: ActionFlags,
    /// Opaque fields from the session payload (ids, timestamps)
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl PermissionGrant {
    pub fn new(resource: Resource, actions: ActionFlags) -> Self {
        Self {
            resource,
            actions,
            metadata: Map::new(),
        }
    }
}

/// Grant as delivered on the wire, before the resource is checked against the
/// closed set. Grants naming an unknown resource are kept in this form; they
/// never match a check but still count toward the set's size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct WireGrant {
    resource: String,
    #[serde(default)]
    actions: ActionFlags,
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    metadata: Map<String, Value>,
}

// =============================================================================
// PERMISSION SET
// =============================================================================

/// Ordered grants held by the authenticated user. A set with no grants at all
/// is the super admin sentinel, not "no permissions".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionSet {
    grants: Vec<PermissionGrant>,
    unrecognized: Vec<WireGrant>,
}

impl PermissionSet {
    /// Empty set, i.e. the super admin sentinel
    pub fn super_admin() -> Self {
        Self::default()
    }

    /// Builds a set keeping the first grant per resource.
    pub fn from_grants(grants: impl IntoIterator<Item = PermissionGrant>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for grant in grants {
            if seen.insert(grant.resource) {
                kept.push(grant);
            } else {
                tracing::warn!(resource = %grant.resource, "duplicate grant dropped");
            }
        }
        Self {
            grants: kept,
            unrecognized: Vec::new(),
        }
    }

    /// Grants for known resources
    pub fn grants(&self) -> &[PermissionGrant] {
        &self.grants
    }

    /// Number of grants naming a resource outside the known set
    pub fn unrecognized_len(&self) -> usize {
        self.unrecognized.len()
    }

    /// True only when nothing at all was granted, recognized or not.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty() && self.unrecognized.is_empty()
    }

    pub fn is_super_admin(&self) -> bool {
        self.is_empty()
    }

    /// Every delivered grant, including unrecognized ones
    pub fn len(&self) -> usize {
        self.grants.len() + self.unrecognized.len()
    }

    pub fn grant_for(&self, resource: Resource) -> Option<&PermissionGrant> {
        self.grants.iter().find(|grant| grant.resource == resource)
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = Vec::<WireGrant>::deserialize(deserializer)?;
        let mut unrecognized = Vec::new();
        let grants: Vec<PermissionGrant> = wire
            .into_iter()
            .filter_map(|grant| match grant.resource.parse::<Resource>() {
                Ok(resource) => Some(PermissionGrant {
                    resource,
                    actions: grant.actions,
                    metadata: grant.metadata,
                }),
                Err(_) => {
                    tracing::warn!(resource = %grant.resource, "grant for unknown resource never matches");
                    unrecognized.push(grant);
                    None
                }
            })
            .collect();

        let mut set = Self::from_grants(grants);
        set.unrecognized = unrecognized;
        Ok(set)
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for grant in &self.grants {
            seq.serialize_element(grant)?;
        }
        for grant in &self.unrecognized {
            seq.serialize_element(grant)?;
        }
        seq.end()
    }
}

// =============================================================================
// REQUIREMENT
// =============================================================================

/// A single (resource, action) check, written `resource:action`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Requirement {
    pub resource: Resource,
    pub action: Action,
}

impl Requirement {
    pub fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }
}

impl From<(Resource, Action)> for Requirement {
    fn from((resource, action): (Resource, Action)) -> Self {
        Self::new(resource, action)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

impl FromStr for Requirement {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource, action) = s
            .split_once(':')
            .ok_or_else(|| AppError::bad_request(format!("expected resource:action, got `{s}`")))?;
        Ok(Self::new(resource.trim().parse()?, action.trim().parse()?))
    }
}
