use std::borrow::{Borrow, Cow};
use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use gatehouse_core::{DomainError, DomainResult};

/// Permission identifier.
///
/// Permissions are opaque strings (e.g. "view_users") compared byte for byte.
/// There is no wildcard and no prefix matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The exact set of permissions a role grants.
///
/// Immutable once built; cloning shares the underlying set. Replacing a role's
/// permissions swaps one `PermissionSet` for another, so readers never observe
/// a half-built set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PermissionSet(Arc<BTreeSet<Permission>>);

impl PermissionSet {
    /// The empty set (what an undefined role grants).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from permission names.
    ///
    /// Duplicates collapse. Blank names are rejected rather than dropped.
    pub fn try_from_names<I, N>(names: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let mut set = BTreeSet::new();
        for (idx, name) in names.into_iter().enumerate() {
            let name: String = name.into();
            if name.trim().is_empty() {
                return Err(DomainError::invalid_permission_set(format!(
                    "permissions[{idx}] is blank"
                )));
            }
            set.insert(Permission::new(name));
        }
        Ok(Self(Arc::new(set)))
    }

    /// Validate an untyped permission collection (e.g. a JSON request body).
    ///
    /// Only an array of strings is accepted. `null`, objects, scalars, and
    /// arrays holding non-strings are all rejected; none of them is read as
    /// "grant nothing".
    pub fn from_json(value: &serde_json::Value) -> DomainResult<Self> {
        let items = value.as_array().ok_or_else(|| {
            DomainError::invalid_permission_set("permissions must be an array of strings")
        })?;

        let mut names = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let name = item.as_str().ok_or_else(|| {
                DomainError::invalid_permission_set(format!("permissions[{idx}] is not a string"))
            })?;
            names.push(name.to_owned());
        }

        Self::try_from_names(names)
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.0.contains(permission)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Permission names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|p| p.as_str().to_owned()).collect()
    }
}

impl TryFrom<Vec<String>> for PermissionSet {
    type Error = DomainError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::try_from_names(names)
    }
}

impl From<PermissionSet> for Vec<String> {
    fn from(set: PermissionSet) -> Self {
        set.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_accepts_string_array() {
        let set = PermissionSet::from_json(&json!(["view_users", "create_role", "view_users"]))
            .unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("view_users"));
        assert!(set.contains("create_role"));
    }

    #[test]
    fn from_json_accepts_empty_array() {
        let set = PermissionSet::from_json(&json!([])).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn from_json_rejects_non_arrays() {
        for value in [json!(null), json!("view_users"), json!({"a": 1}), json!(3)] {
            let err = PermissionSet::from_json(&value).unwrap_err();
            assert!(matches!(err, DomainError::InvalidPermissionSet(_)), "{value}");
        }
    }

    #[test]
    fn from_json_rejects_non_string_elements() {
        let err = PermissionSet::from_json(&json!(["view_users", 7])).unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_permission_set("permissions[1] is not a string")
        );
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(PermissionSet::try_from_names(["view_users", "  "]).is_err());
        assert!(PermissionSet::try_from_names([""]).is_err());
    }

    #[test]
    fn membership_is_exact() {
        let set = PermissionSet::try_from_names(["view_users"]).unwrap();
        assert!(set.contains("view_users"));
        assert!(!set.contains("View_Users"));
        assert!(!set.contains("view"));
        assert!(!set.contains("view_users "));
    }

    #[test]
    fn serde_uses_a_sorted_list() {
        let set = PermissionSet::try_from_names(["b", "a"]).unwrap();
        assert_eq!(serde_json::to_value(&set).unwrap(), json!(["a", "b"]));

        let back: PermissionSet = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(back, set);

        assert!(serde_json::from_value::<PermissionSet>(json!("a")).is_err());
        assert!(serde_json::from_value::<PermissionSet>(json!([""])).is_err());
    }
}
