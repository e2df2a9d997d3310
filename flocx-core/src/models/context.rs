use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::Failure;

/// The identifier of a tenant.
///
/// Project ids are issued by the identity service and are opaque strings,
/// so unlike entity ids they are not parsed as uuids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// View the raw project id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<ProjectId> for String {
    fn from(value: ProjectId) -> Self {
        value.0
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The identity of a caller.
///
/// A context is supplied with every repository call and is never persisted.
/// Non-admin callers are restricted to rows owned by their project; admin
/// callers see and may change everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// The tenant the caller acts for
    pub project_id: ProjectId,
    /// Whether the caller bypasses tenant scoping
    #[serde(default)]
    pub is_admin: bool,
}

impl Context {
    /// A regular tenant context
    pub fn new(project_id: impl Into<ProjectId>) -> Self {
        Self {
            project_id: project_id.into(),
            is_admin: false,
        }
    }

    /// An administrator acting from `project_id`
    pub fn admin(project_id: impl Into<ProjectId>) -> Self {
        Self {
            project_id: project_id.into(),
            is_admin: true,
        }
    }

    /// True if the caller may modify a row owned by `owner`.
    pub fn owns(&self, owner: &ProjectId) -> bool {
        self.is_admin || &self.project_id == owner
    }

    /// The project to restrict a query to, or `None` for admins.
    pub fn scope(&self) -> Option<&ProjectId> {
        if self.is_admin {
            None
        } else {
            Some(&self.project_id)
        }
    }

    /// Refuse the caller with [`Failure::NoPermission`] unless they may modify
    /// the row `id` of `kind` owned by `owner`.
    pub fn check_owner(&self, kind: &str, id: impl ToString, owner: &ProjectId) -> Result<(), Failure> {
        if self.owns(owner) {
            Ok(())
        } else {
            Err(Failure::no_permission(kind, id))
        }
    }

    /// Refuse the caller with [`Failure::RequiresAdmin`] unless they are an admin.
    pub fn check_admin(&self, kind: &str) -> Result<(), Failure> {
        if self.is_admin {
            Ok(())
        } else {
            Err(Failure::requires_admin(kind))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_rules() {
        let alice = ProjectId::from("alice");
        let bob = ProjectId::from("bob");

        let ctx = Context::new("alice");
        assert!(ctx.owns(&alice));
        assert!(!ctx.owns(&bob));
        assert_eq!(ctx.scope(), Some(&alice));

        let admin = Context::admin("alice");
        assert!(admin.owns(&bob));
        assert_eq!(admin.scope(), None);
    }

    #[test]
    fn test_checks_report_failures() {
        let ctx = Context::new("alice");
        match ctx.check_owner("Offer", "abc", &ProjectId::from("bob")) {
            Err(Failure::NoPermission { kind, id }) => {
                assert_eq!(kind, "Offer");
                assert_eq!(id, "abc");
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert_eq!(
            ctx.check_admin("Contract"),
            Err(Failure::requires_admin("Contract"))
        );
        assert!(Context::admin("alice").check_admin("Contract").is_ok());
    }

    #[test]
    fn test_context_deserializes_without_admin_flag() {
        let ctx: Context = serde_json::from_str(r#"{"project_id": "p1"}"#).unwrap();
        assert_eq!(ctx, Context::new("p1"));
    }
}
