//! Fine-grained control over actions a user can take.
//!
//! Permissions are named capabilities granted through roles: a membership
//! binds a user to a workspace with one role, and the role carries a set of
//! permissions. Note that segregation of duties is *not* a permission — it is
//! an identity check made by the lifecycle engine, and holding
//! [`Permission::ReviewDocument`] does not exempt an actor from it.

use diesel::{prelude::*, result::Error as DbError};
use failure::Fail;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::db::{
    Connection,
    schema::{permissions, role_permissions, workspace_members},
};

/// A named capability a role can grant.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Permission {
    /// Holder can create and edit drafts of documents in the workspace.
    #[serde(rename = "document:edit")]
    EditDocument,
    /// Holder can submit a draft for review.
    #[serde(rename = "document:submit")]
    SubmitDocument,
    /// Holder can approve or reject versions under review.
    #[serde(rename = "document:review")]
    ReviewDocument,
}

impl Permission {
    /// Stable name of this permission, as stored in the database.
    pub fn slug(self) -> &'static str {
        match self {
            Permission::EditDocument => "document:edit",
            Permission::SubmitDocument => "document:submit",
            Permission::ReviewDocument => "document:review",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Permission> {
        match slug {
            "document:edit" => Some(Permission::EditDocument),
            "document:submit" => Some(Permission::SubmitDocument),
            "document:review" => Some(Permission::ReviewDocument),
            _ => None,
        }
    }

    pub fn all() -> &'static [Permission] {
        &[
            Permission::EditDocument,
            Permission::SubmitDocument,
            Permission::ReviewDocument,
        ]
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.slug())
    }
}

/// Check whether `user` holds `permission` in `workspace`.
///
/// Absence of a membership, or of a role grant, yields `false`, never an
/// error.
pub fn has_permission(
    db: &Connection,
    user: i32,
    workspace: i32,
    permission: Permission,
) -> Result<bool, DbError> {
    let role = workspace_members::table
        .filter(workspace_members::workspace.eq(workspace)
            .and(workspace_members::user.eq(user)))
        .select(workspace_members::role)
        .get_result::<i32>(db)
        .optional()?;

    let role = match role {
        Some(role) => role,
        None => return Ok(false),
    };

    let count: i64 = role_permissions::table
        .inner_join(permissions::table)
        .filter(role_permissions::role.eq(role)
            .and(permissions::slug.eq(permission.slug())))
        .count()
        .get_result(db)?;

    Ok(count > 0)
}

/// Verify that a required permission is present.
///
/// This is the same check as [`has_permission`], except that a missing
/// permission is reported as an error.
pub fn require(
    db: &Connection,
    user: i32,
    workspace: i32,
    permission: Permission,
) -> Result<(), RequirePermissionError> {
    if has_permission(db, user, workspace, permission)? {
        Ok(())
    } else {
        Err(RequirePermissionError::Missing(permission))
    }
}

#[derive(Debug, Fail)]
pub enum RequirePermissionError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// Actor does not hold the required permission.
    #[fail(display = "Missing required permission: {}", _0)]
    Missing(Permission),
}

impl_from! { for RequirePermissionError ;
    DbError => |e| RequirePermissionError::Database(e),
}

#[cfg(test)]
mod tests {
    use super::Permission;

    #[test]
    fn slugs_round_trip() {
        for &permission in Permission::all() {
            assert_eq!(
                Permission::from_slug(permission.slug()),
                Some(permission),
            );
        }

        assert_eq!(Permission::from_slug("document:destroy"), None);
    }

    #[test]
    fn serde_uses_slugs() {
        let json = serde_json::to_string(&Permission::ReviewDocument).unwrap();
        assert_eq!(json, r#""document:review""#);

        let back: Permission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Permission::ReviewDocument);
    }
}
