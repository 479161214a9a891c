use diesel::{
    Connection as _Connection,
    prelude::*,
    result::{DatabaseErrorKind, Error as DbError},
};
use failure::Fail;
use serde::Serialize;

use crate::{
    audit,
    db::{
        Connection,
        models as db,
        schema::{permissions, role_permissions, roles},
    },
    permissions::Permission,
};
use super::Workspace;

/// Role a user can take in a workspace.
#[derive(Clone, Debug)]
pub struct Role {
    data: db::Role,
}

/// A subset of role's data that can safely be publicly exposed.
#[derive(Debug, Serialize)]
pub struct PublicData {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
}

impl Role {
    /// Construct `Role` from its database counterpart.
    pub(crate) fn from_db(data: db::Role) -> Role {
        Role { data }
    }

    /// Find a role by ID.
    pub fn by_id(db: &Connection, id: i32) -> Result<Role, FindRoleError> {
        roles::table
            .filter(roles::id.eq(id))
            .get_result::<db::Role>(db)
            .optional()?
            .ok_or(FindRoleError::NotFound)
            .map(Role::from_db)
    }

    /// Create a new role.
    pub fn create(
        db: &Connection,
        workspace: &Workspace,
        name: &str,
        granted: &[Permission],
    ) -> Result<Role, CreateRoleError> {
        db.transaction(|| {
            let data = diesel::insert_into(roles::table)
                .values(db::NewRole {
                    workspace: workspace.id,
                    name,
                })
                .get_result::<db::Role>(db)?;

            let role = Role { data };

            for &permission in granted {
                role.grant(db, permission)?;
            }

            audit::append_global(
                db, audit::Actor::System, "create", "role", role.data.id,
                LogNewRole {
                    name,
                    workspace: workspace.id,
                    permissions: granted,
                })?;

            Ok(role)
        })
    }

    /// Get all permissions this role grants.
    pub fn permissions(&self, db: &Connection)
    -> Result<Vec<Permission>, DbError> {
        Ok(role_permissions::table
            .inner_join(permissions::table)
            .filter(role_permissions::role.eq(self.data.id))
            .select(permissions::slug)
            .get_results::<String>(db)?
            .into_iter()
            .filter_map(|slug| Permission::from_slug(&slug))
            .collect())
    }

    /// Grant a permission to this role.
    pub fn grant(&self, db: &Connection, permission: Permission)
    -> Result<(), DbError> {
        let permission = permission_id(db, permission)?;

        diesel::insert_into(role_permissions::table)
            .values(db::RolePermission {
                role: self.data.id,
                permission,
            })
            .on_conflict_do_nothing()
            .execute(db)?;

        Ok(())
    }

    /// Revoke a permission from this role.
    pub fn revoke(&self, db: &Connection, permission: Permission)
    -> Result<(), DbError> {
        let permission = permission_id(db, permission)?;

        diesel::delete(role_permissions::table
            .filter(role_permissions::role.eq(self.data.id)
                .and(role_permissions::permission.eq(permission))))
            .execute(db)?;

        Ok(())
    }

    /// Delete this role.
    pub fn delete(self, db: &Connection) -> Result<(), DeleteRoleError> {
        db.transaction(|| {
            diesel::delete(&self.data).execute(db)?;

            audit::append_global(
                db, audit::Actor::System, "delete", "role", self.data.id, ())?;

            Ok(())
        })
    }

    /// Get the public portion of this role's data.
    pub fn get_public(&self, db: &Connection, sensitive: bool)
    -> Result<PublicData, DbError> {
        Ok(PublicData {
            id: self.data.id,
            name: self.data.name.clone(),
            permissions: if sensitive {
                Some(self.permissions(db)?)
            } else {
                None
            },
        })
    }
}

/// Look up a permission's row ID by its name.
///
/// The permissions table is seeded by migrations, so a missing row is
/// a deployment error, not a user error.
fn permission_id(db: &Connection, permission: Permission)
-> Result<i32, DbError> {
    permissions::table
        .filter(permissions::slug.eq(permission.slug()))
        .select(permissions::id)
        .get_result(db)
}

impl std::ops::Deref for Role {
    type Target = db::Role;

    fn deref(&self) -> &db::Role {
        &self.data
    }
}

#[derive(Debug, Fail)]
pub enum FindRoleError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// No role found matching given criteria.
    #[fail(display = "No such role")]
    NotFound,
}

impl_from! { for FindRoleError ;
    DbError => |e| FindRoleError::Database(e),
}

#[derive(Debug, Fail)]
pub enum CreateRoleError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// Duplicate role.
    #[fail(display = "A role with this name already exists in the workspace")]
    Duplicate,
}

impl_from! { for CreateRoleError ;
    DbError => |e| match e {
        DbError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) =>
            CreateRoleError::Duplicate,
        _ => CreateRoleError::Database(e),
    }
}

#[derive(Debug, Fail)]
pub enum DeleteRoleError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// Role is still assigned to workspace members.
    #[fail(display = "Role is still in use")]
    InUse,
}

impl_from! { for DeleteRoleError ;
    DbError => |e| match e {
        DbError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) =>
            DeleteRoleError::InUse,
        _ => DeleteRoleError::Database(e),
    }
}

#[derive(Serialize)]
struct LogNewRole<'a> {
    name: &'a str,
    workspace: i32,
    permissions: &'a [Permission],
}
