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
        schema::{roles, workspace_members, workspaces},
    },
};
use super::{Role, User};

/// A workspace owns documents and binds users to roles.
#[derive(Clone, Debug)]
pub struct Workspace {
    data: db::Workspace,
}

/// A subset of workspace's data that can safely be publicly exposed.
#[derive(Debug, Serialize)]
pub struct PublicData {
    pub id: i32,
    pub name: String,
}

impl Workspace {
    /// Construct `Workspace` from its database counterpart.
    pub(crate) fn from_db(data: db::Workspace) -> Workspace {
        Workspace { data }
    }

    /// Find a workspace by ID.
    pub fn by_id(db: &Connection, id: i32)
    -> Result<Workspace, FindWorkspaceError> {
        workspaces::table
            .filter(workspaces::id.eq(id))
            .get_result::<db::Workspace>(db)
            .optional()?
            .ok_or(FindWorkspaceError::NotFound)
            .map(Workspace::from_db)
    }

    /// Create a new workspace.
    pub fn create(db: &Connection, name: &str) -> Result<Workspace, DbError> {
        db.transaction(|| {
            let data = diesel::insert_into(workspaces::table)
                .values(db::NewWorkspace { name })
                .get_result::<db::Workspace>(db)?;

            audit::append_global(
                db, audit::Actor::System, "create", "workspace", data.id,
                LogNewWorkspace { name })?;

            Ok(Workspace { data })
        })
    }

    /// Get list of all roles in this workspace.
    pub fn get_roles(&self, db: &Connection) -> Result<Vec<Role>, DbError> {
        roles::table
            .filter(roles::workspace.eq(self.data.id))
            .get_results(db)
            .map(|v| v.into_iter().map(Role::from_db).collect())
    }

    /// Get membership information for a user, if they are a member.
    pub fn get_member(&self, db: &Connection, user: &User)
    -> Result<Option<db::WorkspaceMember>, DbError> {
        workspace_members::table
            .filter(workspace_members::workspace.eq(self.data.id)
                .and(workspace_members::user.eq(user.id)))
            .get_result::<db::WorkspaceMember>(db)
            .optional()
    }

    /// Add a new member to this workspace.
    pub fn add_member(&self, db: &Connection, user: &User, role: &Role)
    -> Result<db::WorkspaceMember, AddMemberError> {
        if role.workspace != self.data.id {
            return Err(AddMemberError::BadRole);
        }

        db.transaction(|| {
            let data = diesel::insert_into(workspace_members::table)
                .values(db::WorkspaceMember {
                    workspace: self.data.id,
                    user: user.id,
                    role: role.id,
                })
                .get_result::<db::WorkspaceMember>(db)?;

            audit::append_global(
                db, audit::Actor::System, "add-member", "workspace",
                self.data.id, LogAddMember { user: user.id, role: role.id })?;

            Ok(data)
        })
    }

    /// Get the public portion of this workspace's data.
    pub fn get_public(&self) -> PublicData {
        PublicData {
            id: self.data.id,
            name: self.data.name.clone(),
        }
    }
}

impl std::ops::Deref for Workspace {
    type Target = db::Workspace;

    fn deref(&self) -> &db::Workspace {
        &self.data
    }
}

#[derive(Debug, Fail)]
pub enum FindWorkspaceError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// No workspace found matching given criteria.
    #[fail(display = "No such workspace")]
    NotFound,
}

impl_from! { for FindWorkspaceError ;
    DbError => |e| FindWorkspaceError::Database(e),
}

#[derive(Debug, Fail)]
pub enum AddMemberError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// Role belongs to a different workspace.
    #[fail(display = "Can't use a role from another workspace")]
    BadRole,
    /// User is already a member of this workspace.
    #[fail(display = "User is already a member of this workspace")]
    AlreadyMember,
}

impl_from! { for AddMemberError ;
    DbError => |e| match e {
        DbError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) =>
            AddMemberError::AlreadyMember,
        _ => AddMemberError::Database(e),
    }
}

#[derive(Serialize)]
struct LogNewWorkspace<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct LogAddMember {
    user: i32,
    role: i32,
}
