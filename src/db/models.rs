use chrono::NaiveDateTime;
use serde_json::Value;
use uuid::Uuid;

use super::schema::*;
use super::types::*;

#[derive(Clone, Debug, Identifiable, Queryable)]
pub struct User {
    pub id: i32,
    /// User's email address, used for identification.
    pub email: String,
    /// User's display name.
    pub name: String,
}

#[derive(Clone, Copy, Debug, Insertable)]
#[table_name = "users"]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
}

#[derive(Clone, Debug, Identifiable, Queryable)]
pub struct Workspace {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Copy, Debug, Insertable)]
#[table_name = "workspaces"]
pub struct NewWorkspace<'a> {
    pub name: &'a str,
}

#[derive(Clone, Debug, Identifiable, Queryable)]
pub struct Role {
    pub id: i32,
    /// Workspace this role is scoped to.
    pub workspace: i32,
    pub name: String,
}

#[derive(Clone, Copy, Debug, Insertable)]
#[table_name = "roles"]
pub struct NewRole<'a> {
    pub workspace: i32,
    pub name: &'a str,
}

#[derive(Clone, Debug, Identifiable, Queryable)]
pub struct Permission {
    pub id: i32,
    /// Stable name of this permission, e.g. `document:review`.
    pub slug: String,
}

#[derive(Clone, Copy, Debug, Identifiable, Insertable, Queryable)]
#[primary_key(role, permission)]
pub struct RolePermission {
    pub role: i32,
    pub permission: i32,
}

#[derive(Clone, Copy, Debug, Identifiable, Insertable, Queryable)]
#[primary_key(workspace, user)]
pub struct WorkspaceMember {
    pub workspace: i32,
    pub user: i32,
    /// Role this member holds in the workspace.
    pub role: i32,
}

#[derive(Clone, Debug, Identifiable, Queryable)]
pub struct Document {
    pub id: Uuid,
    /// Workspace owning this document.
    pub workspace: i32,
    /// Discriminant selecting the content payload variant.
    pub kind: DocumentKind,
    pub title: String,
    /// The currently published version, if any.
    pub approved_version: Option<i32>,
    pub status: DocumentStatus,
}

#[derive(Clone, Copy, Debug, Insertable)]
#[table_name = "documents"]
pub struct NewDocument<'a> {
    pub id: Uuid,
    pub workspace: i32,
    pub kind: DocumentKind,
    pub title: &'a str,
}

#[derive(Clone, Debug, Identifiable, Queryable)]
pub struct DocumentVersion {
    pub id: i32,
    /// Document this is a snapshot of.
    pub document: Uuid,
    /// Strictly increasing per document, assigned at creation, never reused.
    pub version_number: i32,
    pub status: VersionStatus,
    /// Version this one was cloned from, if any.
    pub supersedes: Option<i32>,
    /// Structured content payload.
    pub content: Value,
    /// Caller-produced rendered form of the content.
    pub rendered: Option<String>,
    pub created_by: i32,
    pub approved_by: Option<i32>,
    pub approved_at: Option<NaiveDateTime>,
    pub rejected_by: Option<i32>,
    pub rejected_at: Option<NaiveDateTime>,
    /// Review cycle this version is (or was) subject of.
    pub validation: Option<i32>,
    pub is_current: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Insertable)]
#[table_name = "document_versions"]
pub struct NewDocumentVersion<'a> {
    pub document: Uuid,
    pub version_number: i32,
    pub status: VersionStatus,
    pub supersedes: Option<i32>,
    pub content: &'a Value,
    pub rendered: Option<&'a str>,
    pub created_by: i32,
}

#[derive(Clone, Debug, Identifiable, Queryable)]
pub struct Validation {
    pub id: i32,
    pub document: Uuid,
    pub status: ValidationStatus,
    /// Reviewer's remarks; required non-empty on rejection.
    pub observations: Option<String>,
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}

#[derive(Clone, Copy, Debug, Insertable)]
#[table_name = "validations"]
pub struct NewValidation {
    pub document: Uuid,
}

#[derive(Clone, Debug, Identifiable, Queryable)]
#[table_name = "audit_log"]
pub struct AuditLog {
    pub id: i32,
    pub timestamp: NaiveDateTime,
    pub actor: Option<i32>,
    pub document: Option<Uuid>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i32>,
    pub entity_uuid: Option<Uuid>,
    /// Action metadata, serialized as MessagePack.
    pub data: Vec<u8>,
}

#[derive(Clone, Copy, Debug, Insertable)]
#[table_name = "audit_log"]
pub struct NewAuditLog<'a> {
    pub actor: Option<i32>,
    pub document: Option<Uuid>,
    pub action: &'a str,
    pub entity_type: &'a str,
    pub entity_id: Option<i32>,
    pub entity_uuid: Option<Uuid>,
    pub data: &'a [u8],
}
