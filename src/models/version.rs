use chrono::NaiveDateTime;
use diesel::{
    dsl::max,
    prelude::*,
    result::Error as DbError,
};
use failure::Fail;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    audit,
    content::{Content, ValidateContentError},
    db::{
        Connection,
        models as db,
        schema::document_versions,
        types::VersionStatus,
    },
};
use super::Document;

/// A content snapshot of a document.
///
/// Versions are created by the lifecycle engine. Once a version leaves
/// [`VersionStatus::Draft`] its content never changes again; further edits
/// require a new version cloned from it.
#[derive(Clone, Debug)]
pub struct Version {
    data: db::DocumentVersion,
}

/// A subset of version's data that can safely be publicly exposed.
#[derive(Debug, Serialize)]
pub struct PublicData {
    pub id: i32,
    pub document: Uuid,
    pub version_number: i32,
    pub status: VersionStatus,
    pub supersedes: Option<i32>,
    pub created_by: i32,
    pub approved_by: Option<i32>,
    pub approved_at: Option<NaiveDateTime>,
    pub rejected_by: Option<i32>,
    pub rejected_at: Option<NaiveDateTime>,
    pub is_current: bool,
    pub created_at: NaiveDateTime,
}

impl Version {
    /// Construct `Version` from its database counterpart.
    pub(crate) fn from_db(data: db::DocumentVersion) -> Version {
        Version { data }
    }

    /// Find a version by ID.
    pub fn by_id(db: &Connection, id: i32) -> Result<Version, FindVersionError> {
        document_versions::table
            .filter(document_versions::id.eq(id))
            .get_result::<db::DocumentVersion>(db)
            .optional()?
            .ok_or(FindVersionError::NotFound)
            .map(Version::from_db)
    }

    /// Find a version by ID within a specific document.
    pub fn by_id_of(db: &Connection, document: Uuid, id: i32)
    -> Result<Version, FindVersionError> {
        document_versions::table
            .filter(document_versions::id.eq(id)
                .and(document_versions::document.eq(document)))
            .get_result::<db::DocumentVersion>(db)
            .optional()?
            .ok_or(FindVersionError::NotFound)
            .map(Version::from_db)
    }

    /// Find the version subject to a review cycle.
    pub fn by_validation(db: &Connection, validation: i32)
    -> Result<Version, FindVersionError> {
        document_versions::table
            .filter(document_versions::validation.eq(validation))
            .get_result::<db::DocumentVersion>(db)
            .optional()?
            .ok_or(FindVersionError::NotFound)
            .map(Version::from_db)
    }

    /// Get all versions of a document, oldest first.
    pub fn all_of(db: &Connection, document: Uuid)
    -> Result<Vec<Version>, DbError> {
        document_versions::table
            .filter(document_versions::document.eq(document))
            .order_by(document_versions::version_number.asc())
            .get_results(db)
            .map(|v| v.into_iter().map(Version::from_db).collect())
    }

    /// Get a document's draft, if one exists.
    pub fn draft_of(db: &Connection, document: Uuid)
    -> Result<Option<Version>, DbError> {
        document_versions::table
            .filter(document_versions::document.eq(document)
                .and(document_versions::status.eq(VersionStatus::Draft)))
            .get_result::<db::DocumentVersion>(db)
            .optional()
            .map(|v| v.map(Version::from_db))
    }

    /// Get a document's version under review, if one exists.
    pub fn in_review_of(db: &Connection, document: Uuid)
    -> Result<Option<Version>, DbError> {
        document_versions::table
            .filter(document_versions::document.eq(document)
                .and(document_versions::status.eq(VersionStatus::InReview)))
            .get_result::<db::DocumentVersion>(db)
            .optional()
            .map(|v| v.map(Version::from_db))
    }

    /// Get a document's currently published version, if one exists.
    pub fn current_of(db: &Connection, document: Uuid)
    -> Result<Option<Version>, DbError> {
        document_versions::table
            .filter(document_versions::document.eq(document)
                .and(document_versions::is_current.eq(true)))
            .get_result::<db::DocumentVersion>(db)
            .optional()
            .map(|v| v.map(Version::from_db))
    }

    /// Get a document's most recently rejected version, if any.
    pub fn latest_rejected(db: &Connection, document: Uuid)
    -> Result<Option<Version>, DbError> {
        document_versions::table
            .filter(document_versions::document.eq(document)
                .and(document_versions::status.eq(VersionStatus::Rejected)))
            .order_by(document_versions::version_number.desc())
            .first::<db::DocumentVersion>(db)
            .optional()
            .map(|v| v.map(Version::from_db))
    }

    /// Next version number for a document.
    ///
    /// Numbers strictly increase and are never reused; they are assigned
    /// inside the same transaction that inserts the version.
    pub fn next_number(db: &Connection, document: Uuid)
    -> Result<i32, DbError> {
        document_versions::table
            .filter(document_versions::document.eq(document))
            .select(max(document_versions::version_number))
            .get_result::<Option<i32>>(db)
            .map(|n| n.unwrap_or(0) + 1)
    }

    /// Insert a new draft version.
    ///
    /// The caller is expected to have checked for an existing draft; under
    /// concurrent writers the partial unique index backs that check, and the
    /// resulting unique violation is translated by the caller.
    pub(crate) fn insert_draft(
        db: &Connection,
        document: Uuid,
        version_number: i32,
        supersedes: Option<i32>,
        content: &Value,
        rendered: Option<&str>,
        created_by: i32,
    ) -> Result<Version, DbError> {
        diesel::insert_into(document_versions::table)
            .values(db::NewDocumentVersion {
                document,
                version_number,
                status: VersionStatus::Draft,
                supersedes,
                content,
                rendered,
                created_by,
            })
            .get_result(db)
            .map(Version::from_db)
    }

    /// Get this version's structured content.
    pub fn content(&self) -> Result<Content, serde_json::Error> {
        Content::from_value(&self.data.content)
    }

    /// Replace this version's content.
    ///
    /// Only drafts can be edited; every other status means the content is
    /// frozen. The update is guarded by status in the database as well, so
    /// a concurrent submit cannot slip an edit into a frozen version.
    pub fn set_content(
        &mut self,
        db: &Connection,
        document: &Document,
        content: &Content,
        rendered: Option<&str>,
        actor: i32,
    ) -> Result<(), EditVersionError> {
        content.validate(document.kind)?;

        if self.data.status.is_frozen() {
            return Err(EditVersionError::Frozen(self.data.status));
        }

        let value = content.to_value();

        let data = diesel::update(document_versions::table
            .filter(document_versions::id.eq(self.data.id)
                .and(document_versions::status.eq(VersionStatus::Draft))))
            .set((
                document_versions::content.eq(&value),
                document_versions::rendered.eq(rendered),
            ))
            .get_result::<db::DocumentVersion>(db)
            .optional()?
            .ok_or(EditVersionError::Frozen(self.data.status))?;

        audit::append(
            db, actor, self.data.document, "set-content", "version",
            self.data.id, ())?;

        self.data = data;

        Ok(())
    }

    /// Get the public portion of this version's data.
    pub fn get_public(&self) -> PublicData {
        let db::DocumentVersion {
            id, document, version_number, status, supersedes, created_by,
            approved_by, approved_at, rejected_by, rejected_at, is_current,
            created_at, ..
        } = self.data;

        PublicData {
            id,
            document,
            version_number,
            status,
            supersedes,
            created_by,
            approved_by,
            approved_at,
            rejected_by,
            rejected_at,
            is_current,
            created_at,
        }
    }
}

impl std::ops::Deref for Version {
    type Target = db::DocumentVersion;

    fn deref(&self) -> &db::DocumentVersion {
        &self.data
    }
}

#[derive(Debug, Fail)]
pub enum FindVersionError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// No version found matching given criteria.
    #[fail(display = "No such version")]
    NotFound,
}

impl_from! { for FindVersionError ;
    DbError => |e| FindVersionError::Database(e),
}

#[derive(Debug, Fail)]
pub enum EditVersionError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// Version is not a draft and its content is frozen.
    #[fail(display = "Content of a version in state {} cannot change", _0)]
    Frozen(VersionStatus),
    /// Payload cannot be stored for this document.
    #[fail(display = "{}", _0)]
    Invalid(#[cause] ValidateContentError),
}

impl_from! { for EditVersionError ;
    DbError => |e| EditVersionError::Database(e),
    ValidateContentError => |e| EditVersionError::Invalid(e),
}
