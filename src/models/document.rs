use diesel::{
    Connection as _Connection,
    prelude::*,
    result::Error as DbError,
};
use failure::Fail;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    audit,
    db::{
        Connection,
        models as db,
        schema::documents,
        types::{DocumentKind, DocumentStatus},
    },
};
use super::{Version, Workspace};

/// Aggregate root of the versioning model.
///
/// A document itself carries no content; its content lives in
/// [`Version`][Version] snapshots, of which at most one is published at any
/// time. Documents are mutated only through the lifecycle engine's
/// transitions.
///
/// [Version]: ../version/struct.Version.html
#[derive(Clone, Debug)]
pub struct Document {
    data: db::Document,
}

/// A subset of document's data that can safely be publicly exposed.
#[derive(Debug, Serialize)]
pub struct PublicData {
    pub id: Uuid,
    pub workspace: i32,
    pub kind: DocumentKind,
    pub title: String,
    pub approved_version: Option<i32>,
    pub status: DocumentStatus,
}

impl Document {
    /// Construct `Document` from its database counterpart.
    pub(crate) fn from_db(data: db::Document) -> Document {
        Document { data }
    }

    /// Find a document by ID.
    pub fn by_id(db: &Connection, id: Uuid)
    -> Result<Document, FindDocumentError> {
        documents::table
            .filter(documents::id.eq(id))
            .get_result::<db::Document>(db)
            .optional()?
            .ok_or(FindDocumentError::NotFound)
            .map(Document::from_db)
    }

    /// Get all documents in a workspace.
    pub fn all_of(db: &Connection, workspace: &Workspace)
    -> Result<Vec<Document>, DbError> {
        documents::table
            .filter(documents::workspace.eq(workspace.id))
            .get_results(db)
            .map(|v| v.into_iter().map(Document::from_db).collect())
    }

    /// Create a new document with no versions.
    pub fn create(
        db: &Connection,
        workspace: &Workspace,
        kind: DocumentKind,
        title: &str,
        actor: i32,
    ) -> Result<Document, DbError> {
        db.transaction(|| {
            let data = diesel::insert_into(documents::table)
                .values(db::NewDocument {
                    id: Uuid::new_v4(),
                    workspace: workspace.id,
                    kind,
                    title,
                })
                .get_result::<db::Document>(db)?;

            audit::append(db, actor, data.id, "create", "document", data.id,
                LogNewDocument { kind, title })?;

            Ok(Document { data })
        })
    }

    /// Set this document's title.
    pub fn set_title(&mut self, db: &Connection, title: &str, actor: i32)
    -> Result<(), DbError> {
        db.transaction(|| {
            let data = diesel::update(&self.data)
                .set(documents::title.eq(title))
                .get_result::<db::Document>(db)?;

            audit::append(
                db, actor, self.data.id, "set-title", "document", self.data.id,
                title)?;

            self.data = data;

            Ok(())
        })
    }

    /// Get the currently published version, if any.
    pub fn current_version(&self, db: &Connection)
    -> Result<Option<Version>, DbError> {
        Version::current_of(db, self.data.id)
    }

    /// Get all versions of this document, oldest first.
    pub fn versions(&self, db: &Connection) -> Result<Vec<Version>, DbError> {
        Version::all_of(db, self.data.id)
    }

    /// Get the public portion of this document's data.
    pub fn get_public(&self) -> PublicData {
        let db::Document {
            id, workspace, kind, ref title, approved_version, status,
        } = self.data;

        PublicData {
            id,
            workspace,
            kind,
            title: title.clone(),
            approved_version,
            status,
        }
    }
}

impl std::ops::Deref for Document {
    type Target = db::Document;

    fn deref(&self) -> &db::Document {
        &self.data
    }
}

#[derive(Debug, Fail)]
pub enum FindDocumentError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// No document found matching given criteria.
    #[fail(display = "No such document")]
    NotFound,
}

impl_from! { for FindDocumentError ;
    DbError => |e| FindDocumentError::Database(e),
}

#[derive(Serialize)]
struct LogNewDocument<'a> {
    kind: DocumentKind,
    title: &'a str,
}
