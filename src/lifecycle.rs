//! Document version lifecycle.
//!
//! A document's content moves through a fixed state machine:
//!
//! ```text
//! DRAFT --submit--> IN_REVIEW --approve--> APPROVED (prior current -> OBSOLETE)
//!                   IN_REVIEW --reject---> REJECTED
//!                   IN_REVIEW --cancel---> DRAFT
//! APPROVED --clone--> new DRAFT (supersedes = APPROVED)
//! REJECTED --clone--> new DRAFT (supersedes = REJECTED)
//! ```
//!
//! Every transition runs inside a single transaction scoped to one document:
//! current state is loaded, the actor's permissions are checked, the new state
//! is persisted together with the owning document's summary pointer and
//! status, and exactly one audit entry is appended. Nothing is retried here;
//! a conflict is reported to the caller and retrying is their decision.
//!
//! Two versions of the same document can never be drafts (or under review) at
//! the same time. The engine checks this before writing, and partial unique
//! indexes on `document_versions` repeat the check in the database, so a race
//! between two writers resolves into a single winner and a
//! [`CreateDraftError::DraftConflict`]/[`SubmitError::InReviewConflict`] for
//! the loser.
//!
//! Approving and rejecting are subject to segregation of duties: the version's
//! author can never be its reviewer, no matter what permissions they hold.

use chrono::Utc;
use diesel::{
    Connection as _Connection,
    prelude::*,
    result::{DatabaseErrorKind, Error as DbError},
};
use failure::Fail;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    Config,
    audit,
    content::{Content, ValidateContentError},
    db::{
        Connection,
        models as db,
        schema::{document_versions, documents, validations},
        types::{DocumentStatus, ValidationStatus, VersionStatus},
    },
    models::{
        Document,
        Validation,
        Version,
        document::FindDocumentError,
        validation::FindValidationError,
        version::{EditVersionError, FindVersionError},
    },
    permissions::{self, Permission, RequirePermissionError},
};

/// Orchestrator of all document state transitions.
pub struct LifecycleEngine<'c> {
    db: &'c Connection,
    /// Permission required to withdraw a version from review, in addition to
    /// being its author. `None` makes withdrawal ownership-only.
    cancel_permission: Option<Permission>,
}

impl<'c> LifecycleEngine<'c> {
    /// Create an engine over an explicit storage handle.
    pub fn new(db: &'c Connection) -> LifecycleEngine<'c> {
        LifecycleEngine {
            db,
            cancel_permission: Some(Permission::SubmitDocument),
        }
    }

    /// Create an engine configured from a [`Config`].
    pub fn with_config(db: &'c Connection, config: &Config)
    -> LifecycleEngine<'c> {
        LifecycleEngine {
            db,
            cancel_permission: config.lifecycle.cancel_permission,
        }
    }

    /// Get a document's draft, creating one if necessary.
    ///
    /// This operation is idempotent: an existing draft is returned unchanged.
    /// Otherwise a new draft is created, cloning its content from the first
    /// available of: the explicit `source`, the most recently rejected
    /// version, the currently published version, an empty template.
    pub fn get_or_create_draft(
        &self,
        document: Uuid,
        source: Option<i32>,
        actor: i32,
    ) -> Result<Version, CreateDraftError> {
        self.db.transaction(|| {
            self.create_draft_in_transaction(document, source, actor, false)
        })
    }

    /// Create a new draft from a finalized version.
    ///
    /// Unlike [`LifecycleEngine::get_or_create_draft`] the source must be
    /// approved or rejected; apart from that restriction the two operations
    /// are identical.
    pub fn clone_to_draft(
        &self,
        document: Uuid,
        source: i32,
        actor: i32,
    ) -> Result<Version, CreateDraftError> {
        self.db.transaction(|| {
            self.create_draft_in_transaction(document, Some(source), actor, true)
        })
    }

    fn create_draft_in_transaction(
        &self,
        document_id: Uuid,
        source: Option<i32>,
        actor: i32,
        finalized_source_only: bool,
    ) -> Result<Version, CreateDraftError> {
        let document = Document::by_id(self.db, document_id)?;

        permissions::require(
            self.db, actor, document.workspace, Permission::EditDocument)?;

        if let Some(draft) = Version::draft_of(self.db, document_id)? {
            return Ok(draft);
        }

        if Version::in_review_of(self.db, document_id)?.is_some() {
            return Err(CreateDraftError::InReviewConflict);
        }

        let source = match source {
            Some(id) => {
                let version = Version::by_id_of(self.db, document_id, id)?;

                if finalized_source_only && !version.status.can_seed_draft() {
                    return Err(CreateDraftError::BadSource(version.status));
                }

                Some(version)
            }
            None => match Version::latest_rejected(self.db, document_id)? {
                Some(version) => Some(version),
                None => Version::current_of(self.db, document_id)?,
            },
        };

        let number = Version::next_number(self.db, document_id)?;

        let (content, rendered, supersedes) = match source {
            Some(ref version) => (
                version.content.clone(),
                version.rendered.clone(),
                Some(version.id),
            ),
            None => (Content::empty(document.kind).to_value(), None, None),
        };

        let version = Version::insert_draft(
            self.db,
            document_id,
            number,
            supersedes,
            &content,
            rendered.as_ref().map(String::as_str),
            actor,
        )?;

        audit::append(
            self.db, actor, document_id, "create-draft", "version", version.id,
            LogNewDraft { version_number: number, supersedes })?;

        debug!("created draft {} (v{}) of document {}",
            version.id, number, document_id);

        Ok(version)
    }

    /// Submit a draft for review.
    ///
    /// Opens a pending [`Validation`] and freezes the version's content by
    /// moving it into review.
    pub fn submit_for_review(&self, version: i32, submitter: i32)
    -> Result<(Version, Validation), SubmitError> {
        self.db.transaction(|| {
            let version = Version::by_id(self.db, version)?;
            let document = Document::by_id(self.db, version.document)?;

            permissions::require(
                self.db, submitter, document.workspace,
                Permission::SubmitDocument)?;

            if version.status != VersionStatus::Draft {
                return Err(SubmitError::InvalidState(version.status));
            }

            if Version::in_review_of(self.db, document.id)?.is_some() {
                return Err(SubmitError::InReviewConflict);
            }

            let validation = Validation::create(self.db, document.id)?;

            // Concurrent submits resolve into a single winner here: the
            // status filter makes this update a compare-and-swap on the row,
            // and the partial unique index rejects a second in-review version
            // arriving through another draft.
            let version = diesel::update(document_versions::table
                    .filter(document_versions::id.eq(version.id)
                        .and(document_versions::status.eq(VersionStatus::Draft))))
                .set((
                    document_versions::status.eq(VersionStatus::InReview),
                    document_versions::validation.eq(validation.id),
                ))
                .get_result::<db::DocumentVersion>(self.db)
                .optional()?
                .map(Version::from_db)
                .ok_or(SubmitError::InReviewConflict)?;

            diesel::update(documents::table
                    .filter(documents::id.eq(document.id)))
                .set(documents::status.eq(DocumentStatus::PendingValidation))
                .execute(self.db)?;

            audit::append(
                self.db, submitter, document.id, "submit", "version",
                version.id, LogSubmit { validation: validation.id })?;

            info!("version {} of document {} submitted for review",
                version.id, document.id);

            Ok((version, validation))
        })
    }

    /// Approve the version under review.
    ///
    /// The version becomes the document's published one; the previously
    /// published version, if any, is demoted to obsolete in the same
    /// transaction.
    pub fn approve(&self, validation: i32, approver: i32)
    -> Result<Version, ApproveError> {
        self.db.transaction(|| {
            let validation = Validation::by_id(self.db, validation)?;

            if validation.status != ValidationStatus::Pending {
                return Err(ApproveError::InvalidState(validation.status));
            }

            let version = Version::by_validation(self.db, validation.id)?;
            let document = Document::by_id(self.db, version.document)?;

            permissions::require(
                self.db, approver, document.workspace,
                Permission::ReviewDocument)?;

            if version.created_by == approver {
                return Err(ApproveError::SegregationViolation);
            }

            let now = Utc::now().naive_utc();

            // Demote the previously published version first, keeping the
            // single-current index satisfied throughout.
            let demoted = diesel::update(document_versions::table
                    .filter(document_versions::document.eq(document.id)
                        .and(document_versions::is_current.eq(true))))
                .set((
                    document_versions::status.eq(VersionStatus::Obsolete),
                    document_versions::is_current.eq(false),
                ))
                .get_results::<db::DocumentVersion>(self.db)?
                .into_iter()
                .map(|v| v.id)
                .collect::<Vec<_>>();

            let version = diesel::update(document_versions::table
                    .filter(document_versions::id.eq(version.id)))
                .set((
                    document_versions::status.eq(VersionStatus::Approved),
                    document_versions::approved_by.eq(approver),
                    document_versions::approved_at.eq(now),
                    document_versions::is_current.eq(true),
                ))
                .get_result::<db::DocumentVersion>(self.db)
                .map(Version::from_db)?;

            diesel::update(validations::table
                    .filter(validations::id.eq(validation.id)))
                .set((
                    validations::status.eq(ValidationStatus::Approved),
                    validations::completed_at.eq(now),
                ))
                .execute(self.db)?;

            diesel::update(documents::table
                    .filter(documents::id.eq(document.id)))
                .set((
                    documents::approved_version.eq(version.id),
                    documents::status.eq(DocumentStatus::Approved),
                ))
                .execute(self.db)?;

            audit::append(
                self.db, approver, document.id, "approve", "validation",
                validation.id, LogApprove { version: version.id, demoted })?;

            info!("version {} of document {} approved by {}",
                version.id, document.id, approver);

            Ok(version)
        })
    }

    /// Reject the version under review.
    ///
    /// Rejection must carry the reviewer's observations; they are stored on
    /// the review cycle for the author to act on.
    pub fn reject(&self, validation: i32, rejector: i32, observations: &str)
    -> Result<Version, RejectError> {
        if observations.trim().is_empty() {
            return Err(RejectError::MissingObservations);
        }

        self.db.transaction(|| {
            let validation = Validation::by_id(self.db, validation)?;

            if validation.status != ValidationStatus::Pending {
                return Err(RejectError::InvalidState(validation.status));
            }

            let version = Version::by_validation(self.db, validation.id)?;
            let document = Document::by_id(self.db, version.document)?;

            permissions::require(
                self.db, rejector, document.workspace,
                Permission::ReviewDocument)?;

            if version.created_by == rejector {
                return Err(RejectError::SegregationViolation);
            }

            let now = Utc::now().naive_utc();

            let version = diesel::update(document_versions::table
                    .filter(document_versions::id.eq(version.id)))
                .set((
                    document_versions::status.eq(VersionStatus::Rejected),
                    document_versions::rejected_by.eq(rejector),
                    document_versions::rejected_at.eq(now),
                ))
                .get_result::<db::DocumentVersion>(self.db)
                .map(Version::from_db)?;

            diesel::update(validations::table
                    .filter(validations::id.eq(validation.id)))
                .set((
                    validations::status.eq(ValidationStatus::Rejected),
                    validations::observations.eq(observations),
                    validations::completed_at.eq(now),
                ))
                .execute(self.db)?;

            diesel::update(documents::table
                    .filter(documents::id.eq(document.id)))
                .set(documents::status.eq(DocumentStatus::Rejected))
                .execute(self.db)?;

            audit::append(
                self.db, rejector, document.id, "reject", "validation",
                validation.id, LogReject { version: version.id, observations })?;

            info!("version {} of document {} rejected by {}",
                version.id, document.id, rejector);

            Ok(version)
        })
    }

    /// Withdraw a version from review, reverting it to a draft.
    ///
    /// Only the version's author can withdraw it. The review cycle is closed
    /// as cancelled and the link between the two is cleared.
    pub fn cancel_submission(&self, document: Uuid, version: i32, actor: i32)
    -> Result<Version, CancelError> {
        self.db.transaction(|| {
            let document = Document::by_id(self.db, document)?;
            let version = Version::by_id_of(self.db, document.id, version)?;

            if version.created_by != actor {
                return Err(CancelError::NotOwner);
            }

            if let Some(permission) = self.cancel_permission {
                permissions::require(
                    self.db, actor, document.workspace, permission)?;
            }

            if version.status != VersionStatus::InReview {
                return Err(CancelError::InvalidState(version.status));
            }

            let validation = version.validation.expect(
                "database inconsistency: version in review without validation");

            let version = diesel::update(document_versions::table
                    .filter(document_versions::id.eq(version.id)))
                .set((
                    document_versions::status.eq(VersionStatus::Draft),
                    document_versions::validation
                        .eq(None::<i32>),
                ))
                .get_result::<db::DocumentVersion>(self.db)
                .map(Version::from_db)?;

            diesel::update(validations::table
                    .filter(validations::id.eq(validation)))
                .set((
                    validations::status.eq(ValidationStatus::Cancelled),
                    validations::completed_at.eq(Utc::now().naive_utc()),
                ))
                .execute(self.db)?;

            diesel::update(documents::table
                    .filter(documents::id.eq(document.id)))
                .set(documents::status.eq(DocumentStatus::Draft))
                .execute(self.db)?;

            audit::append(
                self.db, actor, document.id, "cancel", "validation",
                validation, LogCancel { version: version.id })?;

            info!("version {} of document {} withdrawn from review",
                version.id, document.id);

            Ok(version)
        })
    }

    /// Replace the content of a document's draft.
    pub fn update_draft_content(
        &self,
        document: Uuid,
        version: i32,
        content: &Content,
        rendered: Option<&str>,
        actor: i32,
    ) -> Result<Version, EditDraftError> {
        self.db.transaction(|| {
            let document = Document::by_id(self.db, document)?;

            permissions::require(
                self.db, actor, document.workspace, Permission::EditDocument)?;

            let mut version = Version::by_id_of(self.db, document.id, version)?;
            version.set_content(self.db, &document, content, rendered, actor)?;

            Ok(version)
        })
    }

    /// Check whether editing of a document is currently blocked.
    ///
    /// Editing is blocked if and only if a version is under review. A
    /// document whose latest version is approved has no editable draft
    /// either, but is not blocked: a new draft can be created at any time.
    pub fn check_version_immutable(&self, document: Uuid)
    -> Result<Immutability, FindDocumentError> {
        let document = Document::by_id(self.db, document)?;

        match Version::in_review_of(self.db, document.id)? {
            Some(version) => Ok(Immutability {
                immutable: true,
                reason: Some(format!(
                    "version {} is under review", version.version_number)),
            }),
            None => Ok(Immutability {
                immutable: false,
                reason: None,
            }),
        }
    }
}

/// Result of [`LifecycleEngine::check_version_immutable`].
#[derive(Clone, Debug, Serialize)]
pub struct Immutability {
    pub immutable: bool,
    /// Human-readable explanation, present when editing is blocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Fail)]
pub enum CreateDraftError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// No document found matching given criteria.
    #[fail(display = "No such document")]
    NotFound,
    /// The requested source version does not exist in this document.
    #[fail(display = "No such source version")]
    SourceNotFound,
    /// The requested source version cannot seed a new draft.
    #[fail(display = "A draft cannot be cloned from a version in state {}", _0)]
    BadSource(VersionStatus),
    /// A version of this document is under review, blocking new drafts.
    #[fail(display = "A version of this document is under review")]
    InReviewConflict,
    /// Another draft was created concurrently.
    #[fail(display = "A draft of this document already exists")]
    DraftConflict,
    /// Actor does not hold the required permission.
    #[fail(display = "Missing required permission: {}", _0)]
    PermissionDenied(Permission),
}

impl_from! { for CreateDraftError ;
    DbError => |e| match e {
        DbError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) =>
            CreateDraftError::DraftConflict,
        e => CreateDraftError::Database(e),
    },
    FindDocumentError => |e| match e {
        FindDocumentError::Database(e) => CreateDraftError::Database(e),
        FindDocumentError::NotFound => CreateDraftError::NotFound,
    },
    FindVersionError => |e| match e {
        FindVersionError::Database(e) => CreateDraftError::Database(e),
        FindVersionError::NotFound => CreateDraftError::SourceNotFound,
    },
    RequirePermissionError => |e| match e {
        RequirePermissionError::Database(e) => CreateDraftError::Database(e),
        RequirePermissionError::Missing(p) =>
            CreateDraftError::PermissionDenied(p),
    },
}

#[derive(Debug, Fail)]
pub enum SubmitError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// No version found matching given criteria.
    #[fail(display = "No such version")]
    NotFound,
    /// Only drafts can be submitted for review.
    #[fail(display = "A version in state {} cannot be submitted for review", _0)]
    InvalidState(VersionStatus),
    /// Another version of this document is already under review.
    #[fail(display = "A version of this document is already under review")]
    InReviewConflict,
    /// Actor does not hold the required permission.
    #[fail(display = "Missing required permission: {}", _0)]
    PermissionDenied(Permission),
}

impl_from! { for SubmitError ;
    DbError => |e| match e {
        DbError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) =>
            SubmitError::InReviewConflict,
        e => SubmitError::Database(e),
    },
    FindVersionError => |e| match e {
        FindVersionError::Database(e) => SubmitError::Database(e),
        FindVersionError::NotFound => SubmitError::NotFound,
    },
    FindDocumentError => |e| match e {
        FindDocumentError::Database(e) => SubmitError::Database(e),
        FindDocumentError::NotFound => SubmitError::NotFound,
    },
    RequirePermissionError => |e| match e {
        RequirePermissionError::Database(e) => SubmitError::Database(e),
        RequirePermissionError::Missing(p) => SubmitError::PermissionDenied(p),
    },
}

#[derive(Debug, Fail)]
pub enum ApproveError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// No validation found matching given criteria.
    #[fail(display = "No such validation")]
    NotFound,
    /// The review cycle has already been concluded.
    #[fail(display = "Validation is {}, not pending", _0)]
    InvalidState(ValidationStatus),
    /// The version's author cannot review it.
    #[fail(display = "A version cannot be approved by its author")]
    SegregationViolation,
    /// Actor does not hold the required permission.
    #[fail(display = "Missing required permission: {}", _0)]
    PermissionDenied(Permission),
}

impl_from! { for ApproveError ;
    DbError => |e| ApproveError::Database(e),
    FindValidationError => |e| match e {
        FindValidationError::Database(e) => ApproveError::Database(e),
        FindValidationError::NotFound => ApproveError::NotFound,
    },
    FindVersionError => |e| match e {
        FindVersionError::Database(e) => ApproveError::Database(e),
        FindVersionError::NotFound => ApproveError::NotFound,
    },
    FindDocumentError => |e| match e {
        FindDocumentError::Database(e) => ApproveError::Database(e),
        FindDocumentError::NotFound => ApproveError::NotFound,
    },
    RequirePermissionError => |e| match e {
        RequirePermissionError::Database(e) => ApproveError::Database(e),
        RequirePermissionError::Missing(p) => ApproveError::PermissionDenied(p),
    },
}

#[derive(Debug, Fail)]
pub enum RejectError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// No validation found matching given criteria.
    #[fail(display = "No such validation")]
    NotFound,
    /// The review cycle has already been concluded.
    #[fail(display = "Validation is {}, not pending", _0)]
    InvalidState(ValidationStatus),
    /// The version's author cannot review it.
    #[fail(display = "A version cannot be rejected by its author")]
    SegregationViolation,
    /// Rejection observations are required and cannot be blank.
    #[fail(display = "Rejection requires observations")]
    MissingObservations,
    /// Actor does not hold the required permission.
    #[fail(display = "Missing required permission: {}", _0)]
    PermissionDenied(Permission),
}

impl_from! { for RejectError ;
    DbError => |e| RejectError::Database(e),
    FindValidationError => |e| match e {
        FindValidationError::Database(e) => RejectError::Database(e),
        FindValidationError::NotFound => RejectError::NotFound,
    },
    FindVersionError => |e| match e {
        FindVersionError::Database(e) => RejectError::Database(e),
        FindVersionError::NotFound => RejectError::NotFound,
    },
    FindDocumentError => |e| match e {
        FindDocumentError::Database(e) => RejectError::Database(e),
        FindDocumentError::NotFound => RejectError::NotFound,
    },
    RequirePermissionError => |e| match e {
        RequirePermissionError::Database(e) => RejectError::Database(e),
        RequirePermissionError::Missing(p) => RejectError::PermissionDenied(p),
    },
}

#[derive(Debug, Fail)]
pub enum CancelError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// No document or version found matching given criteria.
    #[fail(display = "No such version")]
    NotFound,
    /// Only versions under review can be withdrawn.
    #[fail(display = "A version in state {} cannot be withdrawn from review", _0)]
    InvalidState(VersionStatus),
    /// Only the version's author can withdraw it from review.
    #[fail(display = "Only the version's author can withdraw it from review")]
    NotOwner,
    /// Actor does not hold the required permission.
    #[fail(display = "Missing required permission: {}", _0)]
    PermissionDenied(Permission),
}

impl_from! { for CancelError ;
    DbError => |e| CancelError::Database(e),
    FindDocumentError => |e| match e {
        FindDocumentError::Database(e) => CancelError::Database(e),
        FindDocumentError::NotFound => CancelError::NotFound,
    },
    FindVersionError => |e| match e {
        FindVersionError::Database(e) => CancelError::Database(e),
        FindVersionError::NotFound => CancelError::NotFound,
    },
    RequirePermissionError => |e| match e {
        RequirePermissionError::Database(e) => CancelError::Database(e),
        RequirePermissionError::Missing(p) => CancelError::PermissionDenied(p),
    },
}

#[derive(Debug, Fail)]
pub enum EditDraftError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// No document or version found matching given criteria.
    #[fail(display = "No such version")]
    NotFound,
    /// Version is not a draft and its content is frozen.
    #[fail(display = "Content of a version in state {} cannot change", _0)]
    Frozen(VersionStatus),
    /// Payload cannot be stored for this document.
    #[fail(display = "{}", _0)]
    Invalid(#[cause] ValidateContentError),
    /// Actor does not hold the required permission.
    #[fail(display = "Missing required permission: {}", _0)]
    PermissionDenied(Permission),
}

impl_from! { for EditDraftError ;
    DbError => |e| EditDraftError::Database(e),
    FindDocumentError => |e| match e {
        FindDocumentError::Database(e) => EditDraftError::Database(e),
        FindDocumentError::NotFound => EditDraftError::NotFound,
    },
    FindVersionError => |e| match e {
        FindVersionError::Database(e) => EditDraftError::Database(e),
        FindVersionError::NotFound => EditDraftError::NotFound,
    },
    EditVersionError => |e| match e {
        EditVersionError::Database(e) => EditDraftError::Database(e),
        EditVersionError::Frozen(status) => EditDraftError::Frozen(status),
        EditVersionError::Invalid(e) => EditDraftError::Invalid(e),
    },
    RequirePermissionError => |e| match e {
        RequirePermissionError::Database(e) => EditDraftError::Database(e),
        RequirePermissionError::Missing(p) => EditDraftError::PermissionDenied(p),
    },
}

#[derive(Serialize)]
struct LogNewDraft {
    version_number: i32,
    supersedes: Option<i32>,
}

#[derive(Serialize)]
struct LogSubmit {
    validation: i32,
}

#[derive(Serialize)]
struct LogApprove {
    version: i32,
    demoted: Vec<i32>,
}

#[derive(Serialize)]
struct LogReject<'a> {
    version: i32,
    observations: &'a str,
}

#[derive(Serialize)]
struct LogCancel {
    version: i32,
}

#[cfg(test)]
mod tests {
    use crate::db::types::VersionStatus;

    #[test]
    fn only_finalized_versions_seed_drafts() {
        assert!(VersionStatus::Approved.can_seed_draft());
        assert!(VersionStatus::Rejected.can_seed_draft());
        assert!(!VersionStatus::Draft.can_seed_draft());
        assert!(!VersionStatus::InReview.can_seed_draft());
        assert!(!VersionStatus::Obsolete.can_seed_draft());
    }

    #[test]
    fn only_drafts_are_editable() {
        assert!(!VersionStatus::Draft.is_frozen());
        assert!(VersionStatus::InReview.is_frozen());
        assert!(VersionStatus::Approved.is_frozen());
        assert!(VersionStatus::Rejected.is_frozen());
        assert!(VersionStatus::Obsolete.is_frozen());
    }
}
