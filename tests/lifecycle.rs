//! Tests for the document version lifecycle.

use std::sync::{Arc, Barrier};
use std::thread;

use failure::{Error, Fallible};
use lazy_static::lazy_static;
use redline::{
    LifecycleEngine,
    audit,
    content::{Content, ProcessContent, ProcessStep, SCHEMA_VERSION},
    db::types::{
        DocumentKind, DocumentStatus, ValidationStatus, VersionStatus,
    },
    lifecycle::{
        ApproveError, CancelError, CreateDraftError, EditDraftError,
        RejectError, SubmitError,
    },
    models::{Document, Role, User, Validation, Version, Workspace},
    permissions::Permission,
};

mod common;

use self::common::{
    Connection, Database, run_test, run_test_with_pool, setup_db,
};

const WORKSPACE: i32 = 1;
const AUTHOR: i32 = 1;
const REVIEWER: i32 = 2;
const OUTSIDER: i32 = 3;

lazy_static! {
    static ref DATABASE: Database = setup_db(seed)
        .expect("cannot set up test database");
}

fn seed(db: &Connection) -> Result<(), Error> {
    let author = User::create(db, "author@redline.test", "Author")?;
    let reviewer = User::create(db, "reviewer@redline.test", "Reviewer")?;
    let _outsider = User::create(db, "outsider@redline.test", "Outsider")?;

    let workspace = Workspace::create(db, "Test kitchen")?;

    let editors = Role::create(db, &workspace, "editor", &[
        Permission::EditDocument,
        Permission::SubmitDocument,
    ])?;
    let reviewers = Role::create(db, &workspace, "reviewer", &[
        Permission::EditDocument,
        Permission::SubmitDocument,
        Permission::ReviewDocument,
    ])?;

    workspace.add_member(db, &author, &editors)?;
    workspace.add_member(db, &reviewer, &reviewers)?;

    Ok(())
}

fn create_document(db: &Connection, kind: DocumentKind)
-> Fallible<Document> {
    let workspace = Workspace::by_id(db, WORKSPACE)?;
    let document = Document::create(db, &workspace, kind, "Bolognese", AUTHOR)?;
    Ok(document)
}

/// Run a draft through a full review cycle, approved by `REVIEWER`.
fn approve_new_draft(db: &Connection, document: &Document)
-> Fallible<Version> {
    let engine = LifecycleEngine::new(db);
    let draft = engine.get_or_create_draft(document.id, None, AUTHOR)?;
    let (_, validation) = engine.submit_for_review(draft.id, AUTHOR)?;
    let approved = engine.approve(validation.id, REVIEWER)?;
    Ok(approved)
}

fn sample_process() -> Content {
    Content::Process(ProcessContent {
        schema_version: SCHEMA_VERSION,
        summary: "Pasteurise the base".into(),
        steps: vec![
            ProcessStep {
                name: "Heat".into(),
                instructions: "Bring to 85C and hold".into(),
                equipment: vec!["kettle".into()],
                duration: Some(15),
            },
        ],
    })
}

#[test]
fn full_approval_flow() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Process)?;
        let engine = LifecycleEngine::new(db);

        let draft = engine.get_or_create_draft(document.id, None, AUTHOR)?;
        assert_eq!(draft.version_number, 1);
        assert_eq!(draft.status, VersionStatus::Draft);
        assert_eq!(draft.created_by, AUTHOR);
        assert_eq!(draft.supersedes, None);

        let (version, validation) =
            engine.submit_for_review(draft.id, AUTHOR)?;
        assert_eq!(version.status, VersionStatus::InReview);
        assert_eq!(version.validation, Some(validation.id));
        assert_eq!(validation.status, ValidationStatus::Pending);

        let document = Document::by_id(db, document.id)?;
        assert_eq!(document.status, DocumentStatus::PendingValidation);

        let version = engine.approve(validation.id, REVIEWER)?;
        assert_eq!(version.status, VersionStatus::Approved);
        assert!(version.is_current);
        assert_eq!(version.approved_by, Some(REVIEWER));
        assert!(version.approved_at.is_some());

        let validation = Validation::by_id(db, validation.id)?;
        assert_eq!(validation.status, ValidationStatus::Approved);
        assert!(validation.completed_at.is_some());

        let document = Document::by_id(db, document.id)?;
        assert_eq!(document.status, DocumentStatus::Approved);
        assert_eq!(document.approved_version, Some(version.id));

        Ok(())
    });
}

#[test]
fn draft_creation_is_idempotent() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Recipe)?;
        let engine = LifecycleEngine::new(db);

        let first = engine.get_or_create_draft(document.id, None, AUTHOR)?;
        let second = engine.get_or_create_draft(document.id, None, AUTHOR)?;

        assert_eq!(first.id, second.id);
        assert_eq!(Version::all_of(db, document.id)?.len(), 1);

        Ok(())
    });
}

#[test]
fn new_draft_supersedes_published_version() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Process)?;
        let published = approve_new_draft(db, &document)?;

        let engine = LifecycleEngine::new(db);
        let draft = engine.get_or_create_draft(document.id, None, AUTHOR)?;

        assert_eq!(draft.version_number, 2);
        assert_eq!(draft.supersedes, Some(published.id));
        assert_eq!(draft.content, published.content);

        Ok(())
    });
}

#[test]
fn rejection_and_rework() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Process)?;
        let engine = LifecycleEngine::new(db);

        let draft = engine.get_or_create_draft(document.id, None, AUTHOR)?;
        let draft = engine.update_draft_content(
            document.id, draft.id, &sample_process(), Some("# Bolognese"),
            AUTHOR)?;

        let (_, validation) = engine.submit_for_review(draft.id, AUTHOR)?;
        let rejected =
            engine.reject(validation.id, REVIEWER, "fix step timings")?;

        assert_eq!(rejected.status, VersionStatus::Rejected);
        assert_eq!(rejected.rejected_by, Some(REVIEWER));
        assert!(rejected.rejected_at.is_some());

        let validation = Validation::by_id(db, validation.id)?;
        assert_eq!(validation.status, ValidationStatus::Rejected);
        assert_eq!(
            validation.observations.as_ref().map(String::as_str),
            Some("fix step timings"),
        );

        let document_data = Document::by_id(db, document.id)?;
        assert_eq!(document_data.status, DocumentStatus::Rejected);

        // Rework: a new draft cloned explicitly from the rejected version.
        let rework = engine.get_or_create_draft(
            document.id, Some(rejected.id), AUTHOR)?;
        assert_eq!(rework.version_number, 3);
        assert_eq!(rework.supersedes, Some(rejected.id));
        assert_eq!(rework.content, rejected.content);

        Ok(())
    });
}

#[test]
fn rejected_version_is_preferred_draft_source() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Process)?;
        let published = approve_new_draft(db, &document)?;

        let engine = LifecycleEngine::new(db);
        let draft = engine.get_or_create_draft(document.id, None, AUTHOR)?;
        let draft = engine.update_draft_content(
            document.id, draft.id, &sample_process(), None, AUTHOR)?;
        let (_, validation) = engine.submit_for_review(draft.id, AUTHOR)?;
        let rejected = engine.reject(validation.id, REVIEWER, "too vague")?;

        // With no explicit source the rejected version wins over the
        // published one.
        let rework = engine.get_or_create_draft(document.id, None, AUTHOR)?;
        assert_eq!(rework.supersedes, Some(rejected.id));
        assert_ne!(rework.content, published.content);
        assert_eq!(rework.content, rejected.content);

        Ok(())
    });
}

#[test]
fn rejection_requires_observations() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Process)?;
        let engine = LifecycleEngine::new(db);

        let draft = engine.get_or_create_draft(document.id, None, AUTHOR)?;
        let (version, validation) =
            engine.submit_for_review(draft.id, AUTHOR)?;

        for &observations in &["", "   ", "\t\n"] {
            match engine.reject(validation.id, REVIEWER, observations) {
                Err(RejectError::MissingObservations) => (),
                other => panic!("expected MissingObservations, got {:?}", other),
            }
        }

        // State is unchanged.
        let version = Version::by_id(db, version.id)?;
        assert_eq!(version.status, VersionStatus::InReview);
        let validation = Validation::by_id(db, validation.id)?;
        assert_eq!(validation.status, ValidationStatus::Pending);

        Ok(())
    });
}

#[test]
fn author_cannot_review_own_version() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let workspace = Workspace::by_id(db, WORKSPACE)?;
        let document = Document::create(
            db, &workspace, DocumentKind::Process, "Bolognese", REVIEWER)?;
        let engine = LifecycleEngine::new(db);

        // The reviewer authors this version themselves, so holding
        // document:review does not let them conclude the cycle.
        let draft = engine.get_or_create_draft(document.id, None, REVIEWER)?;
        let (version, validation) =
            engine.submit_for_review(draft.id, REVIEWER)?;

        match engine.approve(validation.id, REVIEWER) {
            Err(ApproveError::SegregationViolation) => (),
            other => panic!("expected SegregationViolation, got {:?}", other),
        }

        match engine.reject(validation.id, REVIEWER, "looks wrong") {
            Err(RejectError::SegregationViolation) => (),
            other => panic!("expected SegregationViolation, got {:?}", other),
        }

        // The author, lacking document:review, is stopped by RBAC instead.
        match engine.approve(validation.id, AUTHOR) {
            Err(ApproveError::PermissionDenied(Permission::ReviewDocument)) =>
                (),
            other => panic!("expected PermissionDenied, got {:?}", other),
        }

        // Nothing moved.
        let version = Version::by_id(db, version.id)?;
        assert_eq!(version.status, VersionStatus::InReview);
        let validation = Validation::by_id(db, validation.id)?;
        assert_eq!(validation.status, ValidationStatus::Pending);

        Ok(())
    });
}

#[test]
fn approval_demotes_previous_version() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Process)?;
        let first = approve_new_draft(db, &document)?;
        let second = approve_new_draft(db, &document)?;

        let first = Version::by_id(db, first.id)?;
        assert_eq!(first.status, VersionStatus::Obsolete);
        assert!(!first.is_current);

        let second = Version::by_id(db, second.id)?;
        assert_eq!(second.status, VersionStatus::Approved);
        assert!(second.is_current);

        let document = Document::by_id(db, document.id)?;
        assert_eq!(document.approved_version, Some(second.id));

        // Exactly one version is ever current, and it is the approved one.
        let versions = Version::all_of(db, document.id)?;
        assert_eq!(versions.iter().filter(|v| v.is_current).count(), 1);
        assert_eq!(
            versions.iter()
                .filter(|v| v.status == VersionStatus::Obsolete)
                .count(),
            1,
        );

        Ok(())
    });
}

#[test]
fn review_blocks_editing() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Process)?;
        let engine = LifecycleEngine::new(db);

        let draft = engine.get_or_create_draft(document.id, None, AUTHOR)?;
        let (version, _) = engine.submit_for_review(draft.id, AUTHOR)?;

        let lock = engine.check_version_immutable(document.id)?;
        assert!(lock.immutable);
        assert!(lock.reason.is_some());

        match engine.get_or_create_draft(document.id, None, AUTHOR) {
            Err(CreateDraftError::InReviewConflict) => (),
            other => panic!("expected InReviewConflict, got {:?}", other),
        }

        match engine.update_draft_content(
            document.id, version.id, &sample_process(), None, AUTHOR,
        ) {
            Err(EditDraftError::Frozen(VersionStatus::InReview)) => (),
            other => panic!("expected Frozen, got {:?}", other),
        }

        // Withdrawing the submission unblocks editing again.
        engine.cancel_submission(document.id, version.id, AUTHOR)?;
        let lock = engine.check_version_immutable(document.id)?;
        assert!(!lock.immutable);
        assert_eq!(lock.reason, None);

        Ok(())
    });
}

#[test]
fn approved_document_stays_editable() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Process)?;
        approve_new_draft(db, &document)?;

        // Approved, but nothing under review: not immutable.
        let engine = LifecycleEngine::new(db);
        let lock = engine.check_version_immutable(document.id)?;
        assert!(!lock.immutable);

        Ok(())
    });
}

#[test]
fn cancel_requires_author() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Process)?;
        let engine = LifecycleEngine::new(db);

        let draft = engine.get_or_create_draft(document.id, None, AUTHOR)?;
        let (version, validation) =
            engine.submit_for_review(draft.id, AUTHOR)?;

        match engine.cancel_submission(document.id, version.id, REVIEWER) {
            Err(CancelError::NotOwner) => (),
            other => panic!("expected NotOwner, got {:?}", other),
        }

        let version =
            engine.cancel_submission(document.id, version.id, AUTHOR)?;
        assert_eq!(version.status, VersionStatus::Draft);
        assert_eq!(version.validation, None);

        let validation = Validation::by_id(db, validation.id)?;
        assert_eq!(validation.status, ValidationStatus::Cancelled);
        assert!(validation.completed_at.is_some());

        let document = Document::by_id(db, document.id)?;
        assert_eq!(document.status, DocumentStatus::Draft);

        Ok(())
    });
}

#[test]
fn clone_requires_finalized_source() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Process)?;
        let first = approve_new_draft(db, &document)?;
        let second = approve_new_draft(db, &document)?;

        let engine = LifecycleEngine::new(db);

        // An obsolete version can no longer seed a draft.
        match engine.clone_to_draft(document.id, first.id, AUTHOR) {
            Err(CreateDraftError::BadSource(VersionStatus::Obsolete)) => (),
            other => panic!("expected BadSource, got {:?}", other),
        }

        let draft = engine.clone_to_draft(document.id, second.id, AUTHOR)?;
        assert_eq!(draft.supersedes, Some(second.id));
        assert_eq!(draft.status, VersionStatus::Draft);

        Ok(())
    });
}

#[test]
fn missing_source_version_is_reported() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Process)?;
        let engine = LifecycleEngine::new(db);

        match engine.get_or_create_draft(document.id, Some(4181), AUTHOR) {
            Err(CreateDraftError::SourceNotFound) => (),
            other => panic!("expected SourceNotFound, got {:?}", other),
        }

        Ok(())
    });
}

#[test]
fn draft_content_must_match_kind() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Recipe)?;
        let engine = LifecycleEngine::new(db);

        let draft = engine.get_or_create_draft(document.id, None, AUTHOR)?;

        match engine.update_draft_content(
            document.id, draft.id, &sample_process(), None, AUTHOR,
        ) {
            Err(EditDraftError::Invalid(_)) => (),
            other => panic!("expected Invalid, got {:?}", other),
        }

        Ok(())
    });
}

#[test]
fn outsider_cannot_create_draft() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Process)?;
        let engine = LifecycleEngine::new(db);

        match engine.get_or_create_draft(document.id, None, OUTSIDER) {
            Err(CreateDraftError::PermissionDenied(
                Permission::EditDocument)) => (),
            other => panic!("expected PermissionDenied, got {:?}", other),
        }

        Ok(())
    });
}

#[test]
fn concurrent_submission_single_winner() {
    run_test_with_pool(&*DATABASE, |pool| -> Fallible<()> {
        let conn = pool.get()?;
        let document = create_document(&conn, DocumentKind::Process)?;
        let draft = LifecycleEngine::new(&conn)
            .get_or_create_draft(document.id, None, AUTHOR)?;
        let draft_id = draft.id;
        drop(conn);

        let barrier = Arc::new(Barrier::new(2));

        let handles = (0..2)
            .map(|_| {
                let pool = pool.clone();
                let barrier = Arc::clone(&barrier);

                thread::spawn(move || {
                    let conn = pool.get().unwrap();
                    barrier.wait();
                    LifecycleEngine::new(&conn)
                        .submit_for_review(draft_id, AUTHOR)
                        .map(|_| ())
                })
            })
            .collect::<Vec<_>>();

        let results = handles.into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>();

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);

        for result in results {
            match result {
                Ok(())
                | Err(SubmitError::InReviewConflict)
                | Err(SubmitError::InvalidState(_)) => (),
                Err(err) => panic!("unexpected error: {}", err),
            }
        }

        let conn = pool.get()?;
        let version = Version::by_id(&conn, draft_id)?;
        assert_eq!(version.status, VersionStatus::InReview);

        let pending = Validation::all_of(&conn, document.id)?
            .iter()
            .filter(|v| v.status == ValidationStatus::Pending)
            .count();
        assert_eq!(pending, 1);

        Ok(())
    });
}

#[test]
fn audit_trail_records_transitions() {
    run_test(&*DATABASE, |db| -> Fallible<()> {
        let document = create_document(db, DocumentKind::Process)?;
        let engine = LifecycleEngine::new(db);

        let draft = engine.get_or_create_draft(document.id, None, AUTHOR)?;
        let (_, validation) = engine.submit_for_review(draft.id, AUTHOR)?;
        engine.approve(validation.id, REVIEWER)?;

        let trail = audit::history(db, document.id)?;
        let actions = trail.iter()
            .map(|entry| entry.action.as_str())
            .collect::<Vec<_>>();

        // Newest first, one entry per transition.
        assert_eq!(actions, ["approve", "submit", "create-draft", "create"]);

        assert_eq!(trail[0].actor, Some(REVIEWER));
        assert_eq!(trail[1].actor, Some(AUTHOR));
        assert!(trail.iter().all(|entry| entry.document == Some(document.id)));

        Ok(())
    });
}
