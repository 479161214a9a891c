use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use std::fmt;

/// Discriminant selecting which payload variant a document carries.
#[derive(Clone, Copy, DbEnum, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[DieselType = "Document_kind"]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// A manufacturing or operating process description.
    Process,
    /// A recipe.
    Recipe,
}

/// Summary status of a document, mirroring the state of its latest activity.
#[derive(Clone, Copy, DbEnum, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[DieselType = "Document_status"]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    PendingValidation,
    Approved,
    Rejected,
}

/// Status of a single content snapshot.
#[derive(Clone, Copy, DbEnum, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[DieselType = "Version_status"]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    /// An editable, unpublished version.
    Draft,
    /// Submitted for approval; content frozen, blocks new drafts.
    InReview,
    /// The currently published version.
    Approved,
    /// Reviewed and declined; immutable, but can seed a new draft.
    Rejected,
    /// A formerly published version, superseded by a later approval.
    Obsolete,
}

impl VersionStatus {
    /// Can a new draft be cloned from a version in this state?
    pub fn can_seed_draft(self) -> bool {
        match self {
            VersionStatus::Approved | VersionStatus::Rejected => true,
            _ => false,
        }
    }

    /// Is content of a version in this state frozen?
    pub fn is_frozen(self) -> bool {
        match self {
            VersionStatus::Draft => false,
            _ => true,
        }
    }
}

/// Status of one review cycle.
#[derive(Clone, Copy, DbEnum, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[DieselType = "Validation_status"]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(match *self {
            DocumentKind::Process => "process",
            DocumentKind::Recipe => "recipe",
        })
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(match *self {
            VersionStatus::Draft => "draft",
            VersionStatus::InReview => "in_review",
            VersionStatus::Approved => "approved",
            VersionStatus::Rejected => "rejected",
            VersionStatus::Obsolete => "obsolete",
        })
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(match *self {
            ValidationStatus::Pending => "pending",
            ValidationStatus::Approved => "approved",
            ValidationStatus::Rejected => "rejected",
            ValidationStatus::Cancelled => "cancelled",
        })
    }
}
