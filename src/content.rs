//! Typed content payloads.
//!
//! A version's content is not a free-form blob. It is a kind-tagged document
//! validated at the storage boundary, so that a payload written for a process
//! can never end up attached to a recipe and vice versa.

use failure::Fail;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::types::DocumentKind;

/// Version of the payload schema this build reads and writes.
pub const SCHEMA_VERSION: i32 = 1;

/// Structured content of a document version.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Content {
    Process(ProcessContent),
    Recipe(RecipeContent),
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProcessContent {
    #[serde(default = "current_schema_version")]
    pub schema_version: i32,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub steps: Vec<ProcessStep>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProcessStep {
    pub name: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Expected duration, in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RecipeContent {
    #[serde(default = "current_schema_version")]
    pub schema_version: i32,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<String>,
}

impl Content {
    /// Kind of document this payload belongs to.
    pub fn kind(&self) -> DocumentKind {
        match *self {
            Content::Process(_) => DocumentKind::Process,
            Content::Recipe(_) => DocumentKind::Recipe,
        }
    }

    /// Empty template used for drafts created without a source version.
    pub fn empty(kind: DocumentKind) -> Content {
        match kind {
            DocumentKind::Process => Content::Process(ProcessContent {
                schema_version: SCHEMA_VERSION,
                summary: String::new(),
                steps: Vec::new(),
            }),
            DocumentKind::Recipe => Content::Recipe(RecipeContent {
                schema_version: SCHEMA_VERSION,
                summary: String::new(),
                servings: None,
                ingredients: Vec::new(),
                steps: Vec::new(),
            }),
        }
    }

    fn schema_version(&self) -> i32 {
        match *self {
            Content::Process(ref c) => c.schema_version,
            Content::Recipe(ref c) => c.schema_version,
        }
    }

    /// Verify this payload can be stored for a document of `kind`.
    pub fn validate(&self, kind: DocumentKind)
    -> Result<(), ValidateContentError> {
        if self.kind() != kind {
            return Err(ValidateContentError::KindMismatch {
                payload: self.kind(),
                document: kind,
            });
        }

        let version = self.schema_version();
        if version < 1 || version > SCHEMA_VERSION {
            return Err(ValidateContentError::UnknownSchemaVersion(version));
        }

        Ok(())
    }

    /// Deserialize a payload from its stored form.
    pub fn from_value(value: &Value) -> Result<Content, serde_json::Error> {
        serde_json::from_value(value.clone())
    }

    /// Serialize this payload into its stored form.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self)
            .expect("content payload serialization cannot fail")
    }
}

#[derive(Debug, Fail)]
pub enum ValidateContentError {
    /// Payload variant does not match the owning document's kind.
    #[fail(display = "payload is for a {}, but the document is a {}",
        payload, document)]
    KindMismatch {
        payload: DocumentKind,
        document: DocumentKind,
    },
    /// Payload was written by a newer (or nonsensical) schema.
    #[fail(display = "unknown content schema version {}", _0)]
    UnknownSchemaVersion(i32),
}

fn current_schema_version() -> i32 {
    SCHEMA_VERSION
}
