use chrono::NaiveDateTime;
use diesel::{
    prelude::*,
    result::Error as DbError,
};
use failure::Fail;
use serde::Serialize;
use uuid::Uuid;

use crate::db::{
    Connection,
    models as db,
    schema::validations,
    types::ValidationStatus,
};
use super::{Version, version::FindVersionError};

/// One review cycle, tied 1:1 to the version currently under review.
#[derive(Clone, Debug)]
pub struct Validation {
    data: db::Validation,
}

/// A subset of validation's data that can safely be publicly exposed.
#[derive(Debug, Serialize)]
pub struct PublicData {
    pub id: i32,
    pub document: Uuid,
    pub status: ValidationStatus,
    pub observations: Option<String>,
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}

impl Validation {
    /// Construct `Validation` from its database counterpart.
    pub(crate) fn from_db(data: db::Validation) -> Validation {
        Validation { data }
    }

    /// Find a validation by ID.
    pub fn by_id(db: &Connection, id: i32)
    -> Result<Validation, FindValidationError> {
        validations::table
            .filter(validations::id.eq(id))
            .get_result::<db::Validation>(db)
            .optional()?
            .ok_or(FindValidationError::NotFound)
            .map(Validation::from_db)
    }

    /// Get all review cycles of a document, newest first.
    pub fn all_of(db: &Connection, document: Uuid)
    -> Result<Vec<Validation>, DbError> {
        validations::table
            .filter(validations::document.eq(document))
            .order_by(validations::created_at.desc())
            .then_order_by(validations::id.desc())
            .get_results(db)
            .map(|v| v.into_iter().map(Validation::from_db).collect())
    }

    /// Open a new review cycle for a document.
    pub(crate) fn create(db: &Connection, document: Uuid)
    -> Result<Validation, DbError> {
        diesel::insert_into(validations::table)
            .values(db::NewValidation { document })
            .get_result(db)
            .map(Validation::from_db)
    }

    /// Get the version this review cycle is about.
    pub fn version(&self, db: &Connection)
    -> Result<Version, FindVersionError> {
        Version::by_validation(db, self.data.id)
    }

    /// Get the public portion of this validation's data.
    pub fn get_public(&self) -> PublicData {
        let db::Validation {
            id, document, status, ref observations, created_at, completed_at,
        } = self.data;

        PublicData {
            id,
            document,
            status,
            observations: observations.clone(),
            created_at,
            completed_at,
        }
    }
}

impl std::ops::Deref for Validation {
    type Target = db::Validation;

    fn deref(&self) -> &db::Validation {
        &self.data
    }
}

#[derive(Debug, Fail)]
pub enum FindValidationError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// No validation found matching given criteria.
    #[fail(display = "No such validation")]
    NotFound,
}

impl_from! { for FindValidationError ;
    DbError => |e| FindValidationError::Database(e),
}
