use diesel::{
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
        schema::users,
    },
};

#[derive(Clone, Debug)]
pub struct User {
    data: db::User,
}

/// A subset of user's data that can safely be publicly exposed.
#[derive(Debug, Serialize)]
pub struct PublicData {
    pub id: i32,
    pub name: String,
}

impl User {
    /// Construct `User` from its database counterpart.
    pub(crate) fn from_db(data: db::User) -> User {
        User { data }
    }

    /// Find a user by ID.
    pub fn by_id(db: &Connection, id: i32) -> Result<User, FindUserError> {
        users::table
            .filter(users::id.eq(id))
            .get_result::<db::User>(db)
            .optional()?
            .ok_or(FindUserError::NotFound)
            .map(User::from_db)
    }

    /// Find a user by email address.
    pub fn by_email(db: &Connection, email: &str)
    -> Result<User, FindUserError> {
        users::table
            .filter(users::email.eq(email))
            .get_result::<db::User>(db)
            .optional()?
            .ok_or(FindUserError::NotFound)
            .map(User::from_db)
    }

    /// Create a new user.
    pub fn create(db: &Connection, email: &str, name: &str)
    -> Result<User, CreateUserError> {
        let data = diesel::insert_into(users::table)
            .values(db::NewUser { email, name })
            .get_result::<db::User>(db)?;

        audit::append_global(
            db, audit::Actor::System, "create", "user", data.id, ())?;

        Ok(User { data })
    }

    /// Get the public portion of this user's data.
    pub fn get_public(&self) -> PublicData {
        PublicData {
            id: self.data.id,
            name: self.data.name.clone(),
        }
    }
}

impl std::ops::Deref for User {
    type Target = db::User;

    fn deref(&self) -> &db::User {
        &self.data
    }
}

#[derive(Debug, Fail)]
pub enum FindUserError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// No user found matching given criteria.
    #[fail(display = "No such user")]
    NotFound,
}

impl_from! { for FindUserError ;
    DbError => |e| FindUserError::Database(e),
}

#[derive(Debug, Fail)]
pub enum CreateUserError {
    /// Database error.
    #[fail(display = "Database error: {}", _0)]
    Database(#[cause] DbError),
    /// Duplicate user.
    #[fail(display = "A user with this email address already exists")]
    Duplicate,
}

impl_from! { for CreateUserError ;
    DbError => |e| match e {
        DbError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) =>
            CreateUserError::Duplicate,
        _ => CreateUserError::Database(e),
    }
}
