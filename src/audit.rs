//! Append-only record of every state transition.
//!
//! Entries are written inside the same transaction as the change they
//! describe, and are never updated or deleted afterwards.

use diesel::{prelude::*, result::Error as DbError};
use serde::Serialize;
use uuid::Uuid;

use crate::db::{
    Connection,
    models as db,
    schema::audit_log,
};

/// Entity responsible for an action.
#[derive(Clone, Copy, Debug)]
pub enum Actor {
    /// Actions carried out automatically by the system, for instance from
    /// maintenance jobs.
    System,
    /// A user.
    User(i32),
}

impl Actor {
    fn as_db(&self) -> Option<i32> {
        match *self {
            Actor::System => None,
            Actor::User(id) => Some(id),
        }
    }
}

impl From<i32> for Actor {
    fn from(id: i32) -> Self {
        Actor::User(id)
    }
}

/// ID of the entity an action was performed on.
pub enum EntityId {
    Integer(i32),
    Uuid(Uuid),
}

impl EntityId {
    fn into_db(self) -> (Option<i32>, Option<Uuid>) {
        match self {
            EntityId::Integer(id) => (Some(id), None),
            EntityId::Uuid(id) => (None, Some(id)),
        }
    }
}

impl From<i32> for EntityId {
    fn from(id: i32) -> Self {
        EntityId::Integer(id)
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        EntityId::Uuid(id)
    }
}

/// Store an event in the audit log.
///
/// This function takes an explicit database connection and can safely be used
/// inside an existing transaction, only adding the entry when the transaction
/// is committed.
pub fn append<A, I, D>(
    db: &Connection,
    actor: A,
    document: Uuid,
    action: &str,
    entity_type: &str,
    entity_id: I,
    data: D,
) -> Result<(), DbError>
where
    Actor: From<A>,
    EntityId: From<I>,
    D: Serialize,
{
    let actor = Actor::from(actor).as_db();
    let (entity_id, entity_uuid) = EntityId::from(entity_id).into_db();

    let data = rmps::to_vec_named(&data).expect("invalid audit log data");

    diesel::insert_into(audit_log::table)
        .values(db::NewAuditLog {
            actor,
            document: Some(document),
            action,
            entity_type,
            entity_id,
            entity_uuid,
            data: &data,
        })
        .execute(db)?;

    Ok(())
}

/// Store an event not tied to any particular document.
pub fn append_global<A, I, D>(
    db: &Connection,
    actor: A,
    action: &str,
    entity_type: &str,
    entity_id: I,
    data: D,
) -> Result<(), DbError>
where
    Actor: From<A>,
    EntityId: From<I>,
    D: Serialize,
{
    let actor = Actor::from(actor).as_db();
    let (entity_id, entity_uuid) = EntityId::from(entity_id).into_db();

    let data = rmps::to_vec_named(&data).expect("invalid audit log data");

    diesel::insert_into(audit_log::table)
        .values(db::NewAuditLog {
            actor,
            document: None,
            action,
            entity_type,
            entity_id,
            entity_uuid,
            data: &data,
        })
        .execute(db)?;

    Ok(())
}

/// Get a document's trail, newest first.
pub fn history(db: &Connection, document: Uuid)
-> Result<Vec<db::AuditLog>, DbError> {
    audit_log::table
        .filter(audit_log::document.eq(document))
        .order_by(audit_log::timestamp.desc())
        .then_order_by(audit_log::id.desc())
        .get_results(db)
}
