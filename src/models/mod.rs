//! Data and behaviours modelled as objects.

pub mod document;
pub mod role;
pub mod user;
pub mod validation;
pub mod version;
pub mod workspace;

pub use self::{
    document::Document,
    role::Role,
    user::User,
    validation::Validation,
    version::Version,
    workspace::Workspace,
};
