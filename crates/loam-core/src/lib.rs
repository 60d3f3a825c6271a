//! Core runtime for Loam: entity descriptors, values, the predicate
//! builder, SQL synthesis, row materialization, and the generic repository.

// public exports are one module level down
pub mod error;
pub mod query;
pub mod repository;
pub mod response;
pub mod row;
pub mod schema;
pub mod session;
pub mod sql;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, synthesizers, or session plumbing is re-exported here.
///

pub mod prelude {
    pub use crate::{
        query::{OrderDirection, Query},
        repository::Repository,
        response::Page,
        schema::{ColumnKind, EntityDescriptor, ScalarKind},
        traits::Entity,
        value::Value,
    };
}
