//! Loam — a metadata-driven relational mapper and dynamic SQL query engine.
//!
//! ## Crate layout
//! - `core`: descriptors, values, the predicate builder, SQL synthesis,
//!   materialization, and the generic repository.
//!
//! The `prelude` module mirrors the surface application code uses: build a
//! [`core::query::Query`], hand it to a [`core::repository::Repository`],
//! get entities back.

pub use loam_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use loam_core::Error;

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        query::{OrderDirection, Query},
        repository::Repository,
        response::Page,
        schema::{ColumnKind, EntityDescriptor, ScalarKind},
        session::{Connection as _, ConnectionProvider as _},
        traits::Entity as _,
        value::Value,
    };
}

///
/// Design surface
/// For registration code: descriptor builders and the session traits a
/// backend implements.
///

pub mod design {
    pub mod prelude {
        pub use crate::core::{
            row::Row,
            schema::{ColumnKind, DescriptorBuilder, EntityDescriptor, ScalarKind},
            session::{BackendError, Connection, ConnectionProvider, ExecResult},
            traits::{Entity, relation_key},
            value::Value,
        };
    }
}
