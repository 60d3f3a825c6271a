use crate::{
    query::QueryError, repository::StatementError, row::MaterializeError, schema::SchemaError,
    session::BackendError, sql::WriteError,
};
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error surface: every failure a repository call can produce.
/// All variants propagate to the caller unwrapped; the core performs no
/// silent recovery or retry.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Statement(#[from] StatementError),

    #[error(transparent)]
    Write(#[from] WriteError),
}
