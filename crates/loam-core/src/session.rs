use crate::{row::Row, value::Value};
use thiserror::Error as ThisError;

///
/// BackendError
///
/// Opaque failure reported by the connection layer: connectivity,
/// constraint violations, statement rejection. The core performs no
/// recovery; these propagate to the caller.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{0}")]
pub struct BackendError(String);

impl BackendError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

///
/// ExecResult
///
/// Outcome of one write statement.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExecResult {
    pub rows_affected: u64,
    /// Backend-generated primary key, when the backend produces one.
    pub generated_key: Option<Value>,
}

///
/// Connection
///
/// One checked-out backend connection. Statements are parameterized text
/// with positional `?` placeholders and an ordered parameter list.
///
/// Transaction demarcation is a plain pass-through to the backend; the
/// core never calls it on its own.
///

pub trait Connection {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<ExecResult, BackendError>;

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>, BackendError>;

    fn begin(&mut self) -> Result<(), BackendError>;

    fn commit(&mut self) -> Result<(), BackendError>;

    fn rollback(&mut self) -> Result<(), BackendError>;
}

///
/// ConnectionProvider
///
/// Scoped connection checkout. The repository acquires one connection per
/// logical operation and releases it exactly once on every exit path;
/// pooling, thread affinity, and timeouts are this collaborator's concern.
///

pub trait ConnectionProvider {
    type Conn: Connection;

    fn acquire(&self) -> Result<Self::Conn, BackendError>;

    fn release(&self, conn: Self::Conn);
}
