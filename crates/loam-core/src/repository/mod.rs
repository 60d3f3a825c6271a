
use crate::{
    error::Error,
    query::Query,
    response::Page,
    row::{MaterializeError, Row, materialize},
    session::{BackendError, Connection, ConnectionProvider, ExecResult},
    sql::{self, Statement},
    traits::Entity,
    value::Value,
};
use std::marker::PhantomData;
use thiserror::Error as ThisError;
use tracing::debug;

///
/// StatementError
///
/// Backend execution failure annotated with the synthesized SQL text and
/// the parameter count. Parameter values are never carried, so the error
/// is safe to log.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("statement failed ({params} params): {sql}")]
pub struct StatementError {
    pub sql: String,
    pub params: usize,
    #[source]
    pub source: BackendError,
}

///
/// Repository
///
/// Public façade parameterized by entity type. Every operation is one
/// self-contained unit of work: acquire connection → synthesize statement
/// → execute → materialize or apply write side effects → release. Release
/// runs on every exit path, exactly once per acquire.
///

pub struct Repository<E, P>
where
    E: Entity,
    P: ConnectionProvider,
{
    provider: P,
    _marker: PhantomData<E>,
}

impl<E, P> Repository<E, P>
where
    E: Entity,
    P: ConnectionProvider,
{
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            _marker: PhantomData,
        }
    }

    /// Insert one entity, writing any backend-generated key back into its
    /// primary-key field. Numeric keys are normalized to the declared
    /// width of that field.
    pub fn insert(&self, mut entity: E) -> Result<E, Error> {
        let statement = sql::write::insert(&entity)?;

        self.with_conn(move |conn| {
            let result = Self::execute(conn, &statement)?;
            if let Some(key) = result.generated_key {
                let pk = E::descriptor().primary_key();
                if let Some(kind) = pk.scalar_kind() {
                    let key =
                        key.coerce(kind)
                            .map_err(|source| MaterializeError::TypeConversion {
                                field: pk.field.to_string(),
                                source,
                            })?;
                    entity.set_value(pk.field, key)?;
                }
            }
            Ok(entity)
        })
    }

    /// Update one entity by its primary key. Zero matched rows is success;
    /// no affected-row signal is surfaced.
    pub fn update(&self, entity: &E) -> Result<(), Error> {
        let statement = sql::write::update(entity)?;
        self.with_conn(|conn| Self::execute(conn, &statement).map(|_| ()))
    }

    /// Delete one row by primary key.
    pub fn delete_by_id(&self, id: impl Into<Value>) -> Result<(), Error> {
        let statement = sql::write::delete_by_id(E::descriptor(), id.into());
        self.with_conn(|conn| Self::execute(conn, &statement).map(|_| ()))
    }

    /// Point lookup by primary key. No joins participate; relation fields
    /// of the result stay unset.
    pub fn select_by_id(&self, id: impl Into<Value>) -> Result<Option<E>, Error> {
        let synthesis = sql::select::by_id(E::descriptor(), id.into());

        self.with_conn(|conn| {
            let rows = Self::query(conn, &synthesis.statement)?;
            rows.first()
                .map(|row| materialize(row, &synthesis.plan))
                .transpose()
                .map_err(Into::into)
        })
    }

    /// First row matching the query, if any (`LIMIT 1`).
    pub fn select_one(&self, query: &Query<E>) -> Result<Option<E>, Error> {
        let synthesis = sql::select::one(E::descriptor(), query.conditions(), query.order())?;

        self.with_conn(|conn| {
            let rows = Self::query(conn, &synthesis.statement)?;
            rows.first()
                .map(|row| materialize(row, &synthesis.plan))
                .transpose()
                .map_err(Into::into)
        })
    }

    /// All rows matching the query.
    pub fn select_list(&self, query: &Query<E>) -> Result<Vec<E>, Error> {
        let synthesis = sql::select::list(E::descriptor(), query.conditions(), query.order())?;

        self.with_conn(|conn| {
            let rows = Self::query(conn, &synthesis.statement)?;
            rows.iter()
                .map(|row| materialize(row, &synthesis.plan))
                .collect::<Result<_, _>>()
                .map_err(Into::into)
        })
    }

    /// One page of matching rows plus the predicate-wide total. `current`
    /// is 1-based; a zero `current` or `size` returns the full result set.
    pub fn select_page(&self, current: u32, size: u32, query: &Query<E>) -> Result<Page<E>, Error> {
        let desc = E::descriptor();
        let synthesis =
            sql::select::page(desc, query.conditions(), query.order(), current, size)?;
        let count = sql::select::count(desc, query.conditions(), query.order())?;

        self.with_conn(|conn| {
            let rows = Self::query(conn, &synthesis.statement)?;
            let records = rows
                .iter()
                .map(|row| materialize(row, &synthesis.plan))
                .collect::<Result<Vec<_>, _>>()?;
            let total = scalar_count(&Self::query(conn, &count)?);

            Ok(Page::new(records, total, current, size))
        })
    }

    /// Number of rows matching the query.
    pub fn count(&self, query: &Query<E>) -> Result<u64, Error> {
        let statement = sql::select::count(E::descriptor(), query.conditions(), query.order())?;
        self.with_conn(|conn| Ok(scalar_count(&Self::query(conn, &statement)?)))
    }

    /// Whether any row matches the query.
    pub fn exists(&self, query: &Query<E>) -> Result<bool, Error> {
        let statement = sql::select::exists(E::descriptor(), query.conditions(), query.order())?;
        self.with_conn(|conn| Ok(!Self::query(conn, &statement)?.is_empty()))
    }

    /// Scoped connection checkout: release runs on success and failure
    /// alike, exactly once.
    fn with_conn<R>(&self, f: impl FnOnce(&mut P::Conn) -> Result<R, Error>) -> Result<R, Error> {
        let mut conn = self.provider.acquire()?;
        let out = f(&mut conn);
        self.provider.release(conn);
        out
    }

    fn execute(conn: &mut P::Conn, statement: &Statement) -> Result<ExecResult, Error> {
        debug!(
            sql = %statement.sql,
            params = statement.params.len(),
            "executing statement"
        );
        conn.execute(&statement.sql, &statement.params)
            .map_err(|source| wrap(statement, source))
    }

    fn query(conn: &mut P::Conn, statement: &Statement) -> Result<Vec<Row>, Error> {
        debug!(
            sql = %statement.sql,
            params = statement.params.len(),
            "executing query"
        );
        conn.query(&statement.sql, &statement.params)
            .map_err(|source| wrap(statement, source))
    }
}

fn wrap(statement: &Statement, source: BackendError) -> Error {
    Error::Statement(StatementError {
        sql: statement.sql.clone(),
        params: statement.params.len(),
        source,
    })
}

/// First column of the first row, as the non-negative count backends
/// return for `COUNT(*)`. Absent or malformed rows count as zero.
fn scalar_count(rows: &[Row]) -> u64 {
    rows.first()
        .and_then(|row| row.first())
        .map_or(0, |(_, value)| match value {
            Value::Int(n) => u64::try_from(*n).unwrap_or_default(),
            _ => 0,
        })
}
