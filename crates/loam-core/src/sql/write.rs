use crate::{schema::EntityDescriptor, sql::Statement, traits::Entity, value::Value};
use thiserror::Error as ThisError;

///
/// WriteError
///
/// Field extraction problems while synthesizing a write statement.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum WriteError {
    #[error("insert of {entity}.{field} requires the related entity to carry a primary key")]
    MissingForeignKey {
        entity: &'static str,
        field: &'static str,
    },

    #[error("{entity} has no mapped field named {field}")]
    UntrackedField { entity: &'static str, field: String },
}

/// Synthesize `INSERT INTO … (…) VALUES (…)`.
///
/// The primary key is excluded from the column list; relation columns
/// contribute the related entity's primary-key value.
pub fn insert<E: Entity>(entity: &E) -> Result<Statement, WriteError> {
    let desc = E::descriptor();

    let mut columns = Vec::new();
    let mut params = Vec::new();
    for col in desc.non_key_columns() {
        columns.push(col.column.as_str());
        params.push(entity.value(col.field)?);
    }

    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        desc.table,
        columns.join(", "),
        placeholders,
    );

    Ok(Statement { sql, params })
}

/// Synthesize `UPDATE … SET … WHERE <pk> = ?`.
///
/// Every non-key column is assigned in declaration order; the primary key
/// pins the row. Zero matched rows is not an error.
pub fn update<E: Entity>(entity: &E) -> Result<Statement, WriteError> {
    let desc = E::descriptor();

    let mut assignments = Vec::new();
    let mut params = Vec::new();
    for col in desc.non_key_columns() {
        assignments.push(format!("{} = ?", col.column));
        params.push(entity.value(col.field)?);
    }

    let pk = desc.primary_key();
    params.push(entity.value(pk.field)?);
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        desc.table,
        assignments.join(", "),
        pk.column,
    );

    Ok(Statement { sql, params })
}

/// Synthesize a single-row `DELETE` keyed by primary key.
#[must_use]
pub fn delete_by_id(desc: &EntityDescriptor, id: Value) -> Statement {
    Statement {
        sql: format!(
            "DELETE FROM {} WHERE {} = ?",
            desc.table,
            desc.primary_key().column,
        ),
        params: vec![id],
    }
}
