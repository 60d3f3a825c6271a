use crate::{
    row::{Row, label},
    schema::ColumnKind,
    sql::{JoinPlan, ROOT_ALIAS},
    traits::Entity,
    value::CoerceError,
};
use thiserror::Error as ThisError;

///
/// MaterializeError
///
/// A result row could not be converted back into an entity. Fatal for
/// that row; never retried.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum MaterializeError {
    #[error("column {label} is missing from the result row")]
    MissingColumn { label: String },

    #[error("field {field}: {source}")]
    TypeConversion {
        field: String,
        #[source]
        source: CoerceError,
    },

    #[error("{entity} has no mapped field named {field}")]
    UntrackedField { entity: &'static str, field: String },
}

/// Convert one result row into a root entity.
///
/// Every scalar column is read from its `t0_…` label and coerced to the
/// declared kind. Relation fields whose alias joined in this query are
/// hydrated one level deep; relations that did not join stay unset and are
/// never lazily loaded.
pub fn materialize<E: Entity>(row: &Row, plan: &JoinPlan) -> Result<E, MaterializeError> {
    let desc = E::descriptor();
    let mut entity = E::default();

    for col in &desc.columns {
        match col.kind {
            ColumnKind::Scalar(kind) => {
                let label = label(ROOT_ALIAS, &col.column);
                let value = row
                    .get(&label)
                    .ok_or(MaterializeError::MissingColumn { label })?
                    .clone();
                let value = value
                    .coerce(kind)
                    .map_err(|source| MaterializeError::TypeConversion {
                        field: col.field.to_string(),
                        source,
                    })?;
                entity.set_value(col.field, value)?;
            }
            ColumnKind::Relation(_) => {
                if let Some(join) = plan.join_for(col.field) {
                    entity.hydrate_relation(col.field, row, &join.alias)?;
                }
            }
        }
    }

    Ok(entity)
}

/// Populate a related entity's scalar fields from its join alias.
///
/// The related entity's own relation fields stay unset; hydration is one
/// level deep by design of the path grammar.
pub fn materialize_related<R: Entity>(row: &Row, alias: &str) -> Result<R, MaterializeError> {
    let desc = R::descriptor();
    let mut entity = R::default();

    for col in desc.scalar_columns() {
        let ColumnKind::Scalar(kind) = col.kind else {
            continue;
        };
        let label = label(alias, &col.column);
        let value = row
            .get(&label)
            .ok_or(MaterializeError::MissingColumn { label })?
            .clone();
        let value = value
            .coerce(kind)
            .map_err(|source| MaterializeError::TypeConversion {
                field: col.field.to_string(),
                source,
            })?;
        entity.set_value(col.field, value)?;
    }

    Ok(entity)
}
