use crate::{
    row::{MaterializeError, Row},
    schema::EntityDescriptor,
    sql::WriteError,
    value::Value,
};

///
/// Entity
///
/// Explicit registration surface for one mapped type. The descriptor is the
/// static table binding; `value`/`set_value` move field data across the
/// statement boundary; `Default` is the registered constructor used by
/// materialization. Types are never resolved by name at runtime.
///

pub trait Entity: Default + Sized + 'static {
    /// The cached table binding for this type.
    fn descriptor() -> &'static EntityDescriptor;

    /// Read one declared field as a parameter value.
    ///
    /// Relation fields yield the related entity's primary key
    /// (`Value::Null` when the relation is unset).
    fn value(&self, field: &str) -> Result<Value, WriteError>;

    /// Write one scalar field from a backend value.
    fn set_value(&mut self, field: &str, value: Value) -> Result<(), MaterializeError>;

    /// Populate a joined relation field from aliased row columns.
    fn hydrate_relation(
        &mut self,
        field: &str,
        row: &Row,
        alias: &str,
    ) -> Result<(), MaterializeError>;
}

/// Extract the foreign-key value for a relation field.
///
/// An unset relation maps to `Value::Null`; a related entity without a
/// resolvable primary key is a write error, reported and never retried.
pub fn relation_key<R: Entity>(
    related: Option<&R>,
    entity: &'static str,
    field: &'static str,
) -> Result<Value, WriteError> {
    let Some(related) = related else {
        return Ok(Value::Null);
    };

    let key = related.value(R::descriptor().primary_key().field)?;
    if key == Value::Null {
        return Err(WriteError::MissingForeignKey { entity, field });
    }

    Ok(key)
}
