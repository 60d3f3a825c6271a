
use crate::{traits::Entity, value::Value};
use std::{fmt, marker::PhantomData};
use thiserror::Error as ThisError;

///
/// QueryError
///
/// A predicate or order path does not line up with the entity's
/// registered columns. Raised at synthesis time; fatal for that call.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum QueryError {
    #[error("condition on {entity}.{field} must name a column of the related entity")]
    BareRelation { entity: &'static str, field: String },

    #[error("{entity} has no field named {field}")]
    FieldNotFound { entity: &'static str, field: String },

    #[error("{entity}.{field} is not a relation")]
    NotARelation { entity: &'static str, field: String },

    #[error("path {path} traverses more than one relation")]
    PathTooDeep { path: String },

    #[error("operator {op} is not supported across a relation path ({path})")]
    RelationOperator { op: CompareOp, path: String },
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Like,
    In,
    Gt,
    Lt,
}

impl CompareOp {
    /// SQL token rendered between the resolved column and its placeholder.
    #[must_use]
    pub(crate) const fn sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Like => "LIKE",
            Self::In => "IN",
            Self::Gt => ">",
            Self::Lt => "<",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}

///
/// Condition
///
/// One `(path, operator, value)` filter triple. Conditions are conjunctive;
/// the same path may appear any number of times and every occurrence is
/// applied.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    pub path: String,
    pub op: CompareOp,
    pub value: Value,
}

///
/// FieldPath
///
/// A condition path is either a local column or a one-hop reference into a
/// related entity. Parsed at synthesis time; the builder stores raw text.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FieldPath<'a> {
    Local(&'a str),
    Related { relation: &'a str, field: &'a str },
}

impl<'a> FieldPath<'a> {
    pub(crate) fn parse(path: &'a str) -> Result<Self, QueryError> {
        let mut segments = path.split('.');
        let head = segments.next().unwrap_or_default();

        match (segments.next(), segments.next()) {
            (None, _) => Ok(Self::Local(head)),
            (Some(field), None) => Ok(Self::Related {
                relation: head,
                field,
            }),
            (Some(_), Some(_)) => Err(QueryError::PathTooDeep {
                path: path.to_string(),
            }),
        }
    }
}

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub(crate) const fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

///
/// OrderKey
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderKey {
    pub field: String,
    pub direction: OrderDirection,
}

///
/// Query
///
/// Typed, accumulating description of filter and order intent.
///
/// This builder:
/// - Collects conditions and order keys in insertion order
/// - Is purely declarative (no schema access, synthesis, or execution)
/// - Never touches a connection
///
/// Field validity is checked later, when a statement is synthesized
/// against the entity's descriptor.
///

#[derive(Clone, Debug)]
pub struct Query<E: Entity> {
    conditions: Vec<Condition>,
    order: Vec<OrderKey>,
    _marker: PhantomData<E>,
}

impl<E: Entity> Default for Query<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Query<E> {
    /// Create a new empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            conditions: Vec::new(),
            order: Vec::new(),
            _marker: PhantomData,
        }
    }

    fn push(mut self, path: impl Into<String>, op: CompareOp, value: Value) -> Self {
        self.conditions.push(Condition {
            path: path.into(),
            op,
            value,
        });
        self
    }

    /// `path = value`
    #[must_use]
    pub fn eq(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, CompareOp::Eq, value.into())
    }

    /// `path LIKE %value%` — the wildcard wrapping happens here, not at
    /// synthesis time.
    #[must_use]
    pub fn like(self, path: impl Into<String>, value: impl Into<String>) -> Self {
        let wrapped = format!("%{}%", value.into());
        self.push(path, CompareOp::Like, Value::Text(wrapped))
    }

    /// `path IN (values…)` — rendered as a single placeholder group.
    #[must_use]
    pub fn in_<V: Into<Value>>(
        self,
        path: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.push(path, CompareOp::In, Value::List(values))
    }

    /// `path > value`
    #[must_use]
    pub fn gt(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, CompareOp::Gt, value.into())
    }

    /// `path < value`
    #[must_use]
    pub fn lt(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, CompareOp::Lt, value.into())
    }

    /// Append a sort key.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: OrderDirection) -> Self {
        self.order.push(OrderKey {
            field: field.into(),
            direction,
        });
        self
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    #[must_use]
    pub fn order(&self) -> &[OrderKey] {
        &self.order
    }
}
