mod naming;


use thiserror::Error as ThisError;

pub use naming::{column_name, relation_column_name};

///
/// SchemaError
///
/// Entity registration problems. Raised when a descriptor is built,
/// never at query time.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum SchemaError {
    #[error("entity {entity} maps column {column} more than once")]
    DuplicateColumn { entity: &'static str, column: String },

    #[error("entity {entity} declares more than one primary key ({first}, {second})")]
    DuplicatePrimaryKey {
        entity: &'static str,
        first: &'static str,
        second: &'static str,
    },

    #[error("entity {entity} has an empty table name")]
    EmptyTableName { entity: &'static str },

    #[error("entity {entity} declares no primary key column")]
    MissingPrimaryKey { entity: &'static str },
}

///
/// ScalarKind
///
/// Column type surface needed by synthesis and materialization.
/// Aligned with `Value` variants; `Int` is 32-bit, `BigInt` 64-bit.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScalarKind {
    BigInt,
    Bool,
    Float,
    Int,
    Text,
}

impl ScalarKind {
    /// Stable lowercase label for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BigInt => "bigint",
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Int => "int",
            Self::Text => "text",
        }
    }
}

///
/// ColumnKind
///
/// A column is either a scalar or a many-to-one relation. Relation targets
/// are reached through a function pointer so mutually-referencing
/// descriptors can be registered lazily.
///

#[derive(Clone, Copy, Debug)]
pub enum ColumnKind {
    Scalar(ScalarKind),
    Relation(fn() -> &'static EntityDescriptor),
}

///
/// ColumnDescriptor
///

#[derive(Clone, Debug)]
pub struct ColumnDescriptor {
    /// Field name as declared on the entity.
    pub field: &'static str,
    /// Derived SQL column name. Relation columns carry an `_id` suffix.
    pub column: String,
    pub primary_key: bool,
    pub kind: ColumnKind,
}

impl ColumnDescriptor {
    /// Resolve the related entity's descriptor, if this is a relation column.
    #[must_use]
    pub fn target(&self) -> Option<&'static EntityDescriptor> {
        match self.kind {
            ColumnKind::Relation(target) => Some(target()),
            ColumnKind::Scalar(_) => None,
        }
    }

    #[must_use]
    pub const fn scalar_kind(&self) -> Option<ScalarKind> {
        match self.kind {
            ColumnKind::Scalar(kind) => Some(kind),
            ColumnKind::Relation(_) => None,
        }
    }
}

///
/// EntityDescriptor
///
/// Static, per-type table binding: table name, ordered column list, and the
/// single primary-key column. Built once per entity type and immutable
/// afterwards.
///

#[derive(Clone, Debug)]
pub struct EntityDescriptor {
    /// Rust type name (for diagnostics).
    pub entity_name: &'static str,
    pub table: &'static str,
    /// Ordered column list (authoritative for statement synthesis).
    pub columns: Vec<ColumnDescriptor>,
    primary_key: usize,
}

impl EntityDescriptor {
    #[must_use]
    pub const fn builder(entity_name: &'static str, table: &'static str) -> DescriptorBuilder {
        DescriptorBuilder::new(entity_name, table)
    }

    #[must_use]
    pub fn primary_key(&self) -> &ColumnDescriptor {
        &self.columns[self.primary_key]
    }

    /// Look up one column by its declared field name.
    #[must_use]
    pub fn column(&self, field: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|col| col.field == field)
    }

    /// Columns that participate in a plain projection (scalars, key included).
    pub fn scalar_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns
            .iter()
            .filter(|col| matches!(col.kind, ColumnKind::Scalar(_)))
    }

    /// Columns written by insert/update, in declaration order.
    pub fn non_key_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|col| !col.primary_key)
    }
}

///
/// DescriptorBuilder
///
/// Explicit registration surface: every entity declares its binding here
/// once. Invariants (exactly one primary key, unique columns, non-empty
/// table) are enforced by `build`, so misconfiguration never reaches
/// statement synthesis.
///

pub struct DescriptorBuilder {
    entity_name: &'static str,
    table: &'static str,
    columns: Vec<ColumnDescriptor>,
}

impl DescriptorBuilder {
    const fn new(entity_name: &'static str, table: &'static str) -> Self {
        Self {
            entity_name,
            table,
            columns: Vec::new(),
        }
    }

    /// Declare the primary-key column.
    #[must_use]
    pub fn key(mut self, field: &'static str, kind: ScalarKind) -> Self {
        self.columns.push(ColumnDescriptor {
            field,
            column: column_name(field),
            primary_key: true,
            kind: ColumnKind::Scalar(kind),
        });
        self
    }

    /// Declare a scalar column.
    #[must_use]
    pub fn scalar(mut self, field: &'static str, kind: ScalarKind) -> Self {
        self.columns.push(ColumnDescriptor {
            field,
            column: column_name(field),
            primary_key: false,
            kind: ColumnKind::Scalar(kind),
        });
        self
    }

    /// Declare a many-to-one relation column.
    #[must_use]
    pub fn relation(mut self, field: &'static str, target: fn() -> &'static EntityDescriptor) -> Self {
        self.columns.push(ColumnDescriptor {
            field,
            column: relation_column_name(field),
            primary_key: false,
            kind: ColumnKind::Relation(target),
        });
        self
    }

    pub fn build(self) -> Result<EntityDescriptor, SchemaError> {
        let entity = self.entity_name;

        if self.table.is_empty() {
            return Err(SchemaError::EmptyTableName { entity });
        }

        let mut primary_key = None;
        for (index, col) in self.columns.iter().enumerate() {
            if self.columns[..index].iter().any(|c| c.column == col.column) {
                return Err(SchemaError::DuplicateColumn {
                    entity,
                    column: col.column.clone(),
                });
            }
            if col.primary_key {
                if let Some(first) = primary_key {
                    let first: &ColumnDescriptor = &self.columns[first];
                    return Err(SchemaError::DuplicatePrimaryKey {
                        entity,
                        first: first.field,
                        second: col.field,
                    });
                }
                primary_key = Some(index);
            }
        }

        let Some(primary_key) = primary_key else {
            return Err(SchemaError::MissingPrimaryKey { entity });
        };

        Ok(EntityDescriptor {
            entity_name: entity,
            table: self.table,
            columns: self.columns,
            primary_key,
        })
    }
}
