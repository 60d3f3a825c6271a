use crate::{
    query::{CompareOp, Condition, FieldPath, OrderKey, QueryError},
    schema::{ColumnKind, EntityDescriptor},
};

/// Alias of the driving table in every select-family statement.
pub const ROOT_ALIAS: &str = "t0";

///
/// Join
///
/// One synthesized LEFT JOIN arm.
///

#[derive(Clone, Debug)]
pub struct Join {
    /// Relation field on the root entity this join serves.
    pub field: String,
    pub alias: String,
    pub target: &'static EntityDescriptor,
    /// Root-side foreign-key column (e.g. `role_id`).
    pub fk_column: String,
}

///
/// JoinPlan
///
/// Derived, never caller-specified: scanning conditions in insertion
/// order, each distinct relation prefix gets one alias (`t1`, `t2`, …) in
/// first-seen order. Alias assignment is a pure function of condition
/// order, so identical construction order yields identical SQL text.
///

#[derive(Clone, Debug, Default)]
pub struct JoinPlan {
    joins: Vec<Join>,
}

impl JoinPlan {
    /// Scan a condition and order set against the root descriptor,
    /// validating every path and collecting one join per distinct
    /// relation prefix.
    pub fn build(
        root: &'static EntityDescriptor,
        conditions: &[Condition],
        order: &[OrderKey],
    ) -> Result<Self, QueryError> {
        let mut plan = Self::default();

        for cond in conditions {
            match FieldPath::parse(&cond.path)? {
                FieldPath::Local(field) => {
                    let col = root.column(field).ok_or_else(|| QueryError::FieldNotFound {
                        entity: root.entity_name,
                        field: field.to_string(),
                    })?;
                    if matches!(col.kind, ColumnKind::Relation(_)) {
                        return Err(QueryError::BareRelation {
                            entity: root.entity_name,
                            field: field.to_string(),
                        });
                    }
                }
                FieldPath::Related { relation, field } => {
                    if cond.op != CompareOp::Eq {
                        return Err(QueryError::RelationOperator {
                            op: cond.op,
                            path: cond.path.clone(),
                        });
                    }
                    plan.join(root, relation, field, &cond.path)?;
                }
            }
        }

        for key in order {
            let col = root
                .column(&key.field)
                .ok_or_else(|| QueryError::FieldNotFound {
                    entity: root.entity_name,
                    field: key.field.clone(),
                })?;
            if matches!(col.kind, ColumnKind::Relation(_)) {
                return Err(QueryError::BareRelation {
                    entity: root.entity_name,
                    field: key.field.clone(),
                });
            }
        }

        Ok(plan)
    }

    /// Register the join for one `relation.field` reference, reusing the
    /// alias when the relation was already seen.
    fn join(
        &mut self,
        root: &'static EntityDescriptor,
        relation: &str,
        field: &str,
        path: &str,
    ) -> Result<(), QueryError> {
        let col = root
            .column(relation)
            .ok_or_else(|| QueryError::FieldNotFound {
                entity: root.entity_name,
                field: relation.to_string(),
            })?;

        let Some(target) = col.target() else {
            return Err(QueryError::NotARelation {
                entity: root.entity_name,
                field: relation.to_string(),
            });
        };

        let target_col = target
            .column(field)
            .ok_or_else(|| QueryError::FieldNotFound {
                entity: target.entity_name,
                field: field.to_string(),
            })?;
        if matches!(target_col.kind, ColumnKind::Relation(_)) {
            // referencing the target's own relation would be a second hop
            return Err(QueryError::PathTooDeep {
                path: path.to_string(),
            });
        }

        if !self.joins.iter().any(|join| join.field == relation) {
            self.joins.push(Join {
                field: relation.to_string(),
                alias: format!("t{}", self.joins.len() + 1),
                target,
                fk_column: col.column.clone(),
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// The join serving one relation field, if it participated in this query.
    #[must_use]
    pub fn join_for(&self, field: &str) -> Option<&Join> {
        self.joins.iter().find(|join| join.field == field)
    }

    /// Resolve a condition or order path to its aliased SQL column.
    pub(crate) fn resolve(
        &self,
        root: &'static EntityDescriptor,
        path: &str,
    ) -> Result<String, QueryError> {
        match FieldPath::parse(path)? {
            FieldPath::Local(field) => {
                let col = root.column(field).ok_or_else(|| QueryError::FieldNotFound {
                    entity: root.entity_name,
                    field: field.to_string(),
                })?;
                Ok(format!("{ROOT_ALIAS}.{}", col.column))
            }
            FieldPath::Related { relation, field } => {
                let join = self
                    .join_for(relation)
                    .ok_or_else(|| QueryError::FieldNotFound {
                        entity: root.entity_name,
                        field: relation.to_string(),
                    })?;
                let col = join
                    .target
                    .column(field)
                    .ok_or_else(|| QueryError::FieldNotFound {
                        entity: join.target.entity_name,
                        field: field.to_string(),
                    })?;
                Ok(format!("{}.{}", join.alias, col.column))
            }
        }
    }
}
