use crate::{
    query::{CompareOp, Condition, OrderKey, QueryError},
    row::label,
    schema::EntityDescriptor,
    sql::{
        Statement,
        plan::{JoinPlan, ROOT_ALIAS},
    },
    value::Value,
};

///
/// SelectSynthesis
///
/// Statement plus the join plan its projection used. Materialization
/// consumes the same plan so projection labels and hydration stay in
/// lockstep.
///

#[derive(Clone, Debug)]
pub struct SelectSynthesis {
    pub statement: Statement,
    pub plan: JoinPlan,
}

/// Point lookup by primary key. No joins participate; relation fields of
/// the result stay unset.
#[must_use]
pub fn by_id(root: &'static EntityDescriptor, id: Value) -> SelectSynthesis {
    let plan = JoinPlan::default();
    let sql = format!(
        "SELECT {} {} WHERE {ROOT_ALIAS}.{} = ?",
        projection(root, &plan),
        from_clause(root, &plan),
        root.primary_key().column,
    );

    SelectSynthesis {
        statement: Statement {
            sql,
            params: vec![id],
        },
        plan,
    }
}

/// Predicate list query.
pub fn list(
    root: &'static EntityDescriptor,
    conditions: &[Condition],
    order: &[OrderKey],
) -> Result<SelectSynthesis, QueryError> {
    let plan = JoinPlan::build(root, conditions, order)?;
    let (tail, params) = tail(root, &plan, conditions, order)?;
    let sql = format!("SELECT {} {tail}", projection(root, &plan));

    Ok(SelectSynthesis {
        statement: Statement { sql, params },
        plan,
    })
}

/// Predicate single-row query (`LIMIT 1`).
pub fn one(
    root: &'static EntityDescriptor,
    conditions: &[Condition],
    order: &[OrderKey],
) -> Result<SelectSynthesis, QueryError> {
    let mut synthesis = list(root, conditions, order)?;
    synthesis.statement.sql.push_str(" LIMIT 1");
    Ok(synthesis)
}

/// Paged predicate query. `current` is 1-based; a zero `current` or `size`
/// disables pagination and returns the full result set (sentinel
/// convention, not an error).
pub fn page(
    root: &'static EntityDescriptor,
    conditions: &[Condition],
    order: &[OrderKey],
    current: u32,
    size: u32,
) -> Result<SelectSynthesis, QueryError> {
    let mut synthesis = list(root, conditions, order)?;
    if current > 0 && size > 0 {
        let offset = u64::from(current - 1) * u64::from(size);
        synthesis
            .statement
            .sql
            .push_str(&format!(" LIMIT {size} OFFSET {offset}"));
    }
    Ok(synthesis)
}

/// `COUNT(*)` over the same FROM/JOIN/WHERE text as `list`.
pub fn count(
    root: &'static EntityDescriptor,
    conditions: &[Condition],
    order: &[OrderKey],
) -> Result<Statement, QueryError> {
    let plan = JoinPlan::build(root, conditions, order)?;
    let (tail, params) = tail(root, &plan, conditions, order)?;

    Ok(Statement {
        sql: format!("SELECT COUNT(*) {tail}"),
        params,
    })
}

/// Existence probe over the same FROM/JOIN/WHERE text as `list`.
pub fn exists(
    root: &'static EntityDescriptor,
    conditions: &[Condition],
    order: &[OrderKey],
) -> Result<Statement, QueryError> {
    let plan = JoinPlan::build(root, conditions, order)?;
    let (tail, params) = tail(root, &plan, conditions, order)?;

    Ok(Statement {
        sql: format!("SELECT 1 {tail} LIMIT 1"),
        params,
    })
}

/// Aliased projection: root scalars first, then each join's target scalars.
fn projection(root: &'static EntityDescriptor, plan: &JoinPlan) -> String {
    let mut cols = Vec::new();
    for col in root.scalar_columns() {
        cols.push(format!(
            "{ROOT_ALIAS}.{} AS {}",
            col.column,
            label(ROOT_ALIAS, &col.column)
        ));
    }
    for join in plan.joins() {
        for col in join.target.scalar_columns() {
            cols.push(format!(
                "{}.{} AS {}",
                join.alias,
                col.column,
                label(&join.alias, &col.column)
            ));
        }
    }
    cols.join(", ")
}

fn from_clause(root: &'static EntityDescriptor, plan: &JoinPlan) -> String {
    let mut sql = format!("FROM {} {ROOT_ALIAS}", root.table);
    for join in plan.joins() {
        sql.push_str(&format!(
            " LEFT JOIN {} {} ON {ROOT_ALIAS}.{} = {}.{}",
            join.target.table,
            join.alias,
            join.fk_column,
            join.alias,
            join.target.primary_key().column,
        ));
    }
    sql
}

/// Everything after the projection, shared verbatim by list/page/count/
/// exists so predicate semantics are identical across all read operations.
fn tail(
    root: &'static EntityDescriptor,
    plan: &JoinPlan,
    conditions: &[Condition],
    order: &[OrderKey],
) -> Result<(String, Vec<Value>), QueryError> {
    let (where_sql, params) = where_clause(root, plan, conditions)?;
    let order_sql = order_clause(root, plan, order)?;

    Ok((
        format!("{}{where_sql}{order_sql}", from_clause(root, plan)),
        params,
    ))
}

fn where_clause(
    root: &'static EntityDescriptor,
    plan: &JoinPlan,
    conditions: &[Condition],
) -> Result<(String, Vec<Value>), QueryError> {
    if conditions.is_empty() {
        return Ok((String::new(), Vec::new()));
    }

    let mut parts = Vec::new();
    let mut params = Vec::new();
    for cond in conditions {
        let column = plan.resolve(root, &cond.path)?;
        match (cond.op, &cond.value) {
            (CompareOp::In, Value::List(items)) => {
                let group = vec!["?"; items.len()].join(", ");
                parts.push(format!("{column} IN ({group})"));
                params.extend(items.iter().cloned());
            }
            (op, value) => {
                parts.push(format!("{column} {} ?", op.sql()));
                params.push(value.clone());
            }
        }
    }

    Ok((format!(" WHERE {}", parts.join(" AND ")), params))
}

fn order_clause(
    root: &'static EntityDescriptor,
    plan: &JoinPlan,
    order: &[OrderKey],
) -> Result<String, QueryError> {
    if order.is_empty() {
        return Ok(String::new());
    }

    let mut keys = Vec::new();
    for key in order {
        let column = plan.resolve(root, &key.field)?;
        keys.push(format!("{column} {}", key.direction.sql()));
    }

    Ok(format!(" ORDER BY {}", keys.join(", ")))
}
