use convert_case::{Case, Casing};

/// Derive the SQL column name for a declared field name.
///
/// camelCase and PascalCase inputs are folded to snake_case; names that are
/// already snake_case pass through unchanged.
#[must_use]
pub fn column_name(field: &str) -> String {
    field.to_case(Case::Snake)
}

/// Relation columns store the related row's primary key.
#[must_use]
pub fn relation_column_name(field: &str) -> String {
    format!("{}_id", column_name(field))
}
