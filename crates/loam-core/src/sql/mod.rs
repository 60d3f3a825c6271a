pub mod plan;
pub mod select;
pub mod write;


use crate::value::Value;

// re-exports
pub use plan::{Join, JoinPlan, ROOT_ALIAS};
pub use select::SelectSynthesis;
pub use write::WriteError;

///
/// Statement
///
/// Parameterized SQL text plus its ordered parameter list, matching
/// placeholder order exactly. Values are never inlined into the text.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}
