mod materialize;


use crate::value::Value;
use derive_more::{Deref, IntoIterator};

// re-exports
pub use materialize::{MaterializeError, materialize, materialize_related};

/// Projection label for one aliased column (`t0_id`, `t1_name`, …).
#[must_use]
pub fn label(alias: &str, column: &str) -> String {
    format!("{alias}_{column}")
}

///
/// Row
///
/// One result row as delivered by the connection layer: ordered
/// `(label, value)` pairs, addressed by the `alias_column` labels the
/// synthesizer projected.
///

#[derive(Clone, Debug, Default, Deref, IntoIterator, PartialEq)]
pub struct Row(Vec<(String, Value)>);

impl Row {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append one labelled value.
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push((label.into(), value.into()));
        self
    }

    /// Look one label up; first occurrence wins.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, value)| value)
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
