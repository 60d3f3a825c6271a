use crate::schema::ScalarKind;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// CoerceError
///
/// A stored or supplied value cannot be converted to the kind a field
/// declares. Both sides are named so the failure is diagnosable without
/// re-running the statement.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CoerceError {
    #[error("value {value} does not fit into {to}")]
    OutOfRange { value: i64, to: &'static str },

    #[error("cannot convert {from} into {to}")]
    Unsupported { from: &'static str, to: &'static str },
}

///
/// Value
/// can be used as a statement parameter and in result rows
///
/// Null → the field's value is Option::None (i.e., SQL NULL).
/// List → ordered transport for IN placeholder groups; never stored.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Float(f64),
    Int(i64),
    List(Vec<Self>),
    Null,
    Text(String),
}

impl Value {
    /// Stable lowercase label for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::List(_) => "list",
            Self::Null => "null",
            Self::Text(_) => "text",
        }
    }

    /// Map SQL NULL to `None`, anything else to `Some(self)`.
    #[must_use]
    pub fn opt(self) -> Option<Self> {
        match self {
            Self::Null => None,
            other => Some(other),
        }
    }

    /// Normalize this value to the representation a column kind declares.
    ///
    /// `Null` passes through every kind; numeric widths are range-checked.
    pub fn coerce(self, kind: ScalarKind) -> Result<Self, CoerceError> {
        match (kind, self) {
            (_, Self::Null) => Ok(Self::Null),
            (ScalarKind::Bool, v @ Self::Bool(_)) => Ok(v),
            (ScalarKind::Bool, Self::Int(0)) => Ok(Self::Bool(false)),
            (ScalarKind::Bool, Self::Int(1)) => Ok(Self::Bool(true)),
            (ScalarKind::Int, Self::Int(i)) => {
                if i32::try_from(i).is_ok() {
                    Ok(Self::Int(i))
                } else {
                    Err(CoerceError::OutOfRange {
                        value: i,
                        to: kind.name(),
                    })
                }
            }
            (ScalarKind::BigInt, v @ Self::Int(_)) => Ok(v),
            (ScalarKind::Float, v @ Self::Float(_)) => Ok(v),
            #[allow(clippy::cast_precision_loss)]
            (ScalarKind::Float, Self::Int(i)) => Ok(Self::Float(i as f64)),
            (ScalarKind::Text, v @ Self::Text(_)) => Ok(v),
            (kind, v) => Err(CoerceError::Unsupported {
                from: v.kind_name(),
                to: kind.name(),
            }),
        }
    }

    pub fn into_i64(self) -> Result<i64, CoerceError> {
        match self {
            Self::Int(i) => Ok(i),
            v => Err(CoerceError::Unsupported {
                from: v.kind_name(),
                to: "bigint",
            }),
        }
    }

    pub fn into_i32(self) -> Result<i32, CoerceError> {
        match self {
            Self::Int(i) => i32::try_from(i).map_err(|_| CoerceError::OutOfRange {
                value: i,
                to: "int",
            }),
            v => Err(CoerceError::Unsupported {
                from: v.kind_name(),
                to: "int",
            }),
        }
    }

    pub fn into_f64(self) -> Result<f64, CoerceError> {
        match self {
            Self::Float(f) => Ok(f),
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Ok(i as f64),
            v => Err(CoerceError::Unsupported {
                from: v.kind_name(),
                to: "float",
            }),
        }
    }

    pub fn into_bool(self) -> Result<bool, CoerceError> {
        match self {
            Self::Bool(b) => Ok(b),
            Self::Int(0) => Ok(false),
            Self::Int(1) => Ok(true),
            v => Err(CoerceError::Unsupported {
                from: v.kind_name(),
                to: "bool",
            }),
        }
    }

    pub fn into_text(self) -> Result<String, CoerceError> {
        match self {
            Self::Text(s) => Ok(s),
            v => Err(CoerceError::Unsupported {
                from: v.kind_name(),
                to: "text",
            }),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
