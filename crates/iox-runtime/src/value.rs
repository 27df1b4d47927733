//! The dynamic value type every stream element is made of.

use iox_util::Result;

/// A single value living on a stream frame or in the variable store.
///
/// `List` and `Io` are named in the upstream type tag but never
/// constructed by any operator in this interpreter; they exist only so
/// `type` has a name to print if one ever shows up.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Str(String),
    Real(f64),
    Bool(bool),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::Real(_) => "real",
            Value::Bool(_) => "bool",
        }
    }

    /// Coerce to `Int` per the element-wise rules: strings parse, reals
    /// round half-away-from-zero, bools become 1/0, ints pass through.
    pub fn to_int(&self) -> Result<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            Value::Str(s) => Ok(s.parse::<i64>().unwrap_or(0)),
            Value::Real(f) => {
                let rounded = if *f > 0.0 { f + 0.5 } else { f - 0.5 };
                Ok(rounded as i64)
            }
            Value::Bool(b) => Ok(if *b { 1 } else { 0 }),
        }
    }

    /// Coerce to `Bool`: non-empty string is true, nonzero int is true,
    /// bool passes through. Reals never reach this path in practice.
    pub fn to_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::Str(s) => Ok(!s.is_empty()),
            Value::Int(i) => Ok(*i != 0),
            Value::Real(f) => Ok(*f != 0.0),
        }
    }

    pub fn as_str_lossy(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Real(f) => format!("{f:?}"),
            Value::Bool(b) => b.to_string(),
        }
    }
}
