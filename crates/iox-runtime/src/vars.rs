//! `$name` variable storage, a plain name-to-stream map.

use crate::value::Value;
use iox_util::{FxHashMap, IoxError, Result};

#[derive(Debug, Default)]
pub struct VariableStore {
    vars: FxHashMap<String, Vec<Value>>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, values: Vec<Value>) {
        self.vars.insert(name.to_string(), values);
    }

    pub fn get(&self, name: &str) -> Result<&[Value]> {
        self.vars
            .get(name)
            .map(|v| v.as_slice())
            .ok_or_else(|| IoxError::NoSuchVariable(name.to_string()))
    }

    /// Like `get`, but an unset name yields an empty slice instead of an
    /// error (used by the append-mode `$name,` read).
    pub fn get_or_empty(&self, name: &str) -> &[Value] {
        self.vars.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_roundtrips() {
        let mut v = VariableStore::new();
        v.set("x", vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(v.get("x").unwrap(), &[Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn missing_variable_is_an_error() {
        let v = VariableStore::new();
        assert_eq!(v.get("nope").unwrap_err(), IoxError::NoSuchVariable("nope".into()));
    }
}
