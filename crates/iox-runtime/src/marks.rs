//! `mark`/`jmp` bookkeeping: named seek positions captured mid-script.

use iox_util::{FxHashMap, IoxError, Result, SeekPos};

#[derive(Debug, Default)]
pub struct MarkTable {
    marks: FxHashMap<String, SeekPos>,
}

impl MarkTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, pos: SeekPos) {
        self.marks.insert(name.to_string(), pos);
    }

    pub fn get(&self, name: &str) -> Result<SeekPos> {
        self.marks
            .get(name)
            .copied()
            .ok_or_else(|| IoxError::NoSuchMark(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_roundtrips() {
        let mut m = MarkTable::new();
        m.set("top", SeekPos(42));
        assert_eq!(m.get("top").unwrap(), SeekPos(42));
    }

    #[test]
    fn missing_mark_is_an_error() {
        let m = MarkTable::new();
        assert_eq!(m.get("nope").unwrap_err(), IoxError::NoSuchMark("nope".into()));
    }
}
