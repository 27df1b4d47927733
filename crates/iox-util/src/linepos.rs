//! A position within a script's line stream.
//!
//! `iox` programs are driven line by line; the only location information
//! that ever surfaces (in error messages, `mark`/`jmp`) is a 0-based line
//! number plus, for file sources, a byte offset usable to seek back.

/// A seekable position captured by `mark` and restored by `jmp`.
///
/// For file-backed sources this is a real byte offset; interactive
/// sources never produce one (see `LineSource::mark`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeekPos(pub u64);

/// 0-based line number, used purely for diagnostics (`ln` in the
/// original interpreter's `main` loop starts at 0 and is never
/// reset between lines of the same run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineNo(pub u64);

impl LineNo {
    pub const START: LineNo = LineNo(0);

    pub fn next(self) -> LineNo {
        LineNo(self.0 + 1)
    }
}

impl std::fmt::Display for LineNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_no_starts_at_zero() {
        assert_eq!(LineNo::START.0, 0);
    }

    #[test]
    fn line_no_next_increments() {
        assert_eq!(LineNo::START.next(), LineNo(1));
    }

    #[test]
    fn line_no_displays_as_number() {
        assert_eq!(LineNo(9).to_string(), "9");
    }
}
