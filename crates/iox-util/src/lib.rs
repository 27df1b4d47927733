//! Shared foundations used by the lexer, runtime and CLI crates:
//! the error taxonomy every diagnostic message is drawn from, a
//! minimal line/seek-position type, and a fast hash map re-export
//! used for the variable store and mark table.

pub mod error;
pub mod linepos;

pub use error::{IoxError, Result};
pub use linepos::{LineNo, SeekPos};
pub use rustc_hash::{FxHashMap, FxHashSet};
