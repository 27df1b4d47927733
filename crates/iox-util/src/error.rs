//! Error taxonomy shared by the lexer, runtime and CLI.
//!
//! Every variant maps to one of the exact diagnostic strings an `iox`
//! script can trigger at runtime. Interactive mode prints these to
//! stderr and continues; file mode propagates them and aborts the run.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IoxError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IoxError {
    #[error("quote parse issue @ {0}")]
    QuoteParse(u64),

    #[error("no such function '{0}'")]
    NoSuchFunction(String),

    #[error("no such variable '{0}'")]
    NoSuchVariable(String),

    #[error("no such mark '{0}'")]
    NoSuchMark(String),

    #[error("marks feature unavailable")]
    MarksUnavailable,

    #[error("divide by zero")]
    DivideByZero,

    #[error("slice length out of range")]
    SliceLengthOutOfRange,

    #[error("assertion failed @ ln {0}")]
    AssertionFailed(u64),
}
