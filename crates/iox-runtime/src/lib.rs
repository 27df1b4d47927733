//! The running state of an `iox` program: its value type, the stream
//! stack and cycle buffer, variable and mark storage, line sources, and
//! the operator table and line driver built on top of them.

pub mod context;
pub mod driver;
pub mod marks;
pub mod ops;
pub mod source;
pub mod stream;
pub mod value;
pub mod vars;

pub use context::Context;
pub use driver::Driver;
pub use source::{FileSource, LineSource, ReplSource};
pub use value::Value;
