//! Line-oriented tokenizer for `iox` source.
//!
//! `iox` has no multi-line expressions: each line is dedented, classified
//! by indentation, and tokenized independently of every other line. This
//! crate owns that tokenization step; everything indentation- and
//! control-flow-related belongs to the runtime's line driver instead.

pub mod cursor;
pub mod token;
pub mod tokenizer;

pub use token::{Token, TokenKind};
pub use tokenizer::tokenize_line;
