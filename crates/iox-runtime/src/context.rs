//! The mutable state a running `iox` program carries between tokens and
//! between lines: the stream stack, cycle buffer, variable store, marks,
//! and the bits of position/mode tracking operators need (current line
//! number, whether `jmp` is available).

use crate::marks::MarkTable;
use crate::stream::{CycleBuffer, StreamStack};
use crate::value::Value;
use crate::vars::VariableStore;
use iox_util::{IoxError, LineNo, Result, SeekPos};
use std::io::{BufRead, Write};

pub struct Context {
    pub stream: StreamStack,
    pub cycle_buf: CycleBuffer,
    pub vars: VariableStore,
    pub marks: MarkTable,

    /// Line currently being evaluated, for error messages and `mark`.
    pub ln: LineNo,
    /// Seek position just after the current line, captured by `mark`.
    pub seekpos: SeekPos,
    /// Whether the previous token ended in a trailing comma.
    pub append: bool,
    /// Whether `jmp` can act (false in the REPL).
    pub can_jump: bool,
    /// Set once the current line has cycled (or recycled) its stream;
    /// reset by the driver at the start of each line. Keeps a line with
    /// several non-append literals cycling only once, at the first one,
    /// rather than once per literal.
    pub cycled_this_line: bool,

    pub stdout: Box<dyn Write>,
    pub stdin: Box<dyn BufRead>,
}

impl Context {
    pub fn new(stdout: Box<dyn Write>, stdin: Box<dyn BufRead>) -> Self {
        Self {
            stream: StreamStack::new(),
            cycle_buf: CycleBuffer::new(),
            vars: VariableStore::new(),
            marks: MarkTable::new(),
            ln: LineNo::START,
            seekpos: SeekPos(0),
            append: false,
            can_jump: false,
            cycled_this_line: false,
            stdout,
            stdin,
        }
    }

    pub fn cycle(&mut self) {
        self.stream.cycle(&mut self.cycle_buf);
    }

    pub fn recycle(&mut self) {
        self.stream.recycle(&mut self.cycle_buf);
    }

    pub fn flush(&mut self) {
        self.stream.flush();
    }

    pub fn clear(&mut self) {
        self.stream.clear_all();
        self.vars = VariableStore::new();
    }

    /// Push a literal value. The line's first non-append literal cycles
    /// the stream; later literals on the same line append into that same
    /// fresh frame even without a trailing-comma `append_this` flag, so a
    /// line keeps at most one cycle (testable invariant: exactly one
    /// `cycle()`/`recycle()` per executed line).
    pub fn push_value(&mut self, value: Value, append_this: bool) {
        if !append_this && !self.cycled_this_line {
            self.cycle();
            self.cycled_this_line = true;
        }
        self.stream.top_mut().push(value);
    }

    /// `_` token: cycle (unless appending, or the line already cycled)
    /// then copy the cycle buffer's contents onto the active stream frame.
    pub fn push_wildcard(&mut self, append_this: bool) {
        if !append_this && !self.cycled_this_line {
            self.cycle();
            self.cycled_this_line = true;
        }
        let buffered = self.cycle_buf.get().to_vec();
        self.stream.top_mut().extend(buffered);
    }

    /// `$name`: a non-empty stream writes the variable (a trailing comma
    /// instead reads the variable's old value onto the stream); an empty
    /// stream always reads, erroring if the name was never set.
    pub fn handle_variable(&mut self, name: &str, append_this: bool) -> Result<()> {
        if !self.stream.top().is_empty() {
            if append_this {
                let old = self.vars.get_or_empty(name).to_vec();
                self.stream.top_mut().extend(old);
            } else {
                let current = self.stream.top().clone();
                self.vars.set(name, current);
            }
        } else {
            self.flush();
            let values = self
                .vars
                .get(name)
                .map_err(|_| IoxError::NoSuchVariable(name.to_string()))?
                .to_vec();
            self.stream.top_mut().extend(values);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context::new(Box::new(Vec::new()), Box::new(std::io::empty()))
    }

    #[test]
    fn push_value_cycles_only_once_per_line() {
        let mut c = ctx();
        c.push_value(Value::Int(1), false);
        c.push_value(Value::Int(2), false);
        c.push_value(Value::Int(3), false);
        assert_eq!(c.stream.top(), &vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn push_value_appends_when_flagged() {
        let mut c = ctx();
        c.push_value(Value::Int(1), false);
        c.push_value(Value::Int(2), true);
        assert_eq!(c.stream.top(), &vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn a_fresh_line_cycles_away_the_previous_lines_stream() {
        let mut c = ctx();
        c.push_value(Value::Int(1), false);
        c.push_value(Value::Int(2), false);
        c.cycled_this_line = false; // simulates the driver starting a new line
        c.push_value(Value::Int(9), false);
        assert_eq!(c.stream.top(), &vec![Value::Int(9)]);
        assert_eq!(c.cycle_buf.get(), &[Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn variable_set_does_not_clear_the_stream() {
        let mut c = ctx();
        c.push_value(Value::Int(5), false);
        c.handle_variable("x", false).unwrap();
        assert_eq!(c.stream.top(), &vec![Value::Int(5)]);
    }

    #[test]
    fn variable_set_then_read_back_on_next_line() {
        let mut c = ctx();
        c.push_value(Value::Int(5), false);
        c.handle_variable("x", false).unwrap();
        c.cycle();
        c.handle_variable("x", false).unwrap();
        assert_eq!(c.stream.top(), &vec![Value::Int(5)]);
    }

    #[test]
    fn reading_unset_variable_is_an_error() {
        let mut c = ctx();
        let err = c.handle_variable("missing", false).unwrap_err();
        assert_eq!(err, IoxError::NoSuchVariable("missing".into()));
    }

    #[test]
    fn appending_variable_onto_nonempty_stream_pulls_its_old_value() {
        let mut c = ctx();
        c.push_value(Value::Int(1), false);
        c.handle_variable("x", false).unwrap();
        c.push_value(Value::Int(2), true);
        c.handle_variable("x", true).unwrap();
        assert_eq!(c.stream.top(), &vec![Value::Int(1), Value::Int(2), Value::Int(1)]);
    }

    #[test]
    fn appending_unset_variable_onto_nonempty_stream_is_silent_noop() {
        let mut c = ctx();
        c.push_value(Value::Int(9), false);
        c.handle_variable("never-set", true).unwrap();
        assert_eq!(c.stream.top(), &vec![Value::Int(9)]);
    }

    #[test]
    fn wildcard_copies_cycle_buffer_into_stream() {
        let mut c = ctx();
        c.push_value(Value::Int(1), false);
        c.cycle();
        c.push_wildcard(false);
        assert_eq!(c.stream.top(), &vec![Value::Int(1)]);
    }
}
