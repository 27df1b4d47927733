//! Turns a stream of source lines into a running program: tracks
//! indentation so a failed `?` skips its indented block (and a
//! following `else` at the same indent runs instead), and drives the
//! token loop that feeds [`Context`] and [`crate::ops::call`].

use crate::context::Context;
use crate::ops;
use crate::source::LineSource;
use crate::value::Value;
use iox_lex::{tokenize_line, Token, TokenKind};
use iox_util::{LineNo, Result, SeekPos};

pub struct Driver<S> {
    pub ctx: Context,
    source: S,
    interactive: bool,
    /// Set after a line is skipped or a predicate fails: lines indented
    /// deeper than this are skipped until one comes back out to it.
    skip_below: Option<usize>,
    /// `(indent, predicate succeeded)` for the most recent line that
    /// evaluated a `?`, so a same-indent `else` knows whether to run.
    pending_predicate: Option<(usize, bool)>,
}

impl<S: LineSource> Driver<S> {
    pub fn new(ctx: Context, source: S, interactive: bool) -> Self {
        Self {
            ctx,
            source,
            interactive,
            skip_below: None,
            pending_predicate: None,
        }
    }

    /// Drives lines to completion. A line that errors out either aborts
    /// the run (file mode) or is reported to stderr and skipped,
    /// leaving the session alive (interactive mode).
    pub fn run(&mut self) -> Result<()> {
        let mut line_no = LineNo::START;
        loop {
            let raw = match self.source.read_line() {
                Ok(Some(l)) => l,
                Ok(None) => break,
                Err(_) => break,
            };
            let this_line = line_no;
            line_no = line_no.next();

            if let Err(e) = self.handle_line(&raw, this_line) {
                if self.interactive {
                    tracing::warn!(line = %this_line, %e, "script error, continuing session");
                    eprintln!("{e}");
                } else {
                    tracing::error!(line = %this_line, %e, "script error, aborting");
                    eprintln!("{e}");
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn handle_line(&mut self, raw: &str, this_line: LineNo) -> Result<()> {
        let indent = leading_indent(raw);
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }

        if let Some(threshold) = self.skip_below {
            if indent > threshold {
                return Ok(());
            }
            self.skip_below = None;
        }

        self.ctx.ln = this_line;
        self.ctx.seekpos = self.source.seek_pos();
        self.ctx.can_jump = self.source.can_jump();

        let mut tokens = tokenize_line(trimmed, this_line.0)?;
        if tokens.is_empty() {
            return Ok(());
        }

        if is_else(&tokens[0]) {
            let should_run = self
                .pending_predicate
                .map(|(at_indent, succeeded)| at_indent == indent && !succeeded)
                .unwrap_or(false);
            if !should_run {
                self.skip_below = Some(indent);
                return Ok(());
            }
        }

        if self.interactive && !ends_with_out(&tokens) {
            tokens.push(Token {
                kind: TokenKind::Op("dbg".to_string()),
                append_this: false,
            });
        }

        self.ctx.cycled_this_line = false;
        if matches!(tokens[0].kind, TokenKind::Wildcard) {
            self.ctx.recycle();
            self.ctx.cycled_this_line = true;
        }

        let (had_predicate, aborted, jump_target) = self.run_tokens(&tokens)?;

        if had_predicate {
            self.pending_predicate = Some((indent, !aborted));
        } else {
            self.pending_predicate = None;
        }
        if aborted {
            self.skip_below = Some(indent);
        }
        if let Some(pos) = jump_target {
            self.source.seek(pos)?;
        }
        Ok(())
    }

    fn run_tokens(&mut self, tokens: &[Token]) -> Result<(bool, bool, Option<SeekPos>)> {
        let mut had_predicate = false;
        let mut jump_target = None;
        for tok in tokens {
            match &tok.kind {
                TokenKind::Str(s) => self.ctx.push_value(Value::Str(s.clone()), tok.append_this),
                TokenKind::Int(i) => self.ctx.push_value(Value::Int(*i), tok.append_this),
                TokenKind::Real(f) => self.ctx.push_value(Value::Real(*f), tok.append_this),
                TokenKind::Bool(b) => self.ctx.push_value(Value::Bool(*b), tok.append_this),
                TokenKind::Wildcard => self.ctx.push_wildcard(tok.append_this),
                TokenKind::Variable(name) => self.ctx.handle_variable(name, tok.append_this)?,
                TokenKind::Op(name) => {
                    if name == "?" {
                        had_predicate = true;
                    }
                    let mut capture = |pos: SeekPos| -> Result<()> {
                        jump_target = Some(pos);
                        Ok(())
                    };
                    let should_continue = ops::call(&mut self.ctx, name, &mut capture)?;
                    if !should_continue {
                        return Ok((had_predicate, true, jump_target));
                    }
                }
            }
        }
        Ok((had_predicate, false, jump_target))
    }
}

fn leading_indent(raw: &str) -> usize {
    raw.len() - raw.trim_start().len()
}

fn is_else(tok: &Token) -> bool {
    matches!(&tok.kind, TokenKind::Op(s) if s == "else")
}

fn ends_with_out(tokens: &[Token]) -> bool {
    matches!(tokens.last(), Some(Token { kind: TokenKind::Op(s), .. }) if s == "out")
}
