//! Splits one already-dedented line of `iox` source into tokens.
//!
//! Separators are runs of spaces and commas; a comma immediately trailing
//! a token is stripped and instead marks the *next* token with
//! `append_this`, telling the runtime to append to the current stream
//! rather than cycling it first. Quoted text (`"`/`'`) is immune to
//! separators; an unterminated quote at end of line is a fatal error.

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use iox_util::{IoxError, Result};

pub fn tokenize_line(line: &str, line_no: u64) -> Result<Vec<Token>> {
    let lexemes = split_lexemes(line, line_no)?;
    let mut tokens = Vec::with_capacity(lexemes.len());
    let mut append_this = false;
    for (text, trailing_comma) in lexemes {
        tokens.push(Token {
            kind: classify(&text),
            append_this,
        });
        append_this = trailing_comma;
    }
    Ok(tokens)
}

/// Scans `line` into raw lexemes paired with whether they were ended by a
/// trailing comma (as opposed to a space or end of line).
fn split_lexemes(line: &str, line_no: u64) -> Result<Vec<(String, bool)>> {
    let mut out = Vec::new();
    let mut cursor = Cursor::new(line);
    let mut buf = String::new();
    let mut in_quote = false;

    loop {
        if cursor.is_at_end() {
            if in_quote {
                return Err(IoxError::QuoteParse(line_no));
            }
            push_lexeme(&mut out, &buf, false);
            break;
        }
        let c = cursor.current_char();
        cursor.advance();

        if c == '"' || c == '\'' {
            in_quote = !in_quote;
            buf.push(c);
        } else if !in_quote && (c == ' ' || c == ',') {
            push_lexeme(&mut out, &buf, c == ',');
            buf.clear();
        } else {
            buf.push(c);
        }
    }

    Ok(out)
}

fn push_lexeme(out: &mut Vec<(String, bool)>, raw: &str, trailing_comma: bool) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    out.push((trimmed.to_string(), trailing_comma));
}

fn classify(text: &str) -> TokenKind {
    if text.starts_with('"') || text.starts_with('\'') {
        let inner = &text[1..text.len() - 1];
        return TokenKind::Str(inner.to_string());
    }
    if text == "_" {
        return TokenKind::Wildcard;
    }
    if text == "true" {
        return TokenKind::Bool(true);
    }
    if text == "false" {
        return TokenKind::Bool(false);
    }
    if let Some(name) = text.strip_prefix('$') {
        return TokenKind::Variable(name.to_string());
    }
    if let Ok(i) = text.parse::<i64>() {
        return TokenKind::Int(i);
    }
    if let Ok(f) = text.parse::<f64>() {
        return TokenKind::Real(f);
    }
    TokenKind::Op(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<TokenKind> {
        tokenize_line(line, 1).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn splits_on_spaces() {
        assert_eq!(kinds("1 2 3"), vec![TokenKind::Int(1), TokenKind::Int(2), TokenKind::Int(3)]);
    }

    #[test]
    fn splits_on_commas() {
        assert_eq!(kinds("1,2,3"), vec![TokenKind::Int(1), TokenKind::Int(2), TokenKind::Int(3)]);
    }

    #[test]
    fn collapses_runs_of_separators() {
        assert_eq!(kinds("1,  ,  2"), vec![TokenKind::Int(1), TokenKind::Int(2)]);
    }

    #[test]
    fn trailing_comma_marks_next_token_append() {
        let toks = tokenize_line("1, 2", 1).unwrap();
        assert!(!toks[0].append_this);
        assert!(toks[1].append_this);
    }

    #[test]
    fn double_quoted_string_strips_quotes() {
        assert_eq!(kinds("\"hello world\""), vec![TokenKind::Str("hello world".into())]);
    }

    #[test]
    fn single_quoted_string_strips_quotes() {
        assert_eq!(kinds("'hi there'"), vec![TokenKind::Str("hi there".into())]);
    }

    #[test]
    fn quoted_string_is_separator_immune() {
        assert_eq!(kinds("\"a, b\" out"), vec![TokenKind::Str("a, b".into()), TokenKind::Op("out".into())]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = tokenize_line("\"oops", 3).unwrap_err();
        assert_eq!(err, IoxError::QuoteParse(3));
    }

    #[test]
    fn wildcard_and_variable_and_bool() {
        assert_eq!(kinds("_ $x true false"), vec![
            TokenKind::Wildcard,
            TokenKind::Variable("x".into()),
            TokenKind::Bool(true),
            TokenKind::Bool(false),
        ]);
    }

    #[test]
    fn real_literal() {
        assert_eq!(kinds("3.14"), vec![TokenKind::Real(3.14)]);
    }

    #[test]
    fn unknown_identifier_is_an_op() {
        assert_eq!(kinds("out"), vec![TokenKind::Op("out".into())]);
    }

    #[test]
    fn empty_line_has_no_tokens() {
        assert!(kinds("").is_empty());
    }
}
