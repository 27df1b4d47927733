//! The operator table: everything a token can name besides a literal,
//! a wildcard, or a `$variable`.
//!
//! [`call`] is the single entry point the line driver uses once it has
//! classified a token as [`iox_lex::TokenKind::Op`]. It returns whether
//! the line should keep executing — only `?` on a false predicate ever
//! asks the driver to stop.

use crate::context::Context;
use crate::value::Value;
use iox_util::{IoxError, Result, SeekPos};
use rand::Rng;
use std::io::{BufRead, Write};

pub fn call(ctx: &mut Context, name: &str, jump: &mut dyn FnMut(SeekPos) -> Result<()>) -> Result<bool> {
    match name {
        "out" => {
            write_out(ctx, "", true, false);
            Ok(true)
        }
        "in" => {
            read_in(ctx);
            Ok(true)
        }
        "dbg" => {
            write_out(ctx, ", ", true, true);
            Ok(true)
        }
        "?" => q(ctx),
        "not" | "!" => {
            notop(ctx)?;
            Ok(true)
        }
        "assert" => {
            assert_this(ctx)?;
            Ok(true)
        }
        "else" => Ok(true),
        "sleep" => {
            sleep_op(ctx)?;
            Ok(true)
        }
        "len" => {
            length(ctx);
            Ok(true)
        }
        "int" => {
            cast_int(ctx)?;
            Ok(true)
        }
        // Reserved casts, never implemented upstream: leave the stream untouched.
        "real" | "str" => Ok(true),
        "bool" | "!!" => {
            cast_bool(ctx)?;
            Ok(true)
        }
        "+" => {
            sum(ctx)?;
            Ok(true)
        }
        "-" => {
            diff(ctx)?;
            Ok(true)
        }
        "*" => {
            mult(ctx)?;
            Ok(true)
        }
        "/" => {
            div(ctx)?;
            Ok(true)
        }
        "flip" => {
            ctx.stream.top_mut().reverse();
            Ok(true)
        }
        "rev" => {
            rev(ctx);
            Ok(true)
        }
        "seq" => {
            seq(ctx)?;
            Ok(true)
        }
        "<=" | ">=" | "<" | ">" => Ok(true),
        "==" => {
            cmp(ctx)?;
            Ok(true)
        }
        "!=" => {
            cmp(ctx)?;
            notop(ctx)?;
            Ok(true)
        }
        "rand" => {
            randint(ctx)?;
            Ok(true)
        }
        "choice" => {
            choice(ctx);
            Ok(true)
        }
        "type" => {
            type_op(ctx);
            Ok(true)
        }
        "mark" => {
            mark_op(ctx);
            Ok(true)
        }
        "jmp" => {
            goto_mark(ctx, jump)?;
            Ok(true)
        }
        ";" => {
            ctx.flush();
            Ok(true)
        }
        "join" => {
            join(ctx);
            Ok(true)
        }
        "take" => {
            take(ctx)?;
            Ok(true)
        }
        "front" => {
            if let Some(first) = ctx.stream.top().first().cloned() {
                ctx.stream.replace_top(vec![first]);
            }
            Ok(true)
        }
        "back" => {
            if let Some(last) = ctx.stream.top().last().cloned() {
                ctx.stream.replace_top(vec![last]);
            }
            Ok(true)
        }
        _ => Err(IoxError::NoSuchFunction(name.to_string())),
    }
}

fn write_out(ctx: &mut Context, sep: &str, newline: bool, quote_strings: bool) {
    let mut buf = String::new();
    for (i, v) in ctx.stream.top().iter().enumerate() {
        if i > 0 {
            buf.push_str(sep);
        }
        match v {
            Value::Str(s) if quote_strings => {
                buf.push('\'');
                buf.push_str(s);
                buf.push('\'');
            }
            other => buf.push_str(&other.as_str_lossy()),
        }
    }
    if newline {
        buf.push('\n');
    }
    let _ = ctx.stdout.write_all(buf.as_bytes());
}

fn read_in(ctx: &mut Context) {
    if !ctx.stream.top().is_empty() {
        write_out(ctx, "", false, false);
    }
    let mut line = String::new();
    let _ = ctx.stdin.read_line(&mut line);
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    ctx.flush();
    ctx.stream.top_mut().push(Value::Str(line));
}

fn q(ctx: &mut Context) -> Result<bool> {
    cast_bool(ctx)?;
    Ok(match ctx.stream.top().first() {
        Some(Value::Bool(b)) => *b,
        _ => true,
    })
}

fn cast_bool(ctx: &mut Context) -> Result<()> {
    let items = std::mem::take(ctx.stream.top_mut());
    let mut result = Vec::with_capacity(items.len());
    for v in items {
        result.push(Value::Bool(v.to_bool()?));
    }
    ctx.stream.replace_top(result);
    Ok(())
}

fn cast_int(ctx: &mut Context) -> Result<()> {
    let items = std::mem::take(ctx.stream.top_mut());
    let mut result = Vec::with_capacity(items.len());
    for v in items {
        result.push(Value::Int(v.to_int()?));
    }
    ctx.stream.replace_top(result);
    Ok(())
}

fn notop(ctx: &mut Context) -> Result<()> {
    cast_bool(ctx)?;
    for v in ctx.stream.top_mut() {
        if let Value::Bool(b) = v {
            *b = !*b;
        }
    }
    Ok(())
}

fn assert_this(ctx: &mut Context) -> Result<()> {
    let original = ctx.stream.top().clone();
    for v in &original {
        if !v.to_bool()? {
            return Err(IoxError::AssertionFailed(ctx.ln.0));
        }
    }
    ctx.stream.replace_top(original);
    Ok(())
}

fn sum(ctx: &mut Context) -> Result<()> {
    let items = std::mem::take(ctx.stream.top_mut());
    let mut total: i64 = 0;
    for v in &items {
        total += v.to_int()?;
    }
    ctx.stream.top_mut().push(Value::Int(total));
    Ok(())
}

fn diff(ctx: &mut Context) -> Result<()> {
    let items = std::mem::take(ctx.stream.top_mut());
    let mut total: i64 = 0;
    for (i, v) in items.iter().enumerate() {
        let n = v.to_int()?;
        if i == 0 {
            total += n;
        } else {
            total -= n;
        }
    }
    ctx.stream.top_mut().push(Value::Int(total));
    Ok(())
}

fn mult(ctx: &mut Context) -> Result<()> {
    let items = std::mem::take(ctx.stream.top_mut());
    let mut total: i64 = 1;
    for v in &items {
        total *= v.to_int()?;
    }
    ctx.stream.top_mut().push(Value::Int(total));
    Ok(())
}

fn div(ctx: &mut Context) -> Result<()> {
    let items = std::mem::take(ctx.stream.top_mut());
    let mut total: i64 = 1;
    for (i, v) in items.iter().enumerate() {
        let n = v.to_int()?;
        if i == 0 {
            total *= n;
        } else {
            if n == 0 {
                return Err(IoxError::DivideByZero);
            }
            total /= n;
        }
    }
    ctx.stream.top_mut().push(Value::Int(total));
    Ok(())
}

fn rev(ctx: &mut Context) {
    for v in ctx.stream.top_mut() {
        if let Value::Str(s) = v {
            *s = s.chars().rev().collect();
        }
    }
}

fn seq(ctx: &mut Context) -> Result<()> {
    let items = std::mem::take(ctx.stream.top_mut());
    let nums = items.iter().map(Value::to_int).collect::<Result<Vec<_>>>()?;
    let (start, end, inc) = match nums.len() {
        1 => (1, nums[0], if nums[0] >= 1 { 1 } else { -1 }),
        2 => (nums[0], nums[1], if nums[0] <= nums[1] { 1 } else { -1 }),
        3 => (nums[0], nums[1], nums[2]),
        _ => (1, 0, 1),
    };
    let mut result = Vec::new();
    if inc > 0 {
        let mut i = start;
        while i <= end {
            result.push(Value::Int(i));
            i += inc;
        }
    } else if inc < 0 {
        let mut i = start;
        while i >= end {
            result.push(Value::Int(i));
            i += inc;
        }
    }
    ctx.stream.replace_top(result);
    Ok(())
}

fn length(ctx: &mut Context) {
    let len = ctx.stream.top().len() as i64;
    ctx.flush();
    ctx.stream.top_mut().push(Value::Int(len));
}

fn cmp(ctx: &mut Context) -> Result<()> {
    let items = ctx.stream.top().clone();
    let result = equal_as(&items, |v| match v {
        Value::Bool(b) => Some(*b),
        _ => None,
    })
    .or_else(|| equal_as(&items, |v| match v {
        Value::Int(i) => Some(*i),
        _ => None,
    }))
    .or_else(|| equal_as(&items, |v| match v {
        Value::Str(s) => Some(s.clone()),
        _ => None,
    }))
    .unwrap_or(false);
    ctx.stream.replace_top(vec![Value::Bool(result)]);
    Ok(())
}

fn equal_as<T: PartialEq>(items: &[Value], extract: impl Fn(&Value) -> Option<T>) -> Option<bool> {
    let extracted: Option<Vec<T>> = items.iter().map(extract).collect();
    let extracted = extracted?;
    if extracted.len() <= 1 {
        return Some(true);
    }
    Some(extracted.windows(2).all(|w| w[0] == w[1]))
}

fn join(ctx: &mut Context) {
    let mut items = std::mem::take(ctx.stream.top_mut());
    let sep = items.pop().map(|v| v.as_str_lossy()).unwrap_or_default();
    let joined = items.iter().map(Value::as_str_lossy).collect::<Vec<_>>().join(&sep);
    ctx.stream.top_mut().push(Value::Str(joined));
}

fn take(ctx: &mut Context) -> Result<()> {
    let mut items = std::mem::take(ctx.stream.top_mut());
    let count_val = items.pop().ok_or(IoxError::SliceLengthOutOfRange)?;
    let k = count_val.to_int()?;
    if k < 1 {
        return Err(IoxError::SliceLengthOutOfRange);
    }
    let take_n = (k as usize).min(items.len());
    items.truncate(take_n);
    ctx.stream.replace_top(items);
    Ok(())
}

fn mark_op(ctx: &mut Context) {
    let name = ctx.stream.top().first().map(Value::as_str_lossy).unwrap_or_default();
    let pos = ctx.seekpos;
    ctx.marks.set(&name, pos);
}

fn goto_mark(ctx: &mut Context, jump: &mut dyn FnMut(SeekPos) -> Result<()>) -> Result<()> {
    if !ctx.can_jump {
        return Err(IoxError::MarksUnavailable);
    }
    let name = ctx.stream.top().first().map(Value::as_str_lossy).unwrap_or_default();
    let pos = ctx.marks.get(&name)?;
    jump(pos)
}

fn randint(ctx: &mut Context) -> Result<()> {
    let s = match ctx.stream.top().first() {
        Some(v) => v.to_int()?,
        None => 0,
    };
    let e = match ctx.stream.top().get(1) {
        Some(v) => v.to_int()?,
        None => s,
    };
    ctx.flush();
    let value = if s <= e { rand::thread_rng().gen_range(s..=e) } else { s };
    ctx.stream.top_mut().push(Value::Int(value));
    Ok(())
}

fn choice(ctx: &mut Context) {
    let items = ctx.stream.top().clone();
    if items.is_empty() {
        return;
    }
    let idx = rand::thread_rng().gen_range(0..items.len());
    ctx.stream.replace_top(vec![items[idx].clone()]);
}

fn sleep_op(ctx: &mut Context) -> Result<()> {
    let secs = match ctx.stream.top().first() {
        Some(v) => v.to_int()?,
        None => 0,
    };
    ctx.flush();
    if secs > 0 {
        std::thread::sleep(std::time::Duration::from_secs(secs as u64));
    }
    Ok(())
}

fn type_op(ctx: &mut Context) {
    let items = std::mem::take(ctx.stream.top_mut());
    for v in items {
        ctx.stream.top_mut().push(Value::Str(v.type_name().to_string()));
    }
}
