//! Argument extraction for deprecated call sites.
//!
//! Call arguments are recovered with a regular expression rather than a
//! parser. The approximation is bounded:
//!
//! - the arity is fixed (2 or 3)
//! - leading arguments may not contain a comma (`[^,\n]+`)
//! - the final argument may not contain a closing parenthesis (`[^)\n]+`)
//! - the statement must end with `);`
//!
//! A call whose arguments nest commas or parentheses beyond that simply does
//! not match and is left alone. Those sites are handled by
//! [`LiteralRewrite`](super::literal::LiteralRewrite) instead.

use regex::Regex;

use crate::config::CallPattern;
use crate::errors::Result;

/// Layout of a matched call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// All arguments and the terminator on the opening line
    SingleLine,
    /// Final argument on a continuation line
    MultiLine,
}

/// Split an argument list into exactly `arity` trimmed pieces.
///
/// Splitting is left-to-right on the first `arity - 1` commas; the last piece
/// keeps any commas that follow. Nothing is nesting-aware, so
/// `f(a, b), c` splits as `f(a`, `b), c` for arity 2.
pub fn split_arguments(text: &str, arity: usize) -> Option<Vec<String>> {
    if arity == 0 {
        return None;
    }

    let parts: Vec<String> = text
        .splitn(arity, ',')
        .map(|part| part.trim().to_string())
        .collect();

    if parts.len() != arity || parts.iter().any(|part| part.is_empty()) {
        return None;
    }

    Some(parts)
}

/// Compiled locating patterns for one [`CallPattern`].
///
/// Both patterns capture the line's indentation in group 1 and the raw
/// argument text in group 2.
#[derive(Debug, Clone)]
pub struct ArgumentExtractor {
    arity: usize,
    single_line: Regex,
    multi_line: Regex,
}

impl ArgumentExtractor {
    pub fn new(call: &CallPattern) -> Result<Self> {
        Ok(Self {
            arity: call.arity,
            single_line: Regex::new(&single_line_pattern(call))?,
            multi_line: Regex::new(&multi_line_pattern(call))?,
        })
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn pattern(&self, shape: CallShape) -> &Regex {
        match shape {
            CallShape::SingleLine => &self.single_line,
            CallShape::MultiLine => &self.multi_line,
        }
    }

    /// Split raw argument text captured by one of the patterns.
    pub fn extract(&self, arguments: &str) -> Option<Vec<String>> {
        split_arguments(arguments, self.arity)
    }
}

fn call_prefix(call: &CallPattern) -> String {
    format!(
        r"(?m)^([ \t]*){}\.{}\(",
        regex::escape(&call.receiver),
        regex::escape(&call.method)
    )
}

fn leading_arguments(arity: usize) -> String {
    format!(r"(?:[^,\n]+,[ \t]*){{{}}}", arity.saturating_sub(1))
}

pub(crate) fn single_line_pattern(call: &CallPattern) -> String {
    format!(
        r"{}({}[^)\n]+)\);",
        call_prefix(call),
        leading_arguments(call.arity)
    )
}

pub(crate) fn multi_line_pattern(call: &CallPattern) -> String {
    format!(
        r"{}({}\r?\n\s*[^)\n]+?)\s*\);",
        call_prefix(call),
        leading_arguments(call.arity)
    )
}
