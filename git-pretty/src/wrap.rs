//! The `%w(width[,indent1[,indent2]])` line-wrap directive and the
//! word-wrap transform it defers to.
//!
//! Wrapping is lazy: the context remembers where the un-wrapped region
//! of the output buffer starts, and only re-flows it when the settings
//! change (or when the render finishes). Wrapping eagerly per
//! placeholder would split words at placeholder boundaries.

use unicode_width::UnicodeWidthStr;

/// Wrap settings. All zero means "no wrapping, no indent".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WrapSpec {
    /// Target line width in display columns; `0` disables wrapping and
    /// leaves only the indents.
    pub width: usize,
    /// Indent of the first emitted line.
    pub indent_first: usize,
    /// Indent of every later line.
    pub indent_rest: usize,
}

/// Parse a `%w(...)` directive. `suffix` starts at the `w`. All three
/// numbers are optional and default to 0. Returns the spec and consumed
/// byte count, or `None` on any malformed tail (literal fallback).
pub fn parse(suffix: &str) -> Option<(WrapSpec, usize)> {
    let body = suffix.get(1..)?.strip_prefix('(')?;
    let close = body.find(')')?;
    let args = &body[..close];
    let mut numbers = [0usize; 3];
    if !args.is_empty() {
        let mut fields = args.split(',');
        for slot in numbers.iter_mut() {
            match fields.next() {
                None => break,
                Some("") => *slot = 0,
                Some(n) => *slot = n.parse().ok()?,
            }
        }
        if fields.next().is_some() {
            return None;
        }
    }
    Some((
        WrapSpec {
            width: numbers[0],
            indent_first: numbers[1],
            indent_rest: numbers[2],
        },
        close + 3,
    ))
}

/// Re-flow `text` under `spec`. Existing newlines are hard breaks;
/// words within a line are greedily packed up to `width` columns,
/// indents included. Blank lines stay blank.
pub(crate) fn fill(text: &str, spec: &WrapSpec) -> String {
    if *spec == WrapSpec::default() {
        return text.to_string();
    }
    let mut lines: Vec<String> = Vec::new();
    let mut emitted = false;
    for raw in text.split('\n') {
        if raw.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        if spec.width == 0 {
            let indent = if emitted {
                spec.indent_rest
            } else {
                spec.indent_first
            };
            lines.push(format!("{}{}", " ".repeat(indent), raw));
            emitted = true;
            continue;
        }
        let mut indent = if emitted {
            spec.indent_rest
        } else {
            spec.indent_first
        };
        let mut current = String::new();
        let mut used = 0;
        for word in raw.split_whitespace() {
            let w = word.width();
            if current.is_empty() {
                current = format!("{}{}", " ".repeat(indent), word);
                used = indent + w;
            } else if used + 1 + w > spec.width {
                lines.push(current);
                emitted = true;
                indent = spec.indent_rest;
                current = format!("{}{}", " ".repeat(indent), word);
                used = indent + w;
            } else {
                current.push(' ');
                current.push_str(word);
                used += 1 + w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
            emitted = true;
        }
    }
    lines.join("\n")
}
