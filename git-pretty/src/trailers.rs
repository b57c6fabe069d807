//! Commit-message trailers and the `%(trailers,...)` option list.
//!
//! Trailers are the `Token: value` footer lines of the last message
//! paragraph (e.g. `Signed-off-by:`). The option parser builds a
//! [`TrailerFilterOptions`] out of a comma-separated `name[=value]`
//! list; rendering then filters and joins the parsed trailers.

use crate::error::Render;

/// One trailer line plus its folded continuation lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trailer<'a> {
    /// The key, e.g. `Signed-off-by`.
    pub token: &'a str,
    /// The value on the trailer line itself.
    pub value: &'a str,
    /// Raw continuation lines (leading whitespace preserved).
    pub continuations: Vec<&'a str>,
}

impl Trailer<'_> {
    fn display(&self, unfold: bool, value_only: bool) -> String {
        let mut s = String::new();
        if !value_only {
            s.push_str(self.token);
            s.push_str(": ");
        }
        s.push_str(self.value);
        for line in &self.continuations {
            if unfold {
                s.push(' ');
                s.push_str(line.trim_start());
            } else {
                s.push('\n');
                s.push_str(line);
            }
        }
        s
    }
}

/// A filter/format descriptor built from the directive's option list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrailerFilterOptions {
    /// Case-insensitive key prefixes to keep (trailing `:` stripped).
    pub key_filters: Vec<String>,
    /// Separator between rendered trailers; `\n` when absent.
    pub separator: Option<String>,
    /// Only emit trailers matching `key_filters`.
    pub only_matching: bool,
    /// Join continuation lines onto the value with single spaces.
    pub unfold: bool,
    /// Emit values without their keys.
    pub value_only: bool,
}

impl TrailerFilterOptions {
    fn matches(&self, token: &str) -> bool {
        self.key_filters
            .iter()
            .any(|key| token.len() >= key.len() && token[..key.len()].eq_ignore_ascii_case(key))
    }
}

/// Parse the option list that follows `trailers` inside the directive,
/// e.g. `,key=Signed-off-by:,only,unfold`. The whole list must be
/// consumed; the first unrecognized token makes the directive fatally
/// malformed, since the closing `)` was already found by the caller.
pub fn parse_options(args: &str) -> Result<TrailerFilterOptions, Render> {
    let mut options = TrailerFilterOptions::default();
    let mut rest = args;
    while let Some(tail) = rest.strip_prefix(',') {
        let (token, tail) = match tail.find(',') {
            Some(at) => (&tail[..at], &tail[at..]),
            None => (tail, ""),
        };
        if !option(&mut options, token) {
            return Err(Render::InvalidFormatDirective(format!("(trailers,{token})")));
        }
        rest = tail;
    }
    if rest.is_empty() {
        Ok(options)
    } else {
        Err(Render::InvalidFormatDirective(format!("(trailers{rest})")))
    }
}

fn option(options: &mut TrailerFilterOptions, token: &str) -> bool {
    if let Some(prefix) = token.strip_prefix("key=") {
        let prefix = prefix.strip_suffix(':').unwrap_or(prefix);
        options.key_filters.push(prefix.to_string());
        options.only_matching = true;
        return true;
    }
    if let Some(template) = token.strip_prefix("separator=") {
        return match expand_literal(template) {
            Some(separator) => {
                options.separator = Some(separator);
                true
            }
            None => false,
        };
    }
    let (name, value) = match token.split_once('=') {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    };
    let value = match value {
        None => true,
        Some("true" | "yes" | "on" | "1") => true,
        Some("false" | "no" | "off" | "0") => false,
        Some(_) => return false,
    };
    match name {
        "only" => options.only_matching = value,
        "unfold" => options.unfold = value,
        "valueonly" => options.value_only = value,
        _ => return false,
    }
    true
}

/// Expand the fixed escapes of a separator template: `%n`, `%%` and
/// `%xNN`. Nothing else — separator values never re-enter the
/// placeholder machinery, so they cannot recurse.
fn expand_literal(template: &str) -> Option<String> {
    let mut out = String::new();
    let mut rest = template;
    while let Some(at) = rest.find('%') {
        out.push_str(&rest[..at]);
        let tail = &rest[at + 1..];
        if let Some(tail) = tail.strip_prefix('n') {
            out.push('\n');
            rest = tail;
        } else if let Some(tail) = tail.strip_prefix('%') {
            out.push('%');
            rest = tail;
        } else if let Some(tail) = tail.strip_prefix('x') {
            let digits = tail.as_bytes();
            if digits.len() < 2 || !digits[0].is_ascii_hexdigit() || !digits[1].is_ascii_hexdigit()
            {
                return None;
            }
            let byte = u8::from_str_radix(&tail[..2], 16).ok()?;
            out.push(byte as char);
            rest = &tail[2..];
        } else {
            return None;
        }
    }
    out.push_str(rest);
    Some(out)
}

/// Extract the trailer block from a commit message: the last paragraph,
/// provided every line in it is a trailer or a continuation.
pub fn parse_message(message: &str) -> Vec<Trailer<'_>> {
    let block = message.trim_end_matches('\n');
    let block = match block.rfind("\n\n") {
        Some(at) => &block[at + 2..],
        None => block,
    };
    let mut trailers: Vec<Trailer> = Vec::new();
    for line in block.split('\n') {
        if line.starts_with(' ') || line.starts_with('\t') {
            match trailers.last_mut() {
                Some(trailer) => trailer.continuations.push(line),
                None => return Vec::new(),
            }
            continue;
        }
        match parser::trailer(line) {
            Ok((_, trailer)) => trailers.push(trailer),
            Err(_) => return Vec::new(),
        }
    }
    trailers
}

/// Render the message's trailers into `out` under `options`.
pub(crate) fn render(out: &mut String, message: &str, options: &TrailerFilterOptions) {
    let separator = options.separator.as_deref().unwrap_or("\n");
    let mut first = true;
    for trailer in parse_message(message) {
        if options.only_matching && !options.matches(trailer.token) {
            continue;
        }
        if !first {
            out.push_str(separator);
        }
        out.push_str(&trailer.display(options.unfold, options.value_only));
        first = false;
    }
}

/// The trailer-line grammar.
pub mod parser {
    use nom::{
        bytes::complete::{tag, take_while1},
        character::complete::space0,
        combinator::rest,
        IResult,
    };

    use super::Trailer;

    fn token(input: &str) -> IResult<&str, &str> {
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-')(input)
    }

    /// Parse a single `Token: value` line.
    pub fn trailer(input: &str) -> IResult<&str, Trailer<'_>> {
        let (input, token) = token(input)?;
        let (input, _) = tag(":")(input)?;
        let (input, _) = space0(input)?;
        let (input, value) = rest(input)?;
        Ok((
            input,
            Trailer {
                token,
                value: value.trim_end(),
                continuations: Vec::new(),
            },
        ))
    }
}
