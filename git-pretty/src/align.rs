//! Parsing and applying the padding/alignment directives
//! `%<( %>( %><( %>>(`.
//!
//! Parsing installs an [`AlignmentSpec`] on the render context; the
//! dispatcher applies it to the output of the next placeholder. Widths
//! are display columns, not bytes.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const DOTS: &str = "..";

/// Which side padding goes on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flush {
    /// `%<(`: content flushed right against the start, padded on the
    /// right.
    Right,
    /// `%>(`: padded on the left.
    Left,
    /// `%>>(`: padded on the left; on overflow, trailing spaces already
    /// emitted before the region are absorbed instead of doubling pads.
    LeftAndSteal,
    /// `%><(`: padded on both sides.
    Both,
}

/// What to do when the content is wider than the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Truncate {
    /// Overflow untouched.
    #[default]
    None,
    /// `ltrunc`: keep the tail.
    Left,
    /// `mtrunc`: keep both ends.
    Middle,
    /// `trunc`: keep the head.
    Right,
}

/// The width unit of a directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    /// A fixed number of display columns.
    Chars(usize),
    /// Pad out to the named output column (the `|` forms). Negative
    /// inputs were already resolved against the terminal width at parse
    /// time.
    AtColumn(usize),
}

/// A pending alignment directive. At most one exists at a time; a new
/// directive replaces the prior one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlignmentSpec {
    /// Padding side.
    pub flush: Flush,
    /// Overflow policy.
    pub truncate: Truncate,
    /// Target width.
    pub width: Width,
}

/// Parse an alignment directive. `suffix` starts at the `<` or `>`;
/// `columns` is the terminal width used to resolve negative `|` widths.
/// Returns the spec and the consumed byte count, or `None` for any
/// deviation from `anchor ['|'] '(' width [',' trunc] ')'` — the caller
/// then falls back to a literal `%`.
pub fn parse(suffix: &str, columns: usize) -> Option<(AlignmentSpec, usize)> {
    let (flush, after) = if let Some(rest) = suffix.strip_prefix('<') {
        (Flush::Right, rest)
    } else if let Some(rest) = suffix.strip_prefix(">>") {
        (Flush::LeftAndSteal, rest)
    } else if let Some(rest) = suffix.strip_prefix("><") {
        (Flush::Both, rest)
    } else if let Some(rest) = suffix.strip_prefix('>') {
        (Flush::Left, rest)
    } else {
        return None;
    };
    let (at_column, after) = match after.strip_prefix('|') {
        Some(rest) => (true, rest),
        None => (false, after),
    };
    let body = after.strip_prefix('(')?;
    let close = body.find(')')?;
    let args = &body[..close];
    let consumed = (suffix.len() - body.len()) + close + 1;

    let (number, trunc) = match args.split_once(',') {
        Some((n, t)) => (n, Some(t)),
        None => (args, None),
    };
    let truncate = match trunc {
        None => Truncate::None,
        Some("trunc") => Truncate::Right,
        Some("ltrunc") => Truncate::Left,
        Some("mtrunc") => Truncate::Middle,
        Some(_) => return None,
    };
    let width = if at_column {
        let mut target = number.parse::<i64>().ok()?;
        if target < 0 {
            target += columns as i64;
        }
        if target < 0 {
            return None;
        }
        Width::AtColumn(target as usize)
    } else {
        Width::Chars(number.parse::<usize>().ok()?)
    };
    Some((
        AlignmentSpec {
            flush,
            truncate,
            width,
        },
        consumed,
    ))
}

/// Pad or truncate `out[start..]` to the spec. `start` is where the
/// aligned placeholder began writing.
pub(crate) fn apply(out: &mut String, start: usize, spec: &AlignmentSpec) {
    let width = match spec.width {
        Width::Chars(w) => w,
        Width::AtColumn(column) => {
            let line = out[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
            column.saturating_sub(out[line..start].width())
        }
    };
    let content = out[start..].width();
    if content > width {
        match spec.truncate {
            Truncate::None => {
                if spec.flush == Flush::LeftAndSteal {
                    steal(out, start, content - width);
                }
            }
            policy => {
                let truncated = truncated(&out[start..], width, policy);
                out.replace_range(start.., &truncated);
            }
        }
        return;
    }
    let pad = width - content;
    match spec.flush {
        Flush::Right => out.push_str(&" ".repeat(pad)),
        Flush::Left | Flush::LeftAndSteal => out.insert_str(start, &" ".repeat(pad)),
        Flush::Both => {
            let left = pad / 2;
            out.insert_str(start, &" ".repeat(left));
            out.push_str(&" ".repeat(pad - left));
        }
    }
}

fn steal(out: &mut String, start: usize, over: usize) {
    let spaces = out[..start]
        .chars()
        .rev()
        .take_while(|c| *c == ' ')
        .count()
        .min(over);
    out.replace_range(start - spaces..start, "");
}

fn truncated(text: &str, width: usize, policy: Truncate) -> String {
    if width <= DOTS.len() {
        return head(text, width).to_string();
    }
    let keep = width - DOTS.len();
    match policy {
        Truncate::Right => format!("{}{}", head(text, keep), DOTS),
        Truncate::Left => format!("{}{}", DOTS, tail(text, keep)),
        Truncate::Middle => {
            let front = keep / 2;
            format!(
                "{}{}{}",
                head(text, front),
                DOTS,
                tail(text, keep - front)
            )
        }
        Truncate::None => text.to_string(),
    }
}

/// The longest prefix of `text` no wider than `columns`.
fn head(text: &str, columns: usize) -> &str {
    let mut used = 0;
    for (i, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > columns {
            return &text[..i];
        }
        used += w;
    }
    text
}

/// The longest suffix of `text` no wider than `columns`.
fn tail(text: &str, columns: usize) -> &str {
    let mut used = 0;
    let mut index = text.len();
    for (i, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > columns {
            break;
        }
        used += w;
        index = i;
    }
    &text[index..]
}
