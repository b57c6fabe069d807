//! Splitting `name <email> timestamp tz` identity lines and rendering
//! the person placeholder family (`%an`, `%ae`, `%ad`, ...).

use crate::{
    date::{self, DateMode},
    format::Outcome,
    mailmap::Mailmap,
};

/// The three fields carved out of one raw identity line. The fields are
/// views into the caller's line; nothing is copied unless a mailmap
/// remap kicks in later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Identity<'a> {
    /// Everything before the last `<`, trimmed.
    pub name: &'a str,
    /// The bracketed address.
    pub email: &'a str,
    /// The remainder after the closing `>`, trimmed: `timestamp tz`.
    pub date: &'a str,
}

impl<'a> Identity<'a> {
    /// Split a raw identity line. Returns `None` when the angle-bracket
    /// delimiters are missing, which is how reflog-only records and
    /// bogus commits end up in the degraded rendering path.
    pub fn split(line: &'a str) -> Option<Self> {
        let open = line.rfind('<')?;
        let close = line[open..].find('>')? + open;
        Some(Identity {
            name: line[..open].trim(),
            email: &line[open + 1..close],
            date: line[close + 1..].trim(),
        })
    }

    /// Parse the `timestamp tz` tail into a [`git2::Time`].
    pub fn time(&self) -> Option<git2::Time> {
        let (seconds, tz) = match self.date.split_once(' ') {
            Some((s, t)) => (s, Some(t)),
            None => (self.date, None),
        };
        let seconds = seconds.parse::<i64>().ok()?;
        let offset = tz.and_then(parse_tz).unwrap_or(0);
        Some(git2::Time::new(seconds, offset))
    }
}

fn parse_tz(tz: &str) -> Option<i32> {
    let (sign, digits) = match tz.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, tz.strip_prefix('+').unwrap_or(tz)),
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    Some(sign * (hours * 60 + minutes))
}

/// Render one person field out of `line` into `out`.
///
/// Every placeholder of this family is exactly two characters wide, so
/// success always consumes 2. When the identity line is missing or will
/// not split, the fields git defines to degrade gracefully (name, email,
/// timestamp and the iso/relative/rfc date codes) still consume their
/// fixed width while writing nothing; the rest fall back to a literal
/// `%`. An unknown field code is reported as `Unrecognized` and the
/// dispatcher escalates it to a fatal error.
pub(crate) fn person(
    out: &mut String,
    line: Option<&str>,
    part: char,
    mode: DateMode,
    mailmap: Option<&Mailmap>,
) -> Outcome {
    const WIDTH: usize = 2;
    if !matches!(
        part,
        'n' | 'N' | 'e' | 'E' | 'l' | 'L' | 'd' | 'D' | 'r' | 't' | 'i' | 'I' | 's' | 'h'
    ) {
        return Outcome::Unrecognized;
    }
    let Some(identity) = line.and_then(Identity::split) else {
        return match part {
            'n' | 'e' | 't' | 'r' | 'i' | 'I' | 'D' => Outcome::Consumed(WIDTH),
            _ => Outcome::Literal,
        };
    };

    let (mut name, mut email) = (identity.name, identity.email);
    if matches!(part, 'N' | 'E' | 'L') {
        if let Some(map) = mailmap {
            (name, email) = map.lookup(name, email);
        }
    }

    match part {
        'n' | 'N' => out.push_str(name),
        'e' | 'E' => out.push_str(email),
        'l' | 'L' => out.push_str(local_part(email)),
        _ => {
            let Some(time) = identity.time() else {
                return Outcome::Consumed(WIDTH);
            };
            let mode = match part {
                'D' => DateMode::Rfc2822,
                'r' => DateMode::Relative,
                't' => DateMode::Unix,
                'i' => DateMode::Iso,
                'I' => DateMode::IsoStrict,
                's' => DateMode::Short,
                'h' => DateMode::Human,
                _ => mode,
            };
            out.push_str(&date::format(time, mode));
        }
    }
    Outcome::Consumed(WIDTH)
}

fn local_part(email: &str) -> &str {
    match email.find('@') {
        Some(at) => &email[..at],
        None => email,
    }
}
