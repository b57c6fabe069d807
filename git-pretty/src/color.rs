//! The `%C` directive family and color-spec parsing.
//!
//! `%C(auto)` flips the sticky auto-color mode; any other parenthesized
//! form emits an escape sequence, optionally gated on the want-color
//! policy by a leading `auto,` or `always,` modifier. A handful of bare
//! legacy tokens (`%Cred` etc.) survive for backward compatibility. An
//! unterminated `(` is not an error: the directive falls back to a
//! literal `%`, which callers rely on.

use crate::{error::Render, format::Outcome};

/// Resets all attributes and colors.
pub const RESET: &str = "\x1b[m";

const LEGACY: [&str; 4] = ["red", "green", "blue", "reset"];

/// Per-render color state. `auto` is a plain boolean, not a stack:
/// directives replace it, they do not compose.
#[derive(Debug, Default)]
pub(crate) struct ColorState {
    pub auto: bool,
}

/// Handle a `%C` directive. `suffix` starts at the `C`.
pub(crate) fn directive(
    out: &mut String,
    suffix: &str,
    state: &mut ColorState,
    want: bool,
) -> Result<Outcome, Render> {
    let rest = &suffix[1..];
    if rest.starts_with("(auto)") {
        state.auto = want;
        if state.auto && !out.is_empty() {
            // Close whatever color the previous placeholder left open
            // before the new auto-tracked region begins.
            out.push_str(RESET);
        }
        return Ok(Outcome::Consumed("C(auto)".len()));
    }
    if let Some(body) = rest.strip_prefix('(') {
        let Some(close) = body.find(')') else {
            return Ok(Outcome::Literal);
        };
        let body = &body[..close];
        let (emit, spec) = match body.split_once(',') {
            Some(("auto", spec)) => (want, spec),
            Some(("always", spec)) => (true, spec),
            _ => (true, body),
        };
        let sequence =
            parse(spec).ok_or_else(|| Render::InvalidFormatDirective(format!("C({body})")))?;
        if emit {
            out.push_str(&sequence);
        }
        if !body.starts_with("auto,") {
            state.auto = false;
        }
        // 'C' + '(' + body + ')'
        return Ok(Outcome::Consumed(close + 3));
    }
    for token in LEGACY {
        if rest.starts_with(token) {
            if want {
                match parse(token) {
                    Some(sequence) => out.push_str(&sequence),
                    None => return Err(Render::InvalidFormatDirective(format!("C{token}"))),
                }
            }
            state.auto = false;
            return Ok(Outcome::Consumed(1 + token.len()));
        }
    }
    Err(Render::InvalidFormatDirective("C".to_string()))
}

/// Parse a color specification into an ANSI escape sequence.
///
/// A spec is whitespace-separated words: at most two colors (foreground
/// then background) and any number of attributes. Colors are names
/// (`red`, `brightcyan`, `default`, `normal`), 0-255 palette indices, or
/// `#rrggbb`. Attributes are `bold`, `dim`, `italic`, `ul`, `blink`,
/// `reverse`, `strike` and their `no-` complements.
pub fn parse(spec: &str) -> Option<String> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }
    if spec == "reset" {
        return Some(RESET.to_string());
    }
    let mut codes: Vec<String> = Vec::new();
    let mut fg = None;
    let mut bg = None;
    for word in spec.split_whitespace() {
        if let Some(code) = attribute(word) {
            codes.push(code.to_string());
        } else if fg.is_none() {
            fg = Some(Colour::parse(word)?);
        } else if bg.is_none() {
            bg = Some(Colour::parse(word)?);
        } else {
            return None;
        }
    }
    if let Some(colour) = fg {
        codes.extend(colour.codes(false));
    }
    if let Some(colour) = bg {
        codes.extend(colour.codes(true));
    }
    if codes.is_empty() {
        // "normal" alone selects no color and no attribute.
        return Some(String::new());
    }
    Some(format!("\x1b[{}m", codes.join(";")))
}

#[derive(Clone, Copy, Debug)]
enum Colour {
    Normal,
    Default,
    Basic(u8),
    Bright(u8),
    Palette(u8),
    Rgb(u8, u8, u8),
}

const NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

impl Colour {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "normal" => return Some(Self::Normal),
            "default" => return Some(Self::Default),
            _ => {}
        }
        let (bright, name) = match word.strip_prefix("bright") {
            Some(rest) => (true, rest),
            None => (false, word),
        };
        if let Some(index) = NAMES.iter().position(|n| *n == name) {
            let index = index as u8;
            return Some(if bright {
                Self::Bright(index)
            } else {
                Self::Basic(index)
            });
        }
        if let Some(hex) = word.strip_prefix('#') {
            if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            let r = u8::from_str_radix(&hex[..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..], 16).ok()?;
            return Some(Self::Rgb(r, g, b));
        }
        word.parse::<u8>().ok().map(Self::Palette)
    }

    fn codes(self, background: bool) -> Vec<String> {
        let base: u16 = if background { 10 } else { 0 };
        match self {
            Self::Normal => vec![],
            Self::Default => vec![(39 + base).to_string()],
            Self::Basic(i) => vec![(30 + base + u16::from(i)).to_string()],
            Self::Bright(i) => vec![(90 + base + u16::from(i)).to_string()],
            Self::Palette(n) => vec![(38 + base).to_string(), "5".to_string(), n.to_string()],
            Self::Rgb(r, g, b) => vec![
                (38 + base).to_string(),
                "2".to_string(),
                r.to_string(),
                g.to_string(),
                b.to_string(),
            ],
        }
    }
}

fn attribute(word: &str) -> Option<&'static str> {
    Some(match word {
        "bold" => "1",
        "dim" => "2",
        "italic" => "3",
        "ul" | "underline" => "4",
        "blink" => "5",
        "reverse" => "7",
        "strike" => "9",
        "no-bold" | "no-dim" => "22",
        "no-italic" => "23",
        "no-ul" | "no-underline" => "24",
        "no-blink" => "25",
        "no-reverse" => "27",
        "no-strike" => "29",
        _ => return None,
    })
}
