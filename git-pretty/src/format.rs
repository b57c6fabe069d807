//! The placeholder dispatcher and the per-record render context.
//!
//! [`RenderContext`] is the single entry point the template scanner
//! calls back into. It owns the state that has to survive across
//! placeholders on the same output buffer: lazily parsed message
//! offsets, the sticky auto-color flag, the pending alignment
//! directive, the un-wrapped output region, and the cached signature
//! verification.

use log::{debug, trace};

use crate::{
    align::{self, AlignmentSpec},
    color::{self, ColorState},
    error::Render,
    identity,
    record::Record,
    reflog,
    signature::SignatureStatus,
    trailers,
    wrap::{self, WrapSpec},
    ColorPolicy, Options,
};

/// What a sub-parser made of its input.
///
/// `Literal` is the soft rejection: the scanner re-emits the `%`
/// verbatim. `Unrecognized` is escalated by the dispatcher to a fatal
/// [`Render::InvalidFormatDirective`]. Both collapse to a consumed
/// count of 0 only at the outermost scanner contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Consumed(usize),
    Literal,
    Unrecognized,
}

/// A byte range into the raw commit buffer. Distinct from offsets into
/// the output buffer, which are plain `usize`s local to [`WrapState`] —
/// the two address spaces must never mix.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SourceSpan {
    start: usize,
    end: usize,
}

impl SourceSpan {
    fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    fn slice<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }
}

/// Byte ranges into the commit buffer, populated once on first use and
/// read-only thereafter.
#[derive(Debug, Default)]
struct MessageOffsets {
    parsed: bool,
    tree: Option<SourceSpan>,
    parents: Vec<SourceSpan>,
    author: Option<SourceSpan>,
    committer: Option<SourceSpan>,
    subject: Option<SourceSpan>,
    body: Option<SourceSpan>,
    message: Option<SourceSpan>,
}

/// The output-buffer region not yet wrapped under the current settings.
#[derive(Debug, Default)]
struct WrapState {
    spec: WrapSpec,
    region_start: usize,
}

/// Mutable state for rendering one record. Never reuse a context across
/// records: the lazy parses and the signature cache are record-specific.
pub(crate) struct RenderContext<'a> {
    record: &'a Record<'a>,
    options: &'a Options<'a>,
    offsets: MessageOffsets,
    color: ColorState,
    alignment: Option<AlignmentSpec>,
    wrap: WrapState,
    signature: Option<SignatureStatus>,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(record: &'a Record<'a>, options: &'a Options<'a>) -> Self {
        debug!("rendering {}", record.id);
        Self {
            record,
            options,
            offsets: MessageOffsets::default(),
            color: ColorState::default(),
            alignment: None,
            wrap: WrapState::default(),
            signature: None,
        }
    }

    /// The scanner callback: handle the placeholder starting at
    /// `suffix` (the `%` is already stripped) and report the consumed
    /// byte count. 0 means "emit the `%` literally".
    pub(crate) fn placeholder(&mut self, out: &mut String, suffix: &str) -> Result<usize, Render> {
        let Some(first) = suffix.chars().next() else {
            return Ok(0);
        };
        // Directives that only mutate state leave a pending alignment
        // for the next content placeholder.
        match first {
            'C' => {
                let want = self.want_color();
                return collapse(color::directive(out, suffix, &mut self.color, want));
            }
            'w' => return self.wrap_directive(out, suffix),
            '<' | '>' => return self.align_directive(suffix),
            _ => {}
        }
        let start = out.len();
        let outcome = self.content(out, suffix, first)?;
        let consumed = match outcome {
            Outcome::Consumed(n) => n,
            Outcome::Literal => return Ok(0),
            Outcome::Unrecognized => {
                return Err(Render::InvalidFormatDirective(first.to_string()))
            }
        };
        if let Some(spec) = self.alignment.take() {
            align::apply(out, start, &spec);
        }
        Ok(consumed)
    }

    /// Flush deferred work once the scanner is done with the template.
    pub(crate) fn finish(&mut self, out: &mut String) {
        self.rewrap_tail(out);
        // Auto-color ends with the message.
        self.color.auto = false;
    }

    fn want_color(&self) -> bool {
        match self.options.color {
            ColorPolicy::Always => true,
            ColorPolicy::Never => false,
            ColorPolicy::Auto => self.options.tty,
        }
    }

    fn content(&mut self, out: &mut String, suffix: &str, first: char) -> Result<Outcome, Render> {
        match first {
            '%' => {
                out.push('%');
                Ok(Outcome::Consumed(1))
            }
            'n' => {
                out.push('\n');
                Ok(Outcome::Consumed(1))
            }
            'x' => self.hex_byte(out, suffix),
            'H' => {
                out.push_str(&self.record.id.to_string());
                Ok(Outcome::Consumed(1))
            }
            'h' => {
                let hex = self.record.id.to_string();
                out.push_str(abbreviate(&hex, self.options.abbrev));
                Ok(Outcome::Consumed(1))
            }
            'T' => {
                if let Some(tree) = self.span_text(|o| o.tree) {
                    out.push_str(tree);
                }
                Ok(Outcome::Consumed(1))
            }
            't' => {
                if let Some(tree) = self.span_text(|o| o.tree) {
                    out.push_str(abbreviate(tree, self.options.abbrev));
                }
                Ok(Outcome::Consumed(1))
            }
            'P' | 'p' => {
                self.parents(out, first == 'p');
                Ok(Outcome::Consumed(1))
            }
            's' => {
                if let Some(subject) = self.span_text(|o| o.subject) {
                    push_subject(out, subject);
                }
                Ok(Outcome::Consumed(1))
            }
            'f' => {
                if let Some(subject) = self.span_text(|o| o.subject) {
                    push_sanitized_subject(out, subject);
                }
                Ok(Outcome::Consumed(1))
            }
            'b' => {
                if let Some(body) = self.span_text(|o| o.body) {
                    out.push_str(body);
                }
                Ok(Outcome::Consumed(1))
            }
            'B' => {
                if let Some(message) = self.span_text(|o| o.message) {
                    out.push_str(message);
                }
                Ok(Outcome::Consumed(1))
            }
            'a' | 'c' => self.person(out, suffix, first),
            'g' => self.reflog(out, suffix),
            'G' => self.signature(out, suffix),
            '(' => self.trailers(out, suffix),
            other => Err(Render::InvalidFormatDirective(other.to_string())),
        }
    }

    fn hex_byte(&self, out: &mut String, suffix: &str) -> Result<Outcome, Render> {
        let digits = suffix.as_bytes();
        if digits.len() < 3 || !digits[1].is_ascii_hexdigit() || !digits[2].is_ascii_hexdigit() {
            return Err(Render::InvalidFormatDirective(
                suffix.chars().take(3).collect(),
            ));
        }
        let byte = u8::from_str_radix(&suffix[1..3], 16)
            .map_err(|_| Render::InvalidFormatDirective(suffix.chars().take(3).collect()))?;
        out.push(byte as char);
        Ok(Outcome::Consumed(3))
    }

    fn parents(&mut self, out: &mut String, short: bool) {
        let Some(raw) = self.record.commit else {
            return;
        };
        let abbrev = self.options.abbrev;
        let parents = &self.offsets().parents;
        let mut first = true;
        let mut text = String::new();
        for span in parents {
            if !first {
                text.push(' ');
            }
            let hex = span.slice(raw);
            text.push_str(if short { abbreviate(hex, abbrev) } else { hex });
            first = false;
        }
        out.push_str(&text);
    }

    fn person(&mut self, out: &mut String, suffix: &str, who: char) -> Result<Outcome, Render> {
        let Some(part) = suffix.chars().nth(1) else {
            return Err(Render::InvalidFormatDirective(who.to_string()));
        };
        let line = if who == 'a' {
            self.span_text(|o| o.author)
        } else {
            self.span_text(|o| o.committer)
        };
        match identity::person(out, line, part, self.options.date, self.options.mailmap) {
            Outcome::Unrecognized => Err(Render::InvalidFormatDirective(format!("{who}{part}"))),
            outcome => Ok(outcome),
        }
    }

    fn reflog(&mut self, out: &mut String, suffix: &str) -> Result<Outcome, Render> {
        let Some(sub) = suffix.chars().nth(1) else {
            return Err(Render::InvalidFormatDirective("g".to_string()));
        };
        let entry = self.record.reflog.as_ref();
        match sub {
            'D' => Ok(reflog::selector(out, entry, false)),
            'd' => Ok(reflog::selector(out, entry, true)),
            's' => Ok(reflog::message(out, entry)),
            'n' | 'N' | 'e' | 'E' => {
                let line = entry.and_then(|e| e.identity);
                match identity::person(out, line, sub, self.options.date, self.options.mailmap) {
                    Outcome::Unrecognized => {
                        Err(Render::InvalidFormatDirective(format!("g{sub}")))
                    }
                    outcome => Ok(outcome),
                }
            }
            _ => Err(Render::InvalidFormatDirective(format!("g{sub}"))),
        }
    }

    fn signature(&mut self, out: &mut String, suffix: &str) -> Result<Outcome, Render> {
        let Some(sub) = suffix.chars().nth(1) else {
            return Err(Render::InvalidFormatDirective("G".to_string()));
        };
        let status = self.signature_status();
        match sub {
            'G' => out.push_str(&status.raw),
            '?' => out.push(status.letter()),
            'S' => out.push_str(&status.signer),
            'K' => out.push_str(&status.key),
            'F' => out.push_str(&status.fingerprint),
            'P' => out.push_str(&status.primary_fingerprint),
            'T' => out.push_str(status.trust.as_str()),
            _ => return Err(Render::InvalidFormatDirective(format!("G{sub}"))),
        }
        Ok(Outcome::Consumed(2))
    }

    fn signature_status(&mut self) -> &SignatureStatus {
        let record = self.record;
        let verify = self.options.verify;
        self.signature.get_or_insert_with(|| {
            trace!("verifying signature of {}", record.id);
            verify
                .and_then(|v| record.commit.and_then(|raw| v.verify(record.id, raw)))
                .unwrap_or_default()
        })
    }

    fn trailers(&mut self, out: &mut String, suffix: &str) -> Result<Outcome, Render> {
        let Some(close) = suffix.find(')') else {
            return Ok(Outcome::Literal);
        };
        let body = &suffix[1..close];
        let Some(args) = body.strip_prefix("trailers") else {
            return Err(Render::InvalidFormatDirective(format!("({body})")));
        };
        let options = trailers::parse_options(args)?;
        if let Some(message) = self.span_text(|o| o.message) {
            trailers::render(out, message, &options);
        }
        Ok(Outcome::Consumed(close + 1))
    }

    fn wrap_directive(&mut self, out: &mut String, suffix: &str) -> Result<usize, Render> {
        let Some((spec, consumed)) = wrap::parse(suffix) else {
            return Ok(0);
        };
        if spec != self.wrap.spec {
            // Flush the pending region under the old settings before
            // adopting the new ones.
            self.rewrap_tail(out);
            self.wrap.spec = spec;
        }
        Ok(consumed)
    }

    fn rewrap_tail(&mut self, out: &mut String) {
        let start = self.wrap.region_start;
        debug_assert!(start <= out.len());
        if self.wrap.spec != WrapSpec::default() {
            trace!("re-flowing output region from {start}");
            let filled = wrap::fill(&out[start..], &self.wrap.spec);
            out.truncate(start);
            out.push_str(&filled);
        }
        self.wrap.region_start = out.len();
    }

    fn align_directive(&mut self, suffix: &str) -> Result<usize, Render> {
        match align::parse(suffix, self.options.columns) {
            Some((spec, consumed)) => {
                self.alignment = Some(spec);
                Ok(consumed)
            }
            None => Ok(0),
        }
    }

    fn offsets(&mut self) -> &MessageOffsets {
        if !self.offsets.parsed {
            self.offsets.parsed = true;
            if let Some(raw) = self.record.commit {
                parse_offsets(raw, &mut self.offsets);
            }
        }
        &self.offsets
    }

    fn span_text(&mut self, pick: fn(&MessageOffsets) -> Option<SourceSpan>) -> Option<&'a str> {
        let raw = self.record.commit?;
        let span = pick(self.offsets())?;
        Some(span.slice(raw))
    }
}

fn collapse(outcome: Result<Outcome, Render>) -> Result<usize, Render> {
    match outcome? {
        Outcome::Consumed(n) => Ok(n),
        Outcome::Literal | Outcome::Unrecognized => Ok(0),
    }
}

fn abbreviate(hex: &str, abbrev: usize) -> &str {
    &hex[..abbrev.min(hex.len())]
}

fn parse_offsets(raw: &str, offsets: &mut MessageOffsets) {
    let (header, message_start) = match raw.split_once("\n\n") {
        Some((header, _)) => (header, header.len() + 2),
        None => (raw, raw.len()),
    };
    offsets.message = Some(SourceSpan::new(message_start, raw.len()));

    let mut pos = 0;
    for line in header.split('\n') {
        if let Some(value) = line.strip_prefix("tree ") {
            let start = pos + line.len() - value.len();
            offsets.tree = Some(SourceSpan::new(start, pos + line.len()));
        } else if let Some(value) = line.strip_prefix("parent ") {
            let start = pos + line.len() - value.len();
            offsets.parents.push(SourceSpan::new(start, pos + line.len()));
        } else if let Some(value) = line.strip_prefix("author ") {
            let start = pos + line.len() - value.len();
            offsets.author = Some(SourceSpan::new(start, pos + line.len()));
        } else if let Some(value) = line.strip_prefix("committer ") {
            let start = pos + line.len() - value.len();
            offsets.committer = Some(SourceSpan::new(start, pos + line.len()));
        }
        pos += line.len() + 1;
    }

    let message = &raw[message_start..];
    match message.find("\n\n") {
        Some(blank) => {
            offsets.subject = Some(SourceSpan::new(message_start, message_start + blank));
            offsets.body = Some(SourceSpan::new(message_start + blank + 2, raw.len()));
        }
        None => {
            let end = message_start + message.trim_end_matches('\n').len();
            offsets.subject = Some(SourceSpan::new(message_start, end));
            offsets.body = Some(SourceSpan::new(raw.len(), raw.len()));
        }
    }
}

/// `%s`: the first message paragraph with newlines folded to spaces.
fn push_subject(out: &mut String, subject: &str) {
    let subject = subject.trim_end_matches('\n');
    let mut first = true;
    for line in subject.split('\n') {
        if !first {
            out.push(' ');
        }
        out.push_str(line);
        first = false;
    }
}

/// `%f`: the subject reduced to a filename-friendly slug. Title
/// characters are kept, runs of anything else collapse to one `-`, dot
/// runs collapse to one dot, and trailing `.`/`-` are trimmed.
fn push_sanitized_subject(out: &mut String, subject: &str) {
    let start = out.len();
    let mut space = 2;
    let mut last = '\0';
    for ch in subject.chars() {
        if ch == '\n' {
            break;
        }
        if ch.is_ascii_alphanumeric() || ch == '.' || ch == '_' {
            if ch == '.' && last == '.' {
                continue;
            }
            if space == 1 {
                out.push('-');
            }
            space = 0;
            out.push(ch);
            last = ch;
        } else {
            space |= 1;
        }
    }
    while out.len() > start && matches!(out.as_bytes()[out.len() - 1], b'.' | b'-') {
        out.pop();
    }
}
