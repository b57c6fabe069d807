//! The `git-pretty` crate renders commit and reflog metadata through
//! `--pretty`-style format templates.
//!
//! A [`Record`] borrows the raw commit object (and, optionally, a
//! reflog entry); [`render`] expands a [`Format`] against it. The
//! template language is the `%`-placeholder micro-grammar of
//! `git log --format`: commit fields, multi-field person rendering,
//! colorization with sticky auto-detection, column padding, deferred
//! line-wrapping, trailer filtering, reflog fields and GPG signature
//! status.
//!
//! Malformed directives are operator errors and abort the render with
//! [`error::Render::InvalidFormatDirective`]; unterminated parenthesized
//! directives and fields with no backing data degrade silently instead.
//!
//! ```
//! use git_pretty::{render, Format, Options, Record};
//!
//! let raw = "tree 50d6ef440728217febf9e35716d8b0296608d7f8\n\
//!            author Ada Lovelace <ada@example.com> 946684800 +0000\n\
//!            committer Ada Lovelace <ada@example.com> 946684800 +0000\n\
//!            \n\
//!            Fix loop\n";
//! let id = git2::Oid::from_str("0ad95dbdfe9fdf81938ca419cf740469173e2022").unwrap();
//! let record = Record::commit(id, raw);
//!
//! let out = render(
//!     &Format::Custom("%an: %s".to_string()),
//!     &record,
//!     &Options::default(),
//! )
//! .unwrap();
//! assert_eq!(out, "Ada Lovelace: Fix loop");
//! ```

pub mod align;
pub mod color;
pub mod date;
mod format;
pub mod identity;
pub mod mailmap;
pub mod record;
mod reflog;
pub mod scan;
pub mod signature;
pub mod trailers;
pub mod wrap;

pub use date::DateMode;
pub use mailmap::Mailmap;
pub use record::{Record, ReflogEntry};
pub use signature::{SignatureResult, SignatureStatus, TrustLevel, Verify};
pub use trailers::TrailerFilterOptions;

/// When color escapes should actually be emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorPolicy {
    /// Color iff the output medium wants it (see [`Options::tty`]).
    #[default]
    Auto,
    /// Always emit color escapes.
    Always,
    /// Never emit color escapes.
    Never,
}

/// Everything a render pass needs besides the record itself. Discovery
/// of the environment (terminal width, tty-ness, the mailmap file, the
/// signature verifier) is the caller's business.
pub struct Options<'a> {
    /// Color policy.
    pub color: ColorPolicy,
    /// Whether the output medium is a terminal; resolves
    /// [`ColorPolicy::Auto`].
    pub tty: bool,
    /// The date mode `%ad`/`%cd` render in.
    pub date: DateMode,
    /// Abbreviated-hash length for `%h`, `%t`, `%p`.
    pub abbrev: usize,
    /// Terminal column count, used by the `%>|(...)` alignment forms.
    pub columns: usize,
    /// Identity remapping for the `%aN`-family placeholders.
    pub mailmap: Option<&'a Mailmap>,
    /// Signature verifier for the `%G` placeholders; `None` renders
    /// them as "no signature".
    pub verify: Option<&'a dyn Verify>,
}

impl Default for Options<'_> {
    fn default() -> Self {
        Self {
            color: ColorPolicy::Auto,
            tty: false,
            date: DateMode::Default,
            abbrev: 7,
            columns: 80,
            mailmap: None,
            verify: None,
        }
    }
}

/// A format selection: one of the built-in presets or a custom
/// template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Format {
    /// The subject on a single line.
    Oneline,
    /// Author and subject.
    Short,
    /// Author, date, subject and body (the default of `git log`).
    Medium,
    /// Author, committer, subject and body.
    Full,
    /// Both identities with both dates, subject and body.
    Fuller,
    /// A user-supplied template.
    Custom(String),
}

impl Format {
    /// The template this format expands.
    pub fn template(&self) -> &str {
        match self {
            Self::Oneline => "%s",
            Self::Short => "Author: %an <%ae>\n\n%s",
            Self::Medium => "Author: %an <%ae>\nDate:   %ad\n\n%s\n%b",
            Self::Full => "Author: %an <%ae>\nCommit: %cn <%ce>\n\n%s\n%b",
            Self::Fuller => {
                "Author:     %an <%ae>\nAuthorDate: %ad\nCommit:     %cn <%ce>\nCommitDate: %cd\n\n%s\n%b"
            }
            Self::Custom(template) => template,
        }
    }
}

pub mod error {
    //! Rendering failures.

    use thiserror::Error;

    /// The fatal failure mode: the format string itself is broken.
    /// Rendering aborts immediately; nothing is partially emitted.
    #[derive(Debug, Error, PartialEq, Eq)]
    pub enum Render {
        /// An unknown or malformed placeholder. Carries the offending
        /// directive text for diagnostics.
        #[error("invalid formatting option '%{0}'")]
        InvalidFormatDirective(String),
    }
}

/// Render `record` through `format`. The single entry point: expands
/// the template, then flushes any deferred line-wrapping.
pub fn render(
    format: &Format,
    record: &Record,
    options: &Options,
) -> Result<String, error::Render> {
    let mut context = format::RenderContext::new(record, options);
    let mut out = scan::expand(format.template(), |out, suffix| {
        context.placeholder(out, suffix)
    })?;
    context.finish(&mut out);
    Ok(out)
}
