//! The subjects a format template is rendered against.
//!
//! A [`Record`] bundles everything one render pass may touch: the object
//! id, the raw commit object buffer (if there is one), and the reflog
//! entry (if the record came from a reflog walk). Reflog-only records
//! carry no commit buffer; the placeholders that need one degrade
//! gracefully instead of failing.

use git2::Oid;

/// One commit or reflog record to render. The raw buffers are owned by
/// the caller; a `Record` only borrows them for the duration of a render.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    /// The object id of the commit (or of the commit a reflog entry
    /// points at).
    pub id: Oid,
    /// The raw commit object, i.e. the output of `git cat-file commit`:
    /// a header block, a blank line, and the message.
    pub commit: Option<&'a str>,
    /// The reflog entry, when rendering `git log -g`-style output.
    pub reflog: Option<ReflogEntry<'a>>,
}

impl<'a> Record<'a> {
    /// A plain commit record with no reflog attached.
    pub fn commit(id: Oid, raw: &'a str) -> Self {
        Self {
            id,
            commit: Some(raw),
            reflog: None,
        }
    }
}

/// One entry of a reflog walk.
#[derive(Clone, Copy, Debug)]
pub struct ReflogEntry<'a> {
    /// The full refname the entry belongs to, e.g. `refs/heads/main`.
    pub refname: &'a str,
    /// The position of the entry in the reflog, `0` being the newest.
    pub index: usize,
    /// The reflog message, e.g. `commit: Fix loop`.
    pub message: &'a str,
    /// The raw `name <email> timestamp tz` identity line of whoever
    /// created the entry, when the reflog recorded one.
    pub identity: Option<&'a str>,
}
