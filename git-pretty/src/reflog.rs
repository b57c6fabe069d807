//! The `%g` reflog placeholder family.
//!
//! Every placeholder here is exactly two characters. A record without
//! reflog data writes nothing but still consumes its fixed width, so
//! one format string can serve both `log` and `log -g` output.

use crate::{format::Outcome, record::ReflogEntry};

const WIDTH: usize = 2;

pub(crate) fn selector(out: &mut String, entry: Option<&ReflogEntry>, short: bool) -> Outcome {
    if let Some(entry) = entry {
        let name = if short {
            shorten(entry.refname)
        } else {
            entry.refname
        };
        out.push_str(name);
        out.push_str("@{");
        out.push_str(&entry.index.to_string());
        out.push('}');
    }
    Outcome::Consumed(WIDTH)
}

pub(crate) fn message(out: &mut String, entry: Option<&ReflogEntry>) -> Outcome {
    if let Some(entry) = entry {
        out.push_str(entry.message);
    }
    Outcome::Consumed(WIDTH)
}

fn shorten(refname: &str) -> &str {
    for prefix in ["refs/heads/", "refs/tags/", "refs/remotes/"] {
        if let Some(short) = refname.strip_prefix(prefix) {
            return short;
        }
    }
    refname
}
