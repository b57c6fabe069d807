//! The generic `%`-escape template scanner.
//!
//! The scanner knows nothing about individual placeholders. It copies
//! literal bytes verbatim and, at every `%`, hands the remaining suffix
//! to a callback which reports how many bytes of the suffix it consumed.
//! A consumed count of `0` means "not mine": the `%` is emitted as a
//! literal character and scanning resumes one byte later.

use crate::error::Render;

/// Expand `template` into a fresh buffer, resolving every `%`-escape
/// through `placeholder`.
///
/// The callback receives the output buffer and the suffix following the
/// `%` (the `%` itself is already stripped). The count it returns must
/// be exact: overcounting skips valid template bytes and corrupts the
/// output.
pub fn expand<F>(template: &str, mut placeholder: F) -> Result<String, Render>
where
    F: FnMut(&mut String, &str) -> Result<usize, Render>,
{
    let mut out = String::new();
    let mut rest = template;
    while let Some(at) = rest.find('%') {
        out.push_str(&rest[..at]);
        let suffix = &rest[at + 1..];
        let consumed = placeholder(&mut out, suffix)?;
        if consumed == 0 {
            out.push('%');
            rest = suffix;
        } else {
            rest = &suffix[consumed..];
        }
    }
    out.push_str(rest);
    Ok(out)
}
