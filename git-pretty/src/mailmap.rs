//! Canonicalizing author and committer identities.
//!
//! A [`Mailmap`] is built once by the caller (typically from the
//! repository's `.mailmap`) and shared read-only across renders. There
//! is no hidden global: whoever calls [`crate::render`] decides which
//! map, if any, applies.

/// A lookup table correcting name/email pairs.
#[derive(Debug, Default)]
pub struct Mailmap {
    entries: Vec<Entry>,
}

#[derive(Debug)]
struct Entry {
    new_name: Option<String>,
    new_email: Option<String>,
    old_name: Option<String>,
    old_email: String,
}

impl Mailmap {
    /// Parse the text of a `.mailmap` file. Unparsable lines are
    /// skipped, matching how git reads the file.
    ///
    /// Supported line shapes:
    ///
    /// ```text
    /// Proper Name <commit@email>
    /// <proper@email> <commit@email>
    /// Proper Name <proper@email> <commit@email>
    /// Proper Name <proper@email> Commit Name <commit@email>
    /// ```
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(parse_line)
            .collect();
        Self { entries }
    }

    /// Resolve `name`/`email` to their canonical pair. Unmapped
    /// identities come back unchanged.
    pub fn lookup<'a>(&'a self, name: &'a str, email: &'a str) -> (&'a str, &'a str) {
        // Entries matching on both name and email win over email-only ones.
        let entry = self
            .entries
            .iter()
            .filter(|e| e.old_email.eq_ignore_ascii_case(email))
            .max_by_key(|e| match &e.old_name {
                Some(old) if old.eq_ignore_ascii_case(name) => 2,
                Some(_) => 0,
                None => 1,
            })
            .filter(|e| match &e.old_name {
                Some(old) => old.eq_ignore_ascii_case(name),
                None => true,
            });
        match entry {
            Some(e) => (
                e.new_name.as_deref().unwrap_or(name),
                e.new_email.as_deref().unwrap_or(email),
            ),
            None => (name, email),
        }
    }

    /// The number of entries in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_line(line: &str) -> Option<Entry> {
    let mut parts = Vec::new();
    let mut rest = line;
    while let Some(open) = rest.find('<') {
        let close = rest[open..].find('>')? + open;
        let name = rest[..open].trim();
        let email = rest[open + 1..close].trim();
        parts.push((
            (!name.is_empty()).then(|| name.to_string()),
            email.to_string(),
        ));
        rest = &rest[close + 1..];
    }
    match parts.len() {
        1 => {
            let (name, email) = parts.pop()?;
            // A single bracket with no replacement name maps nothing.
            name.as_ref()?;
            Some(Entry {
                new_name: name,
                new_email: None,
                old_name: None,
                old_email: email,
            })
        }
        2 => {
            let (old_name, old_email) = parts.pop()?;
            let (new_name, new_email) = parts.pop()?;
            Some(Entry {
                new_name,
                new_email: Some(new_email),
                old_name,
                old_email,
            })
        }
        _ => None,
    }
}
