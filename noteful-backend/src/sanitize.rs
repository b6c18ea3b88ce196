//! Markup neutralization for user-supplied text.
//!
//! Every free-text field (folder and note `name`, note `content`) passes
//! through [`sanitize`] before it is written and again before it is served.
//! `<` and `>` are always escaped, so no tag (and therefore no attribute or
//! inline event handler) can survive. A bare `&` is escaped too, but one that
//! already starts a character reference is left alone, which is what keeps
//! the function idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Folder, Note};

/// Matches a well-formed character reference at the start of the input:
/// `&lt;`, `&#39;`, `&#x3C;`.
static CHAR_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]{1,31}|#[0-9]{1,7}|#[xX][0-9A-Fa-f]{1,6});")
        .expect("character reference pattern is valid")
});

/// Escape markup delimiters in `input`.
///
/// `sanitize(&sanitize(x)) == sanitize(x)` for every `x`.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for (idx, ch) in input.char_indices() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' if !CHAR_REF.is_match(&input[idx..]) => out.push_str("&amp;"),
            _ => out.push(ch),
        }
    }

    out
}

/// [`sanitize`] for nullable columns.
pub fn sanitize_opt(input: Option<&str>) -> Option<String> {
    input.map(sanitize)
}

/// Rows whose text fields can be re-sanitized before they are served.
pub trait Sanitize {
    fn sanitized(self) -> Self;
}

impl Sanitize for Folder {
    fn sanitized(self) -> Self {
        Folder {
            id: self.id,
            name: sanitize(&self.name),
        }
    }
}

impl Sanitize for Note {
    fn sanitized(self) -> Self {
        Note {
            id: self.id,
            name: sanitize(&self.name),
            content: sanitize_opt(self.content.as_deref()),
            folder_id: self.folder_id,
        }
    }
}

impl<T: Sanitize> Sanitize for Vec<T> {
    fn sanitized(self) -> Self {
        self.into_iter().map(Sanitize::sanitized).collect()
    }
}
