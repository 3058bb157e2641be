//! Wiki-style attachment references
//!
//! An attachment reference is a `[[name.ext]]` token inside a document.
//! The name may contain spaces and relative path separators
//! (`[[sub/dir/pic.png]]`), and must end in a dot-plus-extension segment.
//! Bracketed wikilinks without an extension (`[[Some Note]]`) are ordinary
//! note links, not attachments, and are left untouched.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// First non-overlapping match, left to right. The capture is bounded by the
/// literal brackets and requires at least one dot followed by a non-whitespace
/// extension token; newlines and `]` never occur inside the bracket span.
static ATTACHMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]\n]+\.[^\s\]]+)\]\]").unwrap());

/// A single attachment reference extracted from a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentReference {
    raw: String,
}

impl AttachmentReference {
    /// Wraps a raw reference name (the text between the brackets)
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Extracts every attachment reference from a document, in order of
    /// appearance. Duplicates are preserved: the same name appearing twice
    /// yields two entries.
    pub fn extract_all(content: &str) -> Vec<Self> {
        ATTACHMENT
            .captures_iter(content)
            .map(|c| Self::new(&c[1]))
            .collect()
    }

    /// Returns the raw reference name, e.g. `diagram 1.png`
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the reference as a relative path for joining against the
    /// vault and static directories
    pub fn relative_path(&self) -> &Path {
        Path::new(&self.raw)
    }

    /// Returns the exact bracketed form as it appears in the document.
    ///
    /// Substitution always goes through this delimiter-bounded text, so a
    /// reference that happens to be a substring of another can never be
    /// double-substituted.
    pub fn bracketed(&self) -> String {
        format!("[[{}]]", self.raw)
    }

    /// Returns the rewritten markdown link for this reference.
    ///
    /// Only the literal space character is percent-encoded; everything else
    /// passes through unchanged.
    pub fn rewritten_link(&self) -> String {
        format!("[Image Description](/images/{})", self.raw.replace(' ', "%20"))
    }
}

impl fmt::Display for AttachmentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
