//! Run summary counters
//!
//! Plain counters accumulated across the run, rendered as a human-readable
//! line in the final completion message.

/// Outcome counters for a single document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentReport {
    /// References matched in the document (duplicates counted per occurrence)
    pub references: usize,

    /// Attachments copied into the static tree
    pub copied: usize,

    /// References whose source file was absent from the vault
    pub missing: usize,
}

/// Outcome counters for the whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Markdown documents processed
    pub documents: usize,

    pub references: usize,
    pub copied: usize,
    pub missing: usize,
}

impl RunReport {
    /// Folds a document's counters into the run totals
    pub fn absorb(&mut self, doc: DocumentReport) {
        self.documents += 1;
        self.references += doc.references;
        self.copied += doc.copied;
        self.missing += doc.missing;
    }

    /// Renders a one-line summary for the completion message
    pub fn summary(&self) -> String {
        format!(
            "{} files, {} attachments, {} copied, {} missing",
            self.documents, self.references, self.copied, self.missing
        )
    }
}
