//! The one-shot migration pass
//!
//! Fully sequential: each document is read, rewritten in memory, and written
//! back before the next one begins. The only recovered condition is a missing
//! attachment source; every other failure propagates and halts the run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::config::MigratorConfig;
use super::report::{DocumentReport, RunReport};
use crate::domain::AttachmentReference;

/// What happened to a single reference's copy step
enum CopyOutcome {
    Copied,
    Missing,
}

/// Rewrites attachment references and relocates the referenced files
pub struct Migrator {
    config: MigratorConfig,
}

impl Migrator {
    /// Creates a migrator for the given configuration
    pub fn new(config: MigratorConfig) -> Self {
        Self { config }
    }

    /// Returns the run configuration
    pub fn config(&self) -> &MigratorConfig {
        &self.config
    }

    /// Runs the migration over every markdown document in the posts directory
    pub fn run(&self) -> Result<RunReport> {
        self.config.validate()?;

        let mut report = RunReport::default();
        for path in self.enumerate_documents()? {
            report.absorb(self.process_document(&path)?);
        }

        Ok(report)
    }

    /// Lists the markdown documents in the posts directory.
    ///
    /// Non-recursive: subdirectories and non-`.md` entries are ignored.
    /// Sorted by file name so progress output is deterministic.
    fn enumerate_documents(&self) -> Result<Vec<PathBuf>> {
        let dir = &self.config.posts_dir;
        let mut documents = Vec::new();

        for entry in fs::read_dir(dir)
            .with_context(|| format!("Failed to read posts directory: {}", dir.display()))?
        {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && path.extension().is_some_and(|e| e == "md") {
                documents.push(path);
            }
        }

        documents.sort();
        Ok(documents)
    }

    /// Processes one document: rewrite every reference, copy each attachment,
    /// then persist the accumulated content.
    ///
    /// Substitution replaces every literal occurrence of the bracketed form
    /// in one pass, so the final text does not depend on the order in which
    /// distinct references are processed. A duplicate reference is a no-op
    /// substitution the second time, but its copy is still attempted
    /// (harmless overwrite of the same destination).
    fn process_document(&self, path: &Path) -> Result<DocumentReport> {
        println!("Processing file: {}", path.display());

        let mut content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read document: {}", path.display()))?;

        let references = AttachmentReference::extract_all(&content);
        let mut doc = DocumentReport {
            references: references.len(),
            ..Default::default()
        };

        for reference in &references {
            println!("  Found attachment: {}", reference);

            content = content.replace(&reference.bracketed(), &reference.rewritten_link());

            match self.copy_attachment(reference)? {
                CopyOutcome::Copied => doc.copied += 1,
                CopyOutcome::Missing => doc.missing += 1,
            }
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write document: {}", path.display()))?;

        Ok(doc)
    }

    /// Copies one attachment from the vault into the static tree.
    ///
    /// A missing source is a warning, not an error: the link rewrite in the
    /// document stands either way. An existing destination file is silently
    /// overwritten (last-write-wins).
    fn copy_attachment(&self, reference: &AttachmentReference) -> Result<CopyOutcome> {
        let source = self.config.attachment_source(reference.relative_path());

        if !source.exists() {
            println!("  Warning: Attachment not found: {}", source.display());
            return Ok(CopyOutcome::Missing);
        }

        let target = self.config.attachment_target(reference.relative_path());

        if let Some(parent) = target.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
                println!("  Created directory: {}", parent.display());
            }
        }

        fs::copy(&source, &target).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                source.display(),
                target.display()
            )
        })?;
        println!("  Copied {} to {}", reference, target.display());

        Ok(CopyOutcome::Copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Lays out posts/, vault/ and static/images/ under a temp root
    fn setup() -> (TempDir, MigratorConfig) {
        let dir = TempDir::new().unwrap();
        let config = MigratorConfig::new(
            dir.path().join("posts"),
            dir.path().join("vault"),
            dir.path().join("static").join("images"),
        );

        fs::create_dir_all(&config.posts_dir).unwrap();
        fs::create_dir_all(&config.attachments_dir).unwrap();

        (dir, config)
    }

    fn write_post(config: &MigratorConfig, name: &str, content: &str) -> PathBuf {
        let path = config.posts_dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn write_attachment(config: &MigratorConfig, name: &str, bytes: &[u8]) {
        let path = config.attachments_dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, bytes).unwrap();
    }

    #[test]
    fn document_without_references_is_unchanged() {
        let (_dir, config) = setup();
        let post = write_post(&config, "plain.md", "# Title\n\nNo attachments here.\n");

        let report = Migrator::new(config).run().unwrap();

        assert_eq!(report.documents, 1);
        assert_eq!(report.references, 0);
        assert_eq!(
            fs::read_to_string(&post).unwrap(),
            "# Title\n\nNo attachments here.\n"
        );
    }

    #[test]
    fn rewrites_reference_and_copies_attachment() {
        let (_dir, config) = setup();
        let post = write_post(&config, "post.md", "Before [[diagram 1.png]] after\n");
        write_attachment(&config, "diagram 1.png", b"png bytes");

        let report = Migrator::new(config.clone()).run().unwrap();

        let content = fs::read_to_string(&post).unwrap();
        assert_eq!(
            content,
            "Before [Image Description](/images/diagram%201.png) after\n"
        );
        assert!(!content.contains("[["));

        let copied = config.static_dir.join("diagram 1.png");
        assert_eq!(fs::read(&copied).unwrap(), b"png bytes");

        assert_eq!(report.references, 1);
        assert_eq!(report.copied, 1);
        assert_eq!(report.missing, 0);
    }

    #[test]
    fn rerun_on_processed_output_is_a_noop() {
        let (_dir, config) = setup();
        let post = write_post(&config, "post.md", "See [[pic.png]]\n");
        write_attachment(&config, "pic.png", b"data");

        Migrator::new(config.clone()).run().unwrap();
        let first_pass = fs::read_to_string(&post).unwrap();

        let report = Migrator::new(config).run().unwrap();
        let second_pass = fs::read_to_string(&post).unwrap();

        assert_eq!(first_pass, second_pass);
        assert_eq!(report.references, 0);
    }

    #[test]
    fn missing_attachment_still_rewrites_link() {
        let (_dir, config) = setup();
        let post = write_post(&config, "post.md", "Look: [[ghost.png]]\n");

        let report = Migrator::new(config.clone()).run().unwrap();

        let content = fs::read_to_string(&post).unwrap();
        assert_eq!(content, "Look: [Image Description](/images/ghost.png)\n");
        assert!(!config.static_dir.join("ghost.png").exists());

        assert_eq!(report.missing, 1);
        assert_eq!(report.copied, 0);
    }

    #[test]
    fn nested_reference_creates_destination_dirs() {
        let (_dir, config) = setup();
        write_post(&config, "post.md", "[[sub/dir/pic.png]]\n");
        write_attachment(&config, "sub/dir/pic.png", b"nested bytes");

        Migrator::new(config.clone()).run().unwrap();

        let copied = config.static_dir.join("sub").join("dir").join("pic.png");
        assert!(copied.is_file());
        assert_eq!(fs::read(&copied).unwrap(), b"nested bytes");
    }

    #[test]
    fn existing_destination_is_overwritten() {
        let (_dir, config) = setup();
        write_post(&config, "post.md", "[[pic.png]]\n");
        write_attachment(&config, "pic.png", b"new contents");

        let stale = config.static_dir.join("pic.png");
        fs::create_dir_all(&config.static_dir).unwrap();
        fs::write(&stale, b"stale contents").unwrap();

        Migrator::new(config).run().unwrap();

        assert_eq!(fs::read(&stale).unwrap(), b"new contents");
    }

    #[test]
    fn duplicate_reference_rewrites_every_occurrence() {
        let (_dir, config) = setup();
        let post = write_post(&config, "post.md", "[[pic.png]] and again [[pic.png]]\n");
        write_attachment(&config, "pic.png", b"data");

        let report = Migrator::new(config).run().unwrap();

        let content = fs::read_to_string(&post).unwrap();
        assert_eq!(
            content,
            "[Image Description](/images/pic.png) and again [Image Description](/images/pic.png)\n"
        );
        // Both occurrences are counted; the second copy overwrites the first.
        assert_eq!(report.references, 2);
        assert_eq!(report.copied, 2);
    }

    #[test]
    fn ignores_non_markdown_entries_and_subdirectories() {
        let (_dir, config) = setup();
        write_post(&config, "post.md", "[[pic.png]]\n");
        fs::write(config.posts_dir.join("notes.txt"), "[[pic.png]]").unwrap();

        let nested = config.posts_dir.join("drafts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("draft.md"), "[[pic.png]]").unwrap();

        let report = Migrator::new(config.clone()).run().unwrap();

        assert_eq!(report.documents, 1);
        assert_eq!(
            fs::read_to_string(config.posts_dir.join("notes.txt")).unwrap(),
            "[[pic.png]]"
        );
        assert_eq!(
            fs::read_to_string(nested.join("draft.md")).unwrap(),
            "[[pic.png]]"
        );
    }

    #[test]
    fn run_fails_when_posts_dir_is_missing() {
        let dir = TempDir::new().unwrap();
        let config = MigratorConfig::new(
            dir.path().join("nope"),
            dir.path().join("vault"),
            dir.path().join("static"),
        );

        assert!(Migrator::new(config).run().is_err());
    }

    #[test]
    fn source_attachment_is_left_untouched() {
        let (_dir, config) = setup();
        write_post(&config, "post.md", "[[pic.png]]\n");
        write_attachment(&config, "pic.png", b"original");

        Migrator::new(config.clone()).run().unwrap();

        let source = config.attachments_dir.join("pic.png");
        assert_eq!(fs::read(&source).unwrap(), b"original");
    }
}
