//! Migration run configuration
//!
//! The three directory paths are fixed per deployment and passed in as an
//! explicit value, so tests can point the migrator at temp fixtures.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("Posts directory does not exist or is not a directory: {0}")]
    PostsDirMissing(PathBuf),
}

/// Paths for a migration run
#[derive(Debug, Clone)]
pub struct MigratorConfig {
    /// Flat directory of markdown documents to rewrite (non-recursive)
    pub posts_dir: PathBuf,

    /// Source vault tree holding the original attachment files
    pub attachments_dir: PathBuf,

    /// Destination static-assets tree, created on demand
    pub static_dir: PathBuf,
}

impl MigratorConfig {
    /// Creates a configuration from the three deployment paths
    pub fn new(
        posts_dir: impl Into<PathBuf>,
        attachments_dir: impl Into<PathBuf>,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            attachments_dir: attachments_dir.into(),
            static_dir: static_dir.into(),
        }
    }

    /// Checks that the posts directory exists.
    ///
    /// A missing posts directory is the fatal configuration error of the run.
    /// The attachments and static directories are not checked here: a missing
    /// attachment source is a per-reference warning, and the static tree is
    /// created on demand.
    pub fn validate(&self) -> Result<(), MigrateError> {
        if !self.posts_dir.is_dir() {
            return Err(MigrateError::PostsDirMissing(self.posts_dir.clone()));
        }
        Ok(())
    }

    /// Resolves a reference name to its source path under the vault
    pub fn attachment_source(&self, reference: &Path) -> PathBuf {
        self.attachments_dir.join(reference)
    }

    /// Resolves a reference name to its destination path under the static tree
    pub fn attachment_target(&self, reference: &Path) -> PathBuf {
        self.static_dir.join(reference)
    }
}
