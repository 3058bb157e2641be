//! attachsync - One-shot attachment migration for markdown vaults
//!
//! Scans a flat directory of markdown documents for wiki-style attachment
//! references (`[[name.ext]]`), rewrites them into standard markdown image
//! links, and copies the referenced files from the source vault into a
//! static-assets tree served alongside the generated site.

pub mod domain;
pub mod migrate;

pub use domain::AttachmentReference;
pub use migrate::{MigrateError, Migrator, MigratorConfig, RunReport};
