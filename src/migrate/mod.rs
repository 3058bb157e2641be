//! Migration engine
//!
//! The migrator performs the one-shot pass: enumerate documents, rewrite
//! references, copy attachments, persist rewritten content.

mod config;
mod migrator;
mod report;

pub use config::{MigrateError, MigratorConfig};
pub use migrator::Migrator;
pub use report::{DocumentReport, RunReport};
