//! attachsync - migrate vault attachments into a static site tree
//!
//! Paths are fixed per deployment; edit the constants below and rebuild.
//! The tool takes no command-line arguments or environment variables.

use std::process::ExitCode;

use attachsync::{Migrator, MigratorConfig};

/// Directory of markdown documents to rewrite (non-recursive).
const POSTS_DIR: &str = "content/posts";

/// Source vault holding the original attachment files.
const ATTACHMENTS_DIR: &str = "vault";

/// Destination static-assets tree, created on demand.
const STATIC_FILES_DIR: &str = "static/images";

fn main() -> ExitCode {
    let config = MigratorConfig::new(POSTS_DIR, ATTACHMENTS_DIR, STATIC_FILES_DIR);

    match Migrator::new(config).run() {
        Ok(report) => {
            println!(
                "Markdown files processed and attachments copied successfully ({}).",
                report.summary()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
