// Export modules for library usage
pub mod cli;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod migration;
pub mod rewrite;

// Re-export commonly used types
pub use crate::config::{BatchSpec, MigrationKind, MigrationRules};
pub use crate::errors::{MigrationError, Result};
pub use crate::migration::{
    migrate_file, run_batch, BatchReport, CaptorMigration, DriverOptions, FileMigrationResult,
    MigrationOutcome, SourceMigration, StreamUpdateMigration,
};
pub use crate::rewrite::{ArgumentExtractor, IdentifierAllocator, RewriteTemplate};
