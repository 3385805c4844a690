//! File-level migration: the per-file driver, batch orchestration and the
//! console report.

pub mod batch;
pub mod driver;
pub mod report;

pub use batch::run_batch;
pub use driver::{
    migrate_file, CaptorMigration, DriverOptions, FileMigrationResult, MigrationOutcome,
    SourceMigration, StreamUpdateMigration,
};
pub use report::{BatchReport, ReportEntry, Reporter};
