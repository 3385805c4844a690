//! Batch orchestration over a fixed list of files.

use std::io::Write;
use std::path::Path;

use crate::config::{BatchSpec, MigrationKind, MigrationRules};
use crate::errors::{MigrationError, Result};
use crate::io::FileSystem;
use crate::migration::driver::{
    migrate_file, CaptorMigration, DriverOptions, FileMigrationResult, StreamUpdateMigration,
};
use crate::migration::report::{BatchReport, Reporter};

/// Run every file of `batch` in listed order.
///
/// Missing files are reported and skipped. Any other I/O failure aborts the
/// run; files already rewritten stay rewritten.
pub fn run_batch<W: Write>(
    fs: &dyn FileSystem,
    root: &Path,
    batch: &BatchSpec,
    rules: &MigrationRules,
    options: DriverOptions,
    reporter: &mut Reporter<'_, W>,
) -> Result<BatchReport> {
    validate_prefix(&batch.identifier_prefix)?;
    log::info!(
        "Running batch '{}' over {} file(s) under {}",
        batch.name,
        batch.files.len(),
        root.display()
    );

    let base = match batch.kind {
        MigrationKind::StreamUpdate => Some(
            StreamUpdateMigration::new(rules)?
                .with_identifiers(batch.identifier_prefix.clone(), batch.seed),
        ),
        MigrationKind::CaptorAssertions => None,
    };

    let mut report = BatchReport::default();
    for relative in &batch.files {
        let path = root.join(relative);

        let result = if !fs.is_file(&path) {
            FileMigrationResult::NotFound
        } else {
            match &base {
                Some(stream) => {
                    let migration = stream.clone().with_literals(batch.literals_for(relative));
                    migrate_file(fs, &path, &migration, options)?
                }
                None => migrate_file(fs, &path, &CaptorMigration, options)?,
            }
        };

        reporter.file(&path, result)?;
        report.record(path, result);
    }

    reporter.summary(&report)?;
    log::info!(
        "Batch '{}' finished: {} fixed, {} missing",
        batch.name,
        report.fixed_count(),
        report.not_found_count()
    );
    Ok(report)
}

fn validate_prefix(prefix: &str) -> Result<()> {
    let mut chars = prefix.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$');
    if valid_start && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
        Ok(())
    } else {
        Err(MigrationError::config(format!(
            "identifier prefix '{}' is not a valid identifier",
            prefix
        )))
    }
}
