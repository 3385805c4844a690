//! Console reporting for batch runs.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::formatting::OutputFormatter;
use crate::migration::driver::FileMigrationResult;

/// One processed path and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub path: PathBuf,
    pub result: FileMigrationResult,
}

/// Per-file outcomes of a batch, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub entries: Vec<ReportEntry>,
}

impl BatchReport {
    pub fn record(&mut self, path: impl Into<PathBuf>, result: FileMigrationResult) {
        self.entries.push(ReportEntry {
            path: path.into(),
            result,
        });
    }

    pub fn fixed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.result.is_changed())
            .count()
    }

    pub fn not_found_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.result == FileMigrationResult::NotFound)
            .count()
    }
}

/// Writes one status line per file and a closing total.
pub struct Reporter<'a, W: Write> {
    out: W,
    formatter: &'a dyn OutputFormatter,
    dry_run: bool,
}

impl<'a, W: Write> Reporter<'a, W> {
    pub fn new(out: W, formatter: &'a dyn OutputFormatter) -> Self {
        Self {
            out,
            formatter,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn file(&mut self, path: &Path, result: FileMigrationResult) -> io::Result<()> {
        let path = path.display();
        match result {
            FileMigrationResult::Changed { .. } => {
                let status = if self.dry_run { "Would fix" } else { "Fixed" };
                writeln!(self.out, "{} {}", self.formatter.success(status), path)
            }
            FileMigrationResult::Unchanged => {
                writeln!(
                    self.out,
                    "{} {}",
                    self.formatter.dim("No changes needed for"),
                    path
                )
            }
            FileMigrationResult::NotFound => {
                writeln!(self.out, "{} {}", self.formatter.warning("File not found:"), path)
            }
        }
    }

    pub fn summary(&mut self, report: &BatchReport) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{} {}",
            self.formatter.bold("Total files fixed:"),
            report.fixed_count()
        )?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
