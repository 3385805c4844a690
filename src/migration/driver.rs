//! Per-file migration driver.
//!
//! A file is read once, transformed in memory, and written back only when
//! the transformed text differs from what was read. Pass order within one
//! file is fixed:
//!
//! 1. literal rewrites (exact statements known in advance)
//! 2. single-line call sites
//! 3. multi-line call sites
//! 4. imports, if any site was rewritten and the original lacked the marker
//!
//! Each pass is a single global substitution over the output of the previous
//! one, and none of the rendered blocks contain the deprecated call, so no
//! site is rewritten twice.

use std::path::Path;

use crate::config::{MigrationRules, TemplateConfig};
use crate::errors::Result;
use crate::io::FileSystem;
use crate::rewrite::{
    find_call_sites, line_ending, migrate_captor_assertions, replace_call_sites,
    ArgumentExtractor, BuilderArguments, CallShape, IdentifierAllocator, ImportAugmenter,
    ImportDecision, LiteralRewrite, RewriteTemplate,
};

/// Result of transforming one file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOutcome {
    pub text: String,
    /// Number of individual rewrites applied
    pub rewritten: usize,
}

/// A text-to-text migration applied to one file at a time.
pub trait SourceMigration {
    fn migrate_source(&self, source: &str) -> MigrationOutcome;
}

/// Outcome for one file in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMigrationResult {
    Unchanged,
    Changed { rewritten: usize },
    NotFound,
}

impl FileMigrationResult {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverOptions {
    /// Compute and report changes without writing them
    pub dry_run: bool,
}

/// `engine.setStream(...)` to `StreamUpdate` builder migration.
#[derive(Debug, Clone)]
pub struct StreamUpdateMigration {
    rules: MigrationRules,
    extractor: ArgumentExtractor,
    template: RewriteTemplate,
    identifier_prefix: String,
    seed: usize,
    literals: Vec<LiteralRewrite>,
}

impl StreamUpdateMigration {
    pub fn new(rules: &MigrationRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self {
            extractor: ArgumentExtractor::new(&rules.call)?,
            template: RewriteTemplate::new(&rules.template),
            rules: rules.clone(),
            identifier_prefix: "update".to_string(),
            seed: 1,
            literals: Vec::new(),
        })
    }

    pub fn with_identifiers(mut self, prefix: impl Into<String>, seed: usize) -> Self {
        self.identifier_prefix = prefix.into();
        self.seed = seed;
        self
    }

    pub fn with_literals(mut self, literals: Vec<LiteralRewrite>) -> Self {
        self.literals = literals;
        self
    }

    /// A fresh allocator for one file, aware of the names already in it.
    fn allocator_for(&self, source: &str) -> IdentifierAllocator {
        let mut allocator =
            IdentifierAllocator::new(&self.identifier_prefix, self.seed).reserving_existing(source);
        for literal in &self.literals {
            if contains_word(source, &literal.identifier) {
                allocator.reserve(literal.identifier.clone());
            }
        }
        allocator
    }

    fn rewrite_shape(
        &self,
        text: &str,
        shape: CallShape,
        newline: &str,
        allocator: &mut IdentifierAllocator,
    ) -> (String, usize) {
        let sites = find_call_sites(&self.extractor, text, shape);
        if sites.is_empty() {
            return (text.to_string(), 0);
        }

        let template: &TemplateConfig = &self.rules.template;
        let mut rewritten = 0;
        let output = replace_call_sites(text, &sites, |site| {
            match BuilderArguments::from_call_arguments(
                &site.arguments,
                &template.default_year_matcher,
            ) {
                Some(args) => {
                    let identifier = allocator.next();
                    log::debug!(
                        "Rewriting {:?} call site at line {} as {}",
                        shape,
                        site.line_in(text),
                        identifier
                    );
                    rewritten += 1;
                    self.template.render(&site.indent, &identifier, &args, newline)
                }
                None => text[site.start..site.end].to_string(),
            }
        });

        (output, rewritten)
    }
}

impl SourceMigration for StreamUpdateMigration {
    fn migrate_source(&self, source: &str) -> MigrationOutcome {
        let mut allocator = self.allocator_for(source);
        let newline = line_ending(source);

        let mut text = source.to_string();
        let mut rewritten = 0;

        for literal in &self.literals {
            let (next, count) = literal.apply(
                &text,
                &self.rules.call,
                &self.template,
                &self.rules.template.default_year_matcher,
                &mut allocator,
            );
            text = next;
            rewritten += count;
        }

        for shape in [CallShape::SingleLine, CallShape::MultiLine] {
            let (next, count) = self.rewrite_shape(&text, shape, newline, &mut allocator);
            text = next;
            rewritten += count;
        }

        if rewritten > 0 {
            text = match ImportAugmenter::new(&self.rules.imports).augment(source, &text) {
                ImportDecision::AnchorMissing => {
                    log::warn!(
                        "Anchor line `{}` not found; imports not added",
                        self.rules.imports.anchor
                    );
                    text
                }
                decision => {
                    log::debug!("Import decision: {:?}", decision_kind(&decision));
                    decision.into_text(&text)
                }
            };
        }

        MigrationOutcome { text, rewritten }
    }
}

fn decision_kind(decision: &ImportDecision) -> &'static str {
    match decision {
        ImportDecision::AlreadyPresent => "already present",
        ImportDecision::NothingToInsert => "nothing to insert",
        ImportDecision::AnchorMissing => "anchor missing",
        ImportDecision::Inserted(_) => "inserted",
    }
}

/// `streamCaptor`/`valueCaptor` assertion migration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptorMigration;

impl SourceMigration for CaptorMigration {
    fn migrate_source(&self, source: &str) -> MigrationOutcome {
        let (text, stats) = migrate_captor_assertions(source);
        log::debug!("Captor rewrites: {:?}", stats);
        MigrationOutcome {
            text,
            rewritten: stats.total(),
        }
    }
}

/// Migrate one file, writing it back only if its content changed.
pub fn migrate_file(
    fs: &dyn FileSystem,
    path: &Path,
    migration: &dyn SourceMigration,
    options: DriverOptions,
) -> Result<FileMigrationResult> {
    let original = fs.read_to_string(path)?;
    let outcome = migration.migrate_source(&original);

    if outcome.text == original {
        log::debug!("{}: no rewrites applied", path.display());
        return Ok(FileMigrationResult::Unchanged);
    }

    if options.dry_run {
        log::info!("{}: dry run, not writing", path.display());
    } else {
        fs.write(path, &outcome.text)?;
    }

    Ok(FileMigrationResult::Changed {
        rewritten: outcome.rewritten,
    })
}

fn contains_word(text: &str, word: &str) -> bool {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_' || c == '$';
    text.match_indices(word).any(|(pos, _)| {
        let before = text[..pos].chars().next_back();
        let after = text[pos + word.len()..].chars().next();
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    })
}
