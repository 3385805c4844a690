use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use streamfix::cli::{Cli, Commands};
use streamfix::config::{load_rules, load_rules_from, BatchSpec, MigrationRules};
use streamfix::formatting::{ColoredFormatter, FormattingConfig};
use streamfix::io::RealFileSystem;
use streamfix::migration::{run_batch, DriverOptions, Reporter};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let rules = resolve_rules(&cli)?;
    let batch = select_batch(&cli.command);
    let options = DriverOptions {
        dry_run: cli.dry_run,
    };

    let formatter = ColoredFormatter::new(create_formatting_config(cli.plain));
    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), &formatter).dry_run(cli.dry_run);

    run_batch(
        &RealFileSystem::new(),
        &cli.root,
        &batch,
        &rules,
        options,
        &mut reporter,
    )
    .with_context(|| format!("Batch '{}' aborted", batch.name))?;

    Ok(())
}

// RUST_LOG takes precedence over -v
fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn resolve_rules(cli: &Cli) -> Result<MigrationRules> {
    match &cli.config {
        Some(path) => load_rules_from(path)
            .with_context(|| format!("Failed to load rules from {}", path.display())),
        None => Ok(load_rules(&cli.root)),
    }
}

fn select_batch(command: &Commands) -> BatchSpec {
    match command {
        Commands::Tests => BatchSpec::tests(),
        Commands::Remaining => BatchSpec::remaining(),
        Commands::SetExecutor => BatchSpec::set_executor(),
        Commands::File { path, seed, prefix } => BatchSpec::single(path.clone())
            .with_seed(*seed)
            .with_prefix(prefix.clone()),
    }
}

fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}
