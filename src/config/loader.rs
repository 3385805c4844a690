use std::fs;
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};

use super::core::MigrationRules;
use crate::errors::{MigrationError, Result};

/// File name searched for in the project root and its ancestors
pub const CONFIG_FILE_NAME: &str = ".streamfix.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate rules from a TOML string
pub fn parse_and_validate_rules(contents: &str) -> Result<MigrationRules> {
    let rules = toml::from_str::<MigrationRules>(contents)?;
    rules.validate()?;
    Ok(rules)
}

/// Try loading rules from a discovered path, falling back on any problem
pub(crate) fn try_load_rules_from_path(config_path: &Path) -> Option<MigrationRules> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_rules(&contents) {
        Ok(rules) => {
            log::debug!("Loaded rules from {}", config_path.display());
            Some(rules)
        }
        Err(e) => {
            log::warn!(
                "Ignoring {}: {}. Using default rules.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load the rules from an explicit file. A missing or invalid file is an error.
pub fn load_rules_from(path: &Path) -> Result<MigrationRules> {
    let contents = read_config_file(path).map_err(|e| {
        MigrationError::io_with_path(
            format!("Failed to read rules file {}", path.display()),
            path,
            e,
        )
    })?;
    parse_and_validate_rules(&contents).map_err(|e| {
        MigrationError::config(format!("{}: {}", path.display(), e))
    })
}

/// Discover `.streamfix.toml` starting at `root`, or use the default rules.
///
/// A relative `root` is resolved against the current directory first, so
/// the search can climb above it.
pub fn load_rules(root: &Path) -> MigrationRules {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default rules.",
                e
            );
            return MigrationRules::default();
        }
    };

    discover_rules(root, &current)
}

pub(crate) fn discover_rules(root: &Path, current: &Path) -> MigrationRules {
    let start = absolute_search_start(root, current);
    log::debug!("Searching for {} from {}", CONFIG_FILE_NAME, start.display());

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_rules_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No {} found after checking {} directories. Using default rules.",
                CONFIG_FILE_NAME,
                MAX_TRAVERSAL_DEPTH
            );
            MigrationRules::default()
        })
}

/// Join a relative root onto `current` and fold away `.` and `..`.
pub(crate) fn absolute_search_start(root: &Path, current: &Path) -> PathBuf {
    let joined = if root.is_absolute() {
        root.to_path_buf()
    } else {
        current.join(root)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
