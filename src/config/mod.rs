// Rule configuration
mod core;
mod loader;

// Built-in batches
pub mod batches;

pub use self::core::{
    default_arity, default_builder_type, default_continuation_indent, default_import_anchor,
    default_import_lines, default_import_marker, default_invoke, default_method,
    default_receiver, default_target_type, default_year_matcher, CallPattern, ImportRule,
    MigrationRules, TemplateConfig,
};
pub use batches::{BatchSpec, FileLiteral, MigrationKind};
pub use loader::{
    directory_ancestors, load_rules, load_rules_from, parse_and_validate_rules, CONFIG_FILE_NAME,
};
