use serde::{Deserialize, Serialize};

use crate::errors::{MigrationError, Result};

/// Root configuration structure for streamfix
///
/// Every section falls back to the `setStream` -> `StreamUpdate` migration
/// when omitted from `.streamfix.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MigrationRules {
    /// Deprecated call pattern to locate
    #[serde(default)]
    pub call: CallPattern,

    /// Replacement block naming
    #[serde(default)]
    pub template: TemplateConfig,

    /// Import directives required by the replacement
    #[serde(default)]
    pub imports: ImportRule,
}

/// The deprecated `receiver.method(args...);` statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallPattern {
    #[serde(default = "default_receiver")]
    pub receiver: String,

    #[serde(default = "default_method")]
    pub method: String,

    /// Number of arguments at the call site (2 or 3)
    #[serde(default = "default_arity")]
    pub arity: usize,
}

impl Default for CallPattern {
    fn default() -> Self {
        Self {
            receiver: default_receiver(),
            method: default_method(),
            arity: default_arity(),
        }
    }
}

impl CallPattern {
    /// Render the deprecated statement for the given arguments.
    pub fn render_call(&self, arguments: &[&str]) -> String {
        format!(
            "{}.{}({});",
            self.receiver,
            self.method,
            arguments.join(", ")
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateConfig {
    /// Declared type of the synthesized binding
    #[serde(default = "default_target_type")]
    pub target_type: String,

    /// Builder constructed with `new`
    #[serde(default = "default_builder_type")]
    pub builder_type: String,

    /// Call that consumes the built value
    #[serde(default = "default_invoke")]
    pub invoke: String,

    /// Extra indent applied to the builder chain lines
    #[serde(default = "default_continuation_indent")]
    pub continuation_indent: String,

    /// Year matcher used when the call site has only two arguments
    #[serde(default = "default_year_matcher")]
    pub default_year_matcher: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            target_type: default_target_type(),
            builder_type: default_builder_type(),
            invoke: default_invoke(),
            continuation_indent: default_continuation_indent(),
            default_year_matcher: default_year_matcher(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportRule {
    /// Symbol whose presence means the imports are already in place
    #[serde(default = "default_import_marker")]
    pub marker: String,

    /// Existing import line the new imports are placed after
    #[serde(default = "default_import_anchor")]
    pub anchor: String,

    #[serde(default = "default_import_lines")]
    pub lines: Vec<String>,

    /// Only count the marker when it appears on an `import` line
    #[serde(default)]
    pub strict: bool,
}

impl Default for ImportRule {
    fn default() -> Self {
        Self {
            marker: default_import_marker(),
            anchor: default_import_anchor(),
            lines: default_import_lines(),
            strict: false,
        }
    }
}

impl MigrationRules {
    /// Check the rules for values the rewrite engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(2..=3).contains(&self.call.arity) {
            return Err(MigrationError::config(format!(
                "call.arity must be 2 or 3, got {}",
                self.call.arity
            )));
        }

        let required = [
            ("call.receiver", &self.call.receiver),
            ("call.method", &self.call.method),
            ("template.target_type", &self.template.target_type),
            ("template.builder_type", &self.template.builder_type),
            ("template.invoke", &self.template.invoke),
            ("template.continuation_indent", &self.template.continuation_indent),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(MigrationError::config(format!("{} must not be empty", field)));
        }

        if self
            .template
            .continuation_indent
            .chars()
            .any(|c| c != ' ' && c != '\t')
        {
            return Err(MigrationError::config(
                "template.continuation_indent may only contain spaces and tabs",
            ));
        }

        Ok(())
    }
}

pub fn default_receiver() -> String {
    "engine".to_string()
}

pub fn default_method() -> String {
    "setStream".to_string()
}

pub fn default_arity() -> usize {
    3
}

pub fn default_target_type() -> String {
    "StreamUpdate".to_string()
}

pub fn default_builder_type() -> String {
    "StreamUpdateBuilder".to_string()
}

pub fn default_invoke() -> String {
    "engine.executeStreamUpdate".to_string()
}

pub fn default_continuation_indent() -> String {
    "    ".to_string()
}

pub fn default_year_matcher() -> String {
    "Optional.empty()".to_string()
}

pub fn default_import_marker() -> String {
    "StreamUpdate".to_string()
}

pub fn default_import_anchor() -> String {
    "import org.kigalisim.engine.state.YearMatcher;".to_string()
}

pub fn default_import_lines() -> Vec<String> {
    vec![
        "import org.kigalisim.engine.recalc.StreamUpdate;".to_string(),
        "import org.kigalisim.engine.recalc.StreamUpdateBuilder;".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        assert!(MigrationRules::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_unsupported_arity() {
        let mut rules = MigrationRules::default();
        rules.call.arity = 4;
        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("call.arity"));
    }

    #[test]
    fn test_rejects_empty_method() {
        let mut rules = MigrationRules::default();
        rules.call.method.clear();
        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("call.method"));
    }

    #[test]
    fn test_rejects_non_whitespace_continuation() {
        let mut rules = MigrationRules::default();
        rules.template.continuation_indent = "--".to_string();
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let rules: MigrationRules = toml::from_str(
            r#"
            [call]
            method = "setFlow"

            [imports]
            strict = true
            "#,
        )
        .unwrap();

        assert_eq!(rules.call.method, "setFlow");
        assert_eq!(rules.call.receiver, "engine");
        assert_eq!(rules.call.arity, 3);
        assert!(rules.imports.strict);
        assert_eq!(rules.imports.lines, default_import_lines());
        assert_eq!(rules.template, TemplateConfig::default());
    }

    #[test]
    fn test_render_call() {
        let call = CallPattern::default();
        assert_eq!(
            call.render_call(&["\"import\"", "value", "Optional.empty()"]),
            "engine.setStream(\"import\", value, Optional.empty());"
        );
    }
}
