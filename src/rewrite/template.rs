use crate::config::TemplateConfig;

use super::identifier::Identifier;

/// The three values carried from the deprecated call into the builder chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderArguments {
    pub name: String,
    pub value: String,
    pub year_matcher: String,
}

impl BuilderArguments {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        year_matcher: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            year_matcher: year_matcher.into(),
        }
    }

    /// Map extracted call arguments onto builder fields.
    ///
    /// Two-argument calls have no year matcher, so `default_year_matcher`
    /// fills it in. Any other length yields `None`.
    pub fn from_call_arguments(arguments: &[String], default_year_matcher: &str) -> Option<Self> {
        match arguments {
            [name, value] => Some(Self::new(name, value, default_year_matcher)),
            [name, value, year_matcher] => Some(Self::new(name, value, year_matcher)),
            _ => None,
        }
    }
}

/// Renders the builder block that replaces one call site.
#[derive(Debug, Clone)]
pub struct RewriteTemplate {
    target_type: String,
    builder_type: String,
    invoke: String,
    continuation: String,
}

impl RewriteTemplate {
    pub fn new(config: &TemplateConfig) -> Self {
        Self {
            target_type: config.target_type.clone(),
            builder_type: config.builder_type.clone(),
            invoke: config.invoke.clone(),
            continuation: config.continuation_indent.clone(),
        }
    }

    /// Render the seven-line block with lines joined by `newline`. The
    /// result has no trailing line break; it replaces a statement that ends
    /// in `;`.
    pub fn render(
        &self,
        indent: &str,
        identifier: &Identifier,
        args: &BuilderArguments,
        newline: &str,
    ) -> String {
        let chain = format!("{}{}", indent, self.continuation);
        [
            format!(
                "{}{} {} = new {}()",
                indent, self.target_type, identifier, self.builder_type
            ),
            format!("{}.setName({})", chain, args.name),
            format!("{}.setValue({})", chain, args.value),
            format!("{}.setYearMatcher({})", chain, args.year_matcher),
            format!("{}.inferSubtractRecycling()", chain),
            format!("{}.build();", chain),
            format!("{}{}({});", indent, self.invoke, identifier),
        ]
        .join(newline)
    }
}

/// Line terminator used by `text`: `\r\n` if it has any, `\n` otherwise.
pub fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

impl Default for RewriteTemplate {
    fn default() -> Self {
        Self::new(&TemplateConfig::default())
    }
}
