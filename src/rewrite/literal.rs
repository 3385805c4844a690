use crate::config::CallPattern;

use super::identifier::{Identifier, IdentifierAllocator};
use super::template::{line_ending, BuilderArguments, RewriteTemplate};

/// A call site spelled out in full and replaced by exact substring match.
///
/// Used for calls the argument patterns cannot capture, typically because
/// the value nests commas or parentheses. `year_matcher: None` describes the
/// two-argument form of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRewrite {
    pub indent: String,
    pub identifier: String,
    pub name: String,
    pub value: String,
    pub year_matcher: Option<String>,
}

impl LiteralRewrite {
    /// The exact statement text to look for, including indentation.
    pub fn deprecated_text(&self, call: &CallPattern) -> String {
        let mut arguments = vec![self.name.as_str(), self.value.as_str()];
        if let Some(year_matcher) = &self.year_matcher {
            arguments.push(year_matcher);
        }
        format!("{}{}", self.indent, call.render_call(&arguments))
    }

    fn builder_arguments(&self, default_year_matcher: &str) -> BuilderArguments {
        BuilderArguments::new(
            &self.name,
            &self.value,
            self.year_matcher.as_deref().unwrap_or(default_year_matcher),
        )
    }

    /// Replace every line-anchored occurrence of the deprecated statement.
    ///
    /// The first occurrence takes the rewrite's own identifier; any further
    /// ones draw from `allocator` so bindings stay unique. Returns the new
    /// text and the number of occurrences replaced.
    pub fn apply(
        &self,
        text: &str,
        call: &CallPattern,
        template: &RewriteTemplate,
        default_year_matcher: &str,
        allocator: &mut IdentifierAllocator,
    ) -> (String, usize) {
        let needle = self.deprecated_text(call);
        let positions: Vec<usize> = text
            .match_indices(&needle)
            .map(|(pos, _)| pos)
            .filter(|&pos| pos == 0 || text[..pos].ends_with('\n'))
            .collect();

        if positions.is_empty() {
            return (text.to_string(), 0);
        }

        let args = self.builder_arguments(default_year_matcher);
        let newline = line_ending(text);
        let mut output = String::with_capacity(text.len() + positions.len() * 256);
        let mut cursor = 0;

        for (index, &pos) in positions.iter().enumerate() {
            let identifier = if index == 0 && !allocator.is_reserved(&self.identifier) {
                allocator.reserve(self.identifier.clone());
                Identifier::new(self.identifier.clone())
            } else {
                allocator.next()
            };

            output.push_str(&text[cursor..pos]);
            output.push_str(&template.render(&self.indent, &identifier, &args, newline));
            cursor = pos + needle.len();
        }
        output.push_str(&text[cursor..]);

        (output, positions.len())
    }
}
