//! Import augmentation for migrated files.
//!
//! Whether the imports are needed is decided by a plain substring check for
//! the marker symbol anywhere in the file. A file that mentions the marker in
//! a comment or string is treated as already importing it. Skipping an import
//! that was needed only surfaces as a compile error in the migrated file, so
//! the imprecision is accepted. `strict` mode narrows the check to `import`
//! lines.

use crate::config::ImportRule;

use super::template::line_ending;

/// What the augmenter did with a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportDecision {
    /// Marker already referenced; text left untouched
    AlreadyPresent,
    /// Rule has no import lines; text left untouched
    NothingToInsert,
    /// Anchor line not found; text left untouched
    AnchorMissing,
    /// Imports inserted after the anchor line
    Inserted(String),
}

impl ImportDecision {
    pub fn into_text(self, unchanged: &str) -> String {
        match self {
            Self::Inserted(text) => text,
            Self::AlreadyPresent | Self::NothingToInsert | Self::AnchorMissing => {
                unchanged.to_string()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportAugmenter<'a> {
    rule: &'a ImportRule,
}

impl<'a> ImportAugmenter<'a> {
    pub fn new(rule: &'a ImportRule) -> Self {
        Self { rule }
    }

    /// True when the file already references the marker symbol.
    pub fn has_marker(&self, text: &str) -> bool {
        if self.rule.strict {
            text.lines().any(|line| {
                let line = line.trim_start();
                line.starts_with("import ") && line.contains(&self.rule.marker)
            })
        } else {
            text.contains(&self.rule.marker)
        }
    }

    /// Add the rule's import lines to `rewritten` unless `original` already
    /// references the marker.
    ///
    /// The check runs on the text as read, since the rewritten blocks
    /// themselves mention the marker.
    pub fn augment(&self, original: &str, rewritten: &str) -> ImportDecision {
        if self.has_marker(original) {
            return ImportDecision::AlreadyPresent;
        }
        self.insert(rewritten)
    }

    /// Insert the rule's import lines directly after the first anchor line.
    fn insert(&self, text: &str) -> ImportDecision {
        if self.rule.lines.is_empty() {
            return ImportDecision::NothingToInsert;
        }

        let Some(anchor_end) = find_anchor_end(text, &self.rule.anchor) else {
            return ImportDecision::AnchorMissing;
        };

        let newline = line_ending(text);
        let indent = leading_whitespace(&text[line_start(text, anchor_end)..anchor_end]);

        let mut inserted = String::with_capacity(text.len() + 128);
        inserted.push_str(&text[..anchor_end]);
        for line in &self.rule.lines {
            inserted.push_str(newline);
            inserted.push_str(indent);
            inserted.push_str(line);
        }
        inserted.push_str(&text[anchor_end..]);

        ImportDecision::Inserted(inserted)
    }
}

/// Byte offset just past the anchor line's content, before its terminator.
fn find_anchor_end(text: &str, anchor: &str) -> Option<usize> {
    let anchor = anchor.trim();
    let mut offset = 0;

    for raw_line in text.split_inclusive('\n') {
        let content = raw_line.trim_end_matches(['\n', '\r']);
        if content.trim() == anchor {
            return Some(offset + content.len());
        }
        offset += raw_line.len();
    }

    None
}

fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |pos| pos + 1)
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}
