use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

/// One Java identifier-like word; `$` counts as a word character.
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}_$]+").unwrap());

/// A synthesized local binding name of the form `<prefix><counter>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out fresh identifiers for one file's rewrite pass.
///
/// The counter starts at `seed` and only moves forward. Names that are
/// reserved (already present in the file, or handed out earlier) are skipped,
/// so a second migration over a partially migrated file never reuses one.
#[derive(Debug, Clone)]
pub struct IdentifierAllocator {
    prefix: String,
    counter: usize,
    reserved: HashSet<String>,
}

impl IdentifierAllocator {
    pub fn new(prefix: impl Into<String>, seed: usize) -> Self {
        Self {
            prefix: prefix.into(),
            counter: seed,
            reserved: HashSet::new(),
        }
    }

    /// Reserve every `<prefix><digits>` word already present in `text`.
    pub fn reserving_existing(mut self, text: &str) -> Self {
        let prefix = self.prefix.clone();
        self.reserved.extend(
            WORD.find_iter(text)
                .map(|m| m.as_str())
                .filter(|word| {
                    word.strip_prefix(prefix.as_str()).is_some_and(|rest| {
                        !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
                    })
                })
                .map(str::to_string),
        );
        self
    }

    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// Current counter value, i.e. the next number that will be tried.
    pub fn counter(&self) -> usize {
        self.counter
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Identifier {
        loop {
            let name = format!("{}{}", self.prefix, self.counter);
            self.counter += 1;
            if self.reserved.insert(name.clone()) {
                return Identifier(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_next_formats_and_increments() {
        let mut allocator = IdentifierAllocator::new("update", 1);
        assert_eq!(allocator.next().as_str(), "update1");
        assert_eq!(allocator.next().as_str(), "update2");
        assert_eq!(allocator.counter(), 3);
    }

    #[test]
    fn test_seed_offsets_the_counter() {
        let mut allocator = IdentifierAllocator::new("update", 10);
        assert_eq!(allocator.next().to_string(), "update10");
    }

    #[test]
    fn test_skips_names_already_in_text() {
        let text = "StreamUpdate update1 = ...;\nengine.executeStreamUpdate(update2);";
        let mut allocator = IdentifierAllocator::new("update", 1).reserving_existing(text);
        assert!(allocator.is_reserved("update1"));
        assert_eq!(allocator.next().as_str(), "update3");
    }

    #[test]
    fn test_reserving_ignores_longer_words() {
        let text = "StreamUpdate importUpdate1 = x; int updates1 = 0;";
        let allocator = IdentifierAllocator::new("update", 1).reserving_existing(text);
        assert!(!allocator.is_reserved("update1"));
    }

    #[test]
    fn test_reserving_dollar_prefix() {
        let text = "StreamUpdate $u1 = x; engine.executeStreamUpdate($u1); int a$u2 = 0;";
        let mut allocator = IdentifierAllocator::new("$u", 1).reserving_existing(text);
        assert!(allocator.is_reserved("$u1"));
        assert!(!allocator.is_reserved("$u2"));
        assert_eq!(allocator.next().as_str(), "$u2");
    }

    #[test]
    fn test_explicit_reservation() {
        let mut allocator = IdentifierAllocator::new("update", 10);
        allocator.reserve("update10");
        assert_eq!(allocator.next().as_str(), "update11");
    }

    #[test]
    fn test_many_allocations_are_unique() {
        let mut allocator = IdentifierAllocator::new("update", 1);
        let names: HashSet<_> = (0..500).map(|_| allocator.next()).collect();
        assert_eq!(names.len(), 500);
    }
}
