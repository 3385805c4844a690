//! Migration of executor tests that verified `setStream` through captors.
//!
//! Before the builder API, executor tests captured the stream name and the
//! value with two separate `ArgumentCaptor`s. After it, a single
//! `ArgumentCaptor<StreamUpdate>` records every `executeStreamUpdate` call.
//! This module rewrites the old assertions to read the captured updates:
//!
//! 1. A full two-call assert block collapses into the `capturedUpdates` form.
//! 2. Stray assertions against `streamCaptor` or `valueCaptor` are redirected
//!    to `capturedUpdates.get(i)`.
//! 3. Leftover `streamCaptor` and `valueCaptor` declaration lines are removed.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ASSERT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?m)^([ \t]*)// Assert[ \t]*\r?\n",
        r"\s+ArgumentCaptor<String> streamCaptor = ArgumentCaptor\.forClass\(String\.class\);\s*\n",
        r"\s+ArgumentCaptor<EngineNumber> valueCaptor = ArgumentCaptor\.forClass\(EngineNumber\.class\);\s*\n",
        r"\s*\n",
        r"\s+ArgumentCaptor<StreamUpdate> updateCaptor = ArgumentCaptor\.forClass\(StreamUpdate\.class\);\s*\n",
        r"\s+verify\(mockEngine, times\(2\)\)\.executeStreamUpdate\(updateCaptor\.capture\(\)\);\s*\n",
        r"\s*\n",
        r"\s+// Check [^\n(]*\([^)]+\)\s*\n",
        r#"\s+assertEquals\(("[^"]+"), streamCaptor\.getAllValues\(\)\.get\(0\)\);\s*\n"#,
        r"\s+assertEquals\(([^,]+), valueCaptor\.getAllValues\(\)\.get\(0\)\.getValue\(\)\);\s*\n",
        r#"\s+assertEquals\("([^"]+)", valueCaptor\.getAllValues\(\)\.get\(0\)\.getUnits\(\)\);\s*\n"#,
        r"\s*\n",
        r"\s+// Check [^\n(]*\([^)]+\)\s*\n",
        r#"\s+assertEquals\(("[^"]+"), streamCaptor\.getAllValues\(\)\.get\(1\)\);\s*\n"#,
        r"\s+assertEquals\(([^,]+), valueCaptor\.getAllValues\(\)\.get\(1\)\.getValue\(\)\);\s*\n",
        r#"\s+assertEquals\("([^"]+)", valueCaptor\.getAllValues\(\)\.get\(1\)\.getUnits\(\)\);"#,
    ))
    .unwrap()
});

static STREAM_NAME_ASSERT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"assertEquals\(("[^"]+"), streamCaptor\.getAllValues\(\)\.get\((\d+)\)\);"#)
        .unwrap()
});

static VALUE_ASSERT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"assertEquals\(([^,]+), valueCaptor\.getAllValues\(\)\.get\((\d+)\)\.getValue\(\)\);",
    )
    .unwrap()
});

static UNITS_ASSERT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"assertEquals\("([^"]+)", valueCaptor\.getAllValues\(\)\.get\((\d+)\)\.getUnits\(\)\);"#,
    )
    .unwrap()
});

static STALE_CAPTOR_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?m)^[ \t]*ArgumentCaptor<(?:String|EngineNumber)> (?:streamCaptor|valueCaptor) = ",
        r"ArgumentCaptor\.forClass\((?:String|EngineNumber)\.class\);[ \t]*\r?\n",
    ))
    .unwrap()
});

/// Counts of each rewrite applied to one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptorRewriteStats {
    pub assert_blocks: usize,
    pub assertions: usize,
    pub declarations_removed: usize,
}

impl CaptorRewriteStats {
    pub fn total(&self) -> usize {
        self.assert_blocks + self.assertions + self.declarations_removed
    }
}

fn render_assert_block(caps: &Captures) -> String {
    let indent = &caps[1];
    let check = |index: usize, name: &str, value: &str, units: &str| {
        format!(
            "{indent}// Check {label} call\n\
             {indent}assertEquals({name}, capturedUpdates.get({index}).getName());\n\
             {indent}assertEquals({value}, capturedUpdates.get({index}).getValue().getValue());\n\
             {indent}assertEquals(\"{units}\", capturedUpdates.get({index}).getValue().getUnits());",
            label = name.trim_matches('"'),
        )
    };

    format!(
        "{indent}// Assert\n\
         {indent}ArgumentCaptor<StreamUpdate> updateCaptor = ArgumentCaptor.forClass(StreamUpdate.class);\n\
         {indent}verify(mockEngine, times(2)).executeStreamUpdate(updateCaptor.capture());\n\
         \n\
         {indent}List<StreamUpdate> capturedUpdates = updateCaptor.getAllValues();\n\
         \n\
         {first}\n\
         \n\
         {second}",
        first = check(0, &caps[2], &caps[3], &caps[4]),
        second = check(1, &caps[5], &caps[6], &caps[7]),
    )
}

fn replace_counting<F>(pattern: &Regex, text: &str, count: &mut usize, render: F) -> String
where
    F: Fn(&Captures) -> String,
{
    pattern
        .replace_all(text, |caps: &Captures| {
            *count += 1;
            render(caps)
        })
        .into_owned()
}

/// Apply the captor assertion migration to one file's text.
pub fn migrate_captor_assertions(text: &str) -> (String, CaptorRewriteStats) {
    let mut stats = CaptorRewriteStats::default();

    let content = replace_counting(&ASSERT_BLOCK, text, &mut stats.assert_blocks, |caps| {
        render_assert_block(caps)
    });

    let content = replace_counting(&STREAM_NAME_ASSERT, &content, &mut stats.assertions, |caps| {
        format!("assertEquals({}, capturedUpdates.get({}).getName());", &caps[1], &caps[2])
    });
    let content = replace_counting(&VALUE_ASSERT, &content, &mut stats.assertions, |caps| {
        format!(
            "assertEquals({}, capturedUpdates.get({}).getValue().getValue());",
            &caps[1], &caps[2]
        )
    });
    let content = replace_counting(&UNITS_ASSERT, &content, &mut stats.assertions, |caps| {
        format!(
            "assertEquals(\"{}\", capturedUpdates.get({}).getValue().getUnits());",
            &caps[1], &caps[2]
        )
    });

    let content = replace_counting(
        &STALE_CAPTOR_DECLARATION,
        &content,
        &mut stats.declarations_removed,
        |_| String::new(),
    );

    (content, stats)
}
