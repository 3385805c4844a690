//! The hand-enumerated batches the tool ships with.
//!
//! Each batch is a fixed list of files for one known migration step. Paths
//! are relative to the project root passed on the command line.

use std::path::{Path, PathBuf};

use crate::rewrite::LiteralRewrite;

const TEST_ROOT: &str = "engine/src/test/java/org/kigalisim";

/// Which source migration a batch applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationKind {
    /// `setStream` calls to `StreamUpdate` builder blocks
    StreamUpdate,
    /// Split `streamCaptor`/`valueCaptor` assertions to `capturedUpdates`
    CaptorAssertions,
}

/// A literal rewrite bound to the one file it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLiteral {
    pub file: PathBuf,
    pub rewrite: LiteralRewrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSpec {
    pub name: String,
    pub kind: MigrationKind,
    pub files: Vec<PathBuf>,
    pub identifier_prefix: String,
    /// First counter value handed out in each file
    pub seed: usize,
    pub literals: Vec<FileLiteral>,
}

impl BatchSpec {
    /// Literal rewrites that apply to `file`.
    pub fn literals_for(&self, file: &Path) -> Vec<LiteralRewrite> {
        self.literals
            .iter()
            .filter(|literal| literal.file == file)
            .map(|literal| literal.rewrite.clone())
            .collect()
    }

    /// First pass over the operation and engine tests.
    pub fn tests() -> Self {
        Self {
            name: "tests".to_string(),
            kind: MigrationKind::StreamUpdate,
            files: test_paths(&[
                "lang/operation/ChangeOperationTest.java",
                "lang/operation/FloorOperationTest.java",
                "lang/operation/GetStreamOperationTest.java",
                "lang/operation/RechargeOperationTest.java",
                "lang/operation/ReplaceOperationTest.java",
                "lang/operation/RetireOperationTest.java",
                "engine/SingleThreadEngineTest.java",
                "engine/recalc/RecalcOperationBuilderIntegrationTest.java",
                "engine/support/ChangeExecutorTest.java",
            ]),
            identifier_prefix: "update".to_string(),
            seed: 1,
            literals: Vec::new(),
        }
    }

    /// Follow-up pass over files the first pass left partially migrated.
    ///
    /// Numbering starts at 10 to stay clear of the first pass's bindings.
    pub fn remaining() -> Self {
        let floor_test = test_path("lang/operation/FloorOperationTest.java");
        Self {
            name: "remaining".to_string(),
            kind: MigrationKind::StreamUpdate,
            files: vec![test_path("engine/SingleThreadEngineTest.java"), floor_test.clone()],
            identifier_prefix: "update".to_string(),
            seed: 10,
            literals: vec![FileLiteral {
                file: floor_test,
                rewrite: LiteralRewrite {
                    indent: "    ".to_string(),
                    identifier: "importUpdate".to_string(),
                    name: "\"import\"".to_string(),
                    value: "new EngineNumber(BigDecimal.valueOf(50), \"kg\")".to_string(),
                    year_matcher: Some("Optional.empty()".to_string()),
                },
            }],
        }
    }

    /// Captor assertion cleanup for the set executor tests.
    pub fn set_executor() -> Self {
        Self {
            name: "set-executor".to_string(),
            kind: MigrationKind::CaptorAssertions,
            files: test_paths(&["engine/support/SetExecutorTest.java"]),
            identifier_prefix: "update".to_string(),
            seed: 1,
            literals: Vec::new(),
        }
    }

    /// A batch of exactly one named file.
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self {
            name: "file".to_string(),
            kind: MigrationKind::StreamUpdate,
            files: vec![path.into()],
            identifier_prefix: "update".to_string(),
            seed: 1,
            literals: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: usize) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.identifier_prefix = prefix.into();
        self
    }
}

fn test_path(relative: &str) -> PathBuf {
    Path::new(TEST_ROOT).join(relative)
}

fn test_paths(relative: &[&str]) -> Vec<PathBuf> {
    relative.iter().map(|path| test_path(path)).collect()
}
