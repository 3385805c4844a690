//! Integration tests for the built-in batches run against a project on disk.

use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use streamfix::config::{BatchSpec, MigrationRules};
use streamfix::formatting::PlainFormatter;
use streamfix::io::RealFileSystem;
use streamfix::migration::{run_batch, BatchReport, DriverOptions, FileMigrationResult, Reporter};
use tempfile::TempDir;

const TEST_ROOT: &str = "engine/src/test/java/org/kigalisim";

const FLOOR_TEST: &str = indoc! {r#"
    package org.kigalisim.lang.operation;

    import java.math.BigDecimal;
    import java.util.Optional;
    import org.kigalisim.engine.Engine;
    import org.kigalisim.engine.number.EngineNumber;
    import org.kigalisim.engine.state.YearMatcher;

    public class FloorOperationTest {
      @Test
      public void testFloorAppliesLimit() {
        Engine engine = machine.getEngine();
        engine.setStream("import", new EngineNumber(BigDecimal.valueOf(50), "kg"), Optional.empty());
        operation.execute(machine);
      }
    }
"#};

const CHANGE_TEST: &str = indoc! {r#"
    package org.kigalisim.lang.operation;

    import org.kigalisim.engine.state.YearMatcher;

    public class ChangeOperationTest {
      @Test
      public void testChange() {
        engine.setStream("domestic", domesticValue, yearMatcher);
        engine.setStream("sales", salesValue,
            yearMatcher);
      }
    }
"#};

/// Helper to create a temp project with files under the test source root.
fn create_test_project(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    for (name, content) in files {
        let file_path = test_file(temp_dir.path(), name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
    }
    temp_dir
}

fn test_file(root: &Path, relative: &str) -> PathBuf {
    root.join(TEST_ROOT).join(relative)
}

fn run(root: &Path, batch: &BatchSpec, dry_run: bool) -> (BatchReport, String) {
    let mut reporter = Reporter::new(Vec::new(), &PlainFormatter).dry_run(dry_run);
    let report = run_batch(
        &RealFileSystem::new(),
        root,
        batch,
        &MigrationRules::default(),
        DriverOptions { dry_run },
        &mut reporter,
    )
    .expect("Batch should succeed");
    let output = String::from_utf8(reporter.into_inner()).expect("utf8 output");
    (report, output)
}

#[test]
fn test_remaining_batch_rewrites_floor_literal() {
    let temp = create_test_project(&[("lang/operation/FloorOperationTest.java", FLOOR_TEST)]);

    let (report, output) = run(temp.path(), &BatchSpec::remaining(), false);

    let floor = fs::read_to_string(test_file(temp.path(), "lang/operation/FloorOperationTest.java"))
        .unwrap();
    let expected_block = concat!(
        "    StreamUpdate importUpdate = new StreamUpdateBuilder()\n",
        "        .setName(\"import\")\n",
        "        .setValue(new EngineNumber(BigDecimal.valueOf(50), \"kg\"))\n",
        "        .setYearMatcher(Optional.empty())\n",
        "        .inferSubtractRecycling()\n",
        "        .build();\n",
        "    engine.executeStreamUpdate(importUpdate);\n",
        "    operation.execute(machine);\n",
    );
    assert!(floor.contains(expected_block), "{}", floor);
    assert!(floor.contains(indoc! {"
        import org.kigalisim.engine.state.YearMatcher;
        import org.kigalisim.engine.recalc.StreamUpdate;
        import org.kigalisim.engine.recalc.StreamUpdateBuilder;
    "}));
    assert!(!floor.contains("setStream"));

    // SingleThreadEngineTest is not part of this project
    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].result, FileMigrationResult::NotFound);
    assert_eq!(report.fixed_count(), 1);
    assert!(output.starts_with("File not found: "));
    assert!(output.ends_with("\nTotal files fixed: 1\n"));
}

#[test]
fn test_tests_batch_reports_every_file_in_order() {
    let temp = create_test_project(&[
        ("lang/operation/ChangeOperationTest.java", CHANGE_TEST),
        (
            "lang/operation/RetireOperationTest.java",
            "import org.kigalisim.engine.state.YearMatcher;\nclass RetireOperationTest {}\n",
        ),
    ]);

    let (report, output) = run(temp.path(), &BatchSpec::tests(), false);

    assert_eq!(report.entries.len(), 9);
    assert_eq!(report.fixed_count(), 1);
    assert_eq!(report.not_found_count(), 7);

    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[0].starts_with("Fixed ") && lines[0].ends_with("ChangeOperationTest.java"));
    assert!(lines[5].starts_with("No changes needed for "));
    assert!(lines[5].ends_with("RetireOperationTest.java"));
    assert_eq!(lines[9], "");
    assert_eq!(lines[10], "Total files fixed: 1");

    let change = fs::read_to_string(test_file(temp.path(), "lang/operation/ChangeOperationTest.java"))
        .unwrap();
    assert_eq!(change.matches("import org.kigalisim.engine.recalc.StreamUpdate;").count(), 1);
    assert!(change.contains("StreamUpdate update1 = new StreamUpdateBuilder()"));
    assert!(change.contains("StreamUpdate update2 = new StreamUpdateBuilder()"));
}

#[test]
fn test_second_run_changes_nothing() {
    let temp = create_test_project(&[("lang/operation/ChangeOperationTest.java", CHANGE_TEST)]);
    let path = test_file(temp.path(), "lang/operation/ChangeOperationTest.java");

    run(temp.path(), &BatchSpec::tests(), false);
    let first = fs::read_to_string(&path).unwrap();

    let (report, output) = run(temp.path(), &BatchSpec::tests(), false);
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
    assert_eq!(report.fixed_count(), 0);
    assert!(output.contains("No changes needed for "));
}

#[test]
fn test_dry_run_leaves_files_untouched() {
    let temp = create_test_project(&[("lang/operation/ChangeOperationTest.java", CHANGE_TEST)]);
    let path = test_file(temp.path(), "lang/operation/ChangeOperationTest.java");

    let (report, output) = run(temp.path(), &BatchSpec::tests(), true);

    assert_eq!(fs::read_to_string(&path).unwrap(), CHANGE_TEST);
    assert_eq!(report.fixed_count(), 1);
    assert!(output.starts_with("Would fix "));
}

#[test]
fn test_single_file_batch_with_custom_seed() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Sample.java"), CHANGE_TEST).unwrap();

    let batch = BatchSpec::single("Sample.java").with_seed(20).with_prefix("flow");
    let (report, _) = run(temp.path(), &batch, false);

    let text = fs::read_to_string(temp.path().join("Sample.java")).unwrap();
    assert_eq!(report.fixed_count(), 1);
    assert!(text.contains("StreamUpdate flow20 = "));
    assert!(text.contains("StreamUpdate flow21 = "));
    assert!(text.contains("engine.executeStreamUpdate(flow21);"));
}
