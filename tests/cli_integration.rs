//! End-to-end tests for the streamfix binary.

use assert_cmd::prelude::*;
use indoc::indoc;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const SET_EXECUTOR_PATH: &str = "engine/src/test/java/org/kigalisim/engine/support/SetExecutorTest.java";

fn streamfix(root: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_streamfix"));
    cmd.arg("--root").arg(root).arg("--plain").env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let assert = cmd.assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_file_command_rewrites_and_reports() {
    let temp = TempDir::new().unwrap();
    let source = indoc! {r#"
        import org.kigalisim.engine.state.YearMatcher;

        class Sample {
          void run() {
            engine.setStream("sales", salesValue, yearMatcher);
          }
        }
    "#};
    fs::write(temp.path().join("Sample.java"), source).unwrap();

    let output = stdout_of(streamfix(temp.path()).args(["file", "Sample.java"]));

    assert!(output.starts_with("Fixed "), "{}", output);
    assert!(output.ends_with("\nTotal files fixed: 1\n"), "{}", output);
    let text = fs::read_to_string(temp.path().join("Sample.java")).unwrap();
    assert!(text.contains("    engine.executeStreamUpdate(update1);"));
    assert!(text.contains("import org.kigalisim.engine.recalc.StreamUpdateBuilder;"));
}

#[test]
fn test_missing_files_do_not_fail_the_run() {
    let temp = TempDir::new().unwrap();

    let output = stdout_of(streamfix(temp.path()).arg("tests"));

    assert_eq!(output.matches("File not found: ").count(), 9);
    assert!(output.ends_with("\nTotal files fixed: 0\n"));
}

#[test]
fn test_dry_run_flag_after_subcommand() {
    let temp = TempDir::new().unwrap();
    let source = "class A {\n  engine.setStream(\"sales\", v, m);\n}\n";
    fs::write(temp.path().join("A.java"), source).unwrap();

    let output = stdout_of(streamfix(temp.path()).args(["file", "A.java", "--dry-run"]));

    assert!(output.starts_with("Would fix "));
    assert_eq!(fs::read_to_string(temp.path().join("A.java")).unwrap(), source);
}

#[test]
fn test_set_executor_command() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(SET_EXECUTOR_PATH);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        indoc! {r#"
            class SetExecutorTest {
              void check() {
                List<StreamUpdate> capturedUpdates = updateCaptor.getAllValues();
                assertEquals("import", streamCaptor.getAllValues().get(1));
              }
            }
        "#},
    )
    .unwrap();

    let output = stdout_of(streamfix(temp.path()).arg("set-executor"));

    assert!(output.starts_with("Fixed "));
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("assertEquals(\"import\", capturedUpdates.get(1).getName());"));
}

#[test]
fn test_explicit_config_must_exist() {
    let temp = TempDir::new().unwrap();

    streamfix(temp.path())
        .args(["--config", "missing.toml", "tests"])
        .assert()
        .failure();
}

#[test]
fn test_config_file_changes_the_import_package() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".streamfix.toml"),
        indoc! {r#"
            [imports]
            lines = [
                "import org.kigalisim.engine.support.StreamUpdate;",
                "import org.kigalisim.engine.support.StreamUpdateBuilder;",
            ]
        "#},
    )
    .unwrap();
    fs::write(
        temp.path().join("A.java"),
        "import org.kigalisim.engine.state.YearMatcher;\nclass A {\n  engine.setStream(\"sales\", v, m);\n}\n",
    )
    .unwrap();

    stdout_of(streamfix(temp.path()).args(["file", "A.java"]));

    let text = fs::read_to_string(temp.path().join("A.java")).unwrap();
    assert!(text.contains("import org.kigalisim.engine.support.StreamUpdate;\n"));
    assert!(!text.contains("engine.recalc"));
}

#[test]
fn test_default_root_finds_config_in_parent_directory() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    fs::write(
        temp.path().join(".streamfix.toml"),
        "[call]\nreceiver = \"sim\"\n",
    )
    .unwrap();
    fs::write(
        project.join("A.java"),
        "class A {\n  sim.setStream(\"sales\", v, m);\n}\n",
    )
    .unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_streamfix"));
    cmd.current_dir(&project)
        .args(["--plain", "file", "A.java"])
        .env_remove("RUST_LOG");
    let output = stdout_of(&mut cmd);

    assert!(output.starts_with("Fixed "), "{}", output);
    let text = fs::read_to_string(project.join("A.java")).unwrap();
    assert!(text.contains("  StreamUpdate update1 = new StreamUpdateBuilder()"));
    assert!(!text.contains("sim.setStream"));
}
