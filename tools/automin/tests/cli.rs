use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use indoc::indoc;
use tempfile::TempDir;

fn automin(args: &[&str], directory: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_automin"))
        .args(args)
        .arg("--quiet")
        .current_dir(directory)
        .output()
        .expect("Failed to run automin")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_minimize_writes_normalized_automaton() {
    let directory = TempDir::new().unwrap();
    fs::write(
        directory.path().join("input.txt"),
        indoc! {"
            NFA a b
            >p q|r -
            <q - -
            <r - -
        "},
    )
    .unwrap();

    let output = automin(&["minimize", "input.txt"], directory.path());
    assert!(output.status.success(), "{output:?}");

    let printed = stdout(&output);
    for title in ["Source:", "Epsilon removed:", "Determinized:", "Minimized:", "Normalized:"] {
        assert!(printed.contains(title), "Missing {title} in {printed}");
    }

    let saved = fs::read_to_string(directory.path().join("output.txt")).unwrap();
    assert_eq!(saved, "DFA a b\n>1 2 -\n<2 - -\n");
}

#[test]
fn test_minimize_to_given_output() {
    let directory = TempDir::new().unwrap();
    fs::write(directory.path().join("input.txt"), "NFA a \\eps\n>1 - 2\n<2 2 -\n").unwrap();

    let output = automin(&["minimize", "input.txt", "result.txt", "--layout", "compact"], directory.path());
    assert!(output.status.success(), "{output:?}");

    let saved = fs::read_to_string(directory.path().join("result.txt")).unwrap();
    assert_eq!(saved, "DFA a\n><1 1\n");
}

#[test]
fn test_check_words() {
    let directory = TempDir::new().unwrap();
    fs::write(directory.path().join("input.txt"), "NFA a b\n>1 2 -\n2 - 3\n<3 - 3\n").unwrap();

    let output = automin(&["check", "input.txt", "ab", "a", "abb"], directory.path());
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "ab: true\na: false\nabb: true\n");
}

#[test]
fn test_compare() {
    let directory = TempDir::new().unwrap();
    fs::write(directory.path().join("left.txt"), "NFA a b\n>p q|r -\n<q - -\n<r - -\n").unwrap();
    fs::write(directory.path().join("right.txt"), "DFA b a\n>x - y\n<y - -\n").unwrap();
    fs::write(directory.path().join("other.txt"), "DFA a b\n>x y -\n<y y -\n").unwrap();

    let output = automin(&["compare", "left.txt", "right.txt"], directory.path());
    assert_eq!(stdout(&output), "true\n");

    let output = automin(&["compare", "left.txt", "other.txt"], directory.path());
    assert_eq!(stdout(&output), "false\n");
}

#[test]
fn test_compare_empty_languages() {
    let directory = TempDir::new().unwrap();
    fs::write(directory.path().join("loop.txt"), "NFA a\n>1 1\n<2 2\n").unwrap();
    fs::write(directory.path().join("missing.txt"), "NFA a\n>1 -\n<2 2\n").unwrap();

    let output = automin(&["compare", "loop.txt", "missing.txt"], directory.path());
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "true\n");
}

#[test]
fn test_info() {
    let directory = TempDir::new().unwrap();
    fs::write(directory.path().join("input.txt"), "NFA a b\n>1 1|2 -\n<2 - -\n").unwrap();

    let output = automin(&["info", "input.txt"], directory.path());
    assert!(output.status.success(), "{output:?}");

    let printed = stdout(&output);
    assert!(printed.contains("Kind: NFA"), "{printed}");
    assert!(printed.contains("Alphabet: a b"), "{printed}");
    assert!(printed.contains("Number of states: 2"), "{printed}");
}

#[test]
fn test_malformed_input_fails() {
    let directory = TempDir::new().unwrap();
    fs::write(directory.path().join("input.txt"), "NFA a b\n>1 2 - 2\n<2 - -\n").unwrap();

    let output = automin(&["info", "input.txt"], directory.path());
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("doesn't match the symbol count"),
        "{output:?}"
    );
}

#[test]
fn test_missing_input_fails() {
    let directory = TempDir::new().unwrap();

    let output = automin(&["info", "missing.txt"], directory.path());
    assert!(!output.status.success());
}
