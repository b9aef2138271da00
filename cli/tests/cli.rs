use std::io::Write;
use std::process::Command;

use predicates::prelude::*;
use tempfile::NamedTempFile;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_mdrun")));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn markdown(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const DOC: &str = "\
# Demo

```bash
echo first
```

> ```sh
> echo second
> ```

```python
print('third')
```
";

// -- input acquisition --

#[test]
fn no_blocks_exits_without_prompting() {
    cmd()
        .write_stdin("# Nothing here\n\nJust prose.\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no code blocks found in stdin"))
        .stdout(predicate::str::contains("Enter the number").not());
}

#[test]
fn unreadable_file_is_fatal() {
    cmd()
        .arg("/nonexistent/mdrun/README.md")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "error: cannot read '/nonexistent/mdrun/README.md'",
        ));
}

#[test]
fn extra_arguments_are_a_usage_error() {
    cmd().args(["a.md", "b.md"]).assert().code(2);
}

// -- listing --

#[test]
fn list_uses_file_path_as_label() {
    let file = markdown(DOC);
    let path = file.path().to_str().unwrap();

    let expected = format!(
        "Select a code block to execute:\n\
         [1] {path}:4:4 (bash)\n\
         echo first\n\
         \n\
         [2] {path}:8:8 (sh)\n\
         echo second\n\
         \n\
         [3] {path}:12:12 (python)\n\
         print('third')\n\
         \n"
    );

    cmd()
        .arg(path)
        .arg("--list")
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn list_from_stdin_uses_stdin_label() {
    cmd()
        .arg("--list")
        .write_stdin(DOC)
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] stdin:4:4 (bash)"));
}

// -- selection --

#[cfg(unix)]
#[test]
fn interactive_selection_reprompts() {
    let file = markdown(DOC);

    let assert = cmd()
        .arg(file.path())
        .write_stdin("0\n4\nabc\n2\n")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.matches("Invalid selection, try again.").count(), 3);
    assert!(stdout.ends_with("second\n"));
}

#[test]
fn input_ending_before_a_choice_is_fatal() {
    // The document consumes stdin, leaving nothing to answer the prompt.
    cmd()
        .write_stdin(DOC)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Enter the number of the code block: "))
        .stderr(predicate::str::contains("no selection made"));
}

#[test]
fn block_out_of_range_is_fatal() {
    let file = markdown(DOC);
    cmd()
        .arg(file.path())
        .args(["--block", "4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("block 4 is out of range (1-3)"));
}

// -- execution --

#[cfg(unix)]
#[test]
fn runs_chosen_block_with_bash() {
    let file = markdown(DOC);
    cmd()
        .arg(file.path())
        .args(["--block", "1"])
        .assert()
        .success()
        .stdout("first\n");
}

#[cfg(unix)]
#[test]
fn whole_script_is_piped() {
    let file = markdown("```bash\ncat <<'EOF'\nline 1\n\n\tline 3\nEOF\necho done\n```\n");
    cmd()
        .arg(file.path())
        .args(["-b", "1"])
        .assert()
        .success()
        .stdout("line 1\n\n\tline 3\ndone\n");
}

#[cfg(unix)]
#[test]
fn interpreter_stderr_passes_through() {
    let file = markdown("```sh\necho oops >&2\n```\n");
    cmd()
        .arg(file.path())
        .args(["-b", "1", "--no-color"])
        .assert()
        .success()
        .stderr("oops\n");
}

#[test]
fn unsupported_language_is_reported_not_failed() {
    let file = markdown(DOC);
    cmd()
        .arg(file.path())
        .args(["--block", "3", "--no-color"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("unsupported language: python"));
}

#[cfg(unix)]
#[test]
fn failing_interpreter_still_exits_zero() {
    let file = markdown("```sh\nexit 4\n```\n");
    cmd()
        .arg(file.path())
        .args(["--block", "1", "--no-color"])
        .assert()
        .success()
        .stderr(predicate::str::contains("`bash` exited with"));
}
