use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_format_text_flag() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("mimic")
        .env("MIMIC_HOME", dir.path())
        .args(["format", "--text", "hello `world`"])
        .assert()
        .success()
        .stdout("<p>hello <code>world</code></p>\n");
}

#[test]
fn test_format_reads_stdin() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("mimic")
        .env("MIMIC_HOME", dir.path())
        .arg("format")
        .write_stdin("first line\nsecond line\n\nnext paragraph")
        .assert()
        .success()
        .stdout(
            "<p>first line<br>second line</p>\n\
             <p>next paragraph</p>\n",
        );
}

#[test]
fn test_format_fenced_code_block() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("mimic")
        .env("MIMIC_HOME", dir.path())
        .args(["format", "--text", "Try this:\n\n```js\nconsole.log(1)\n```\n"])
        .assert()
        .success()
        .stdout(
            "<p>Try this:</p>\n\
             <pre><code class=\"language-js\">console.log(1)</code></pre>\n",
        );
}

#[test]
fn test_format_escapes_html() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("mimic")
        .env("MIMIC_HOME", dir.path())
        .args(["format", "--text", "a <b> & `c > d`"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a &lt;b&gt; &amp;"))
        .stdout(predicate::str::contains("<code>c &gt; d</code>"));
}

#[test]
fn test_format_empty_input_prints_nothing() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("mimic")
        .env("MIMIC_HOME", dir.path())
        .arg("format")
        .write_stdin("   \n  ")
        .assert()
        .success()
        .stdout("");
}
