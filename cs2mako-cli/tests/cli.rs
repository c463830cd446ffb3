use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;

const TEMPLATE: &str = "<?cs if:item.count > #0 ?><?cs var:html_escape(item.name) ?><?cs /if ?>\n";
const CONVERTED: &str = "% if item.count > int(0):\n${ item.name | h }\\\n% endif\n\n";

#[test]
fn converts_stdin_to_stdout() {
    let mut cmd = cargo_bin_cmd!("cs2mako");
    cmd.write_stdin(TEMPLATE);

    cmd.assert().success().stdout(predicate::eq(CONVERTED));
}

#[test]
fn converts_file_to_output_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("page.cs");
    let output = dir.path().join("page.html");
    fs::write(&input, TEMPLATE).expect("write input");

    let mut cmd = cargo_bin_cmd!("cs2mako");
    cmd.arg(&input).arg("-o").arg(&output);

    cmd.assert().success().stdout(predicate::str::is_empty());
    assert_eq!(fs::read_to_string(&output).expect("read output"), CONVERTED);
}

#[test]
fn write_uses_configured_extension() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("page.cs");
    let config = dir.path().join("custom.toml");
    fs::write(&input, "<?cs include:\"header.cs\" ?>").expect("write input");
    fs::write(&config, "[output]\nextension = \"tmpl\"\n").expect("write config");

    let mut cmd = cargo_bin_cmd!("cs2mako");
    cmd.arg(&input).arg("--write").arg("--config").arg(&config);

    cmd.assert().success();
    assert_eq!(
        fs::read_to_string(dir.path().join("page.tmpl")).expect("read output"),
        "<%include file=\"/header.cs\"/>"
    );
}

#[test]
fn flags_override_configuration() {
    let mut cmd = cargo_bin_cmd!("cs2mako");
    cmd.arg("--setter")
        .arg("data.put")
        .arg("--include-root")
        .arg("/views/")
        .write_stdin("<?cs set:a.b = 1 ?><?cs include:\"x.cs\" ?>");

    cmd.assert()
        .success()
        .stdout("<% data.put(\"a.b\", 1) %><%include file=\"/views/x.cs\"/>");
}

#[test]
fn tokens_are_printed_as_json() {
    let mut cmd = cargo_bin_cmd!("cs2mako");
    cmd.arg("--tokens").write_stdin("<?cs var:x ?>");

    cmd.assert().success().stdout(
        predicate::str::contains("\"kind\": \"open\"")
            .and(predicate::str::contains("\"directive\": \"var\""))
            .and(predicate::str::contains("\"kind\": \"stop\"")),
    );
}

#[test]
fn conversion_errors_exit_with_failure() {
    let mut cmd = cargo_bin_cmd!("cs2mako");
    cmd.write_stdin("<?cs if a ?>never closed");

    cmd.assert().failure().code(1).stderr(predicate::str::starts_with(
        "Conversion error: `if` opened at line 1, column 1 is never closed",
    ));
}

#[test]
fn write_without_path_is_rejected() {
    let mut cmd = cargo_bin_cmd!("cs2mako");
    cmd.arg("--write").write_stdin("text");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--write needs an input path"));
}

#[test]
fn missing_input_file_is_reported() {
    let mut cmd = cargo_bin_cmd!("cs2mako");
    cmd.arg("/nonexistent/page.cs");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read /nonexistent/page.cs"));
}
