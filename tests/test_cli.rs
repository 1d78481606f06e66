
use fixtures::*;

use assert_cmd::prelude::*;
use idmef::IdmefParser;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::process::Command;
use tempfile::tempdir;

#[test]
fn it_respects_directory_output() {
    let d = tempdir().unwrap();
    let f = d.as_ref().join("nested").join("test.out");

    let sample = heartbeat_sample();

    let mut cmd = Command::new(assert_cmd::cargo_bin!("idmef_dump"));
    cmd.args(["-f", &f.to_string_lossy(), sample.to_str().unwrap()]);

    assert!(
        cmd.output().unwrap().stdout.is_empty(),
        "Expected output to be printed to file, but was printed to stdout"
    );

    let mut written = String::new();
    File::open(&f).unwrap().read_to_string(&mut written).unwrap();

    let parser = IdmefParser::new();
    assert_eq!(
        parser.parse(&written).unwrap(),
        parser.parse(&read_sample(&sample)).unwrap()
    );
}

#[test]
fn test_it_refuses_to_overwrite_directory() {
    let d = tempdir().unwrap();

    let sample = heartbeat_sample();
    let mut cmd = Command::new(assert_cmd::cargo_bin!("idmef_dump"));
    cmd.args(["-f", &d.path().to_string_lossy(), sample.to_str().unwrap()]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("refusing to overwrite"));
}

#[test]
fn test_it_overwrites_file_anyways_if_passed_flag() {
    let d = tempdir().unwrap();
    let f = d.as_ref().join("test.out");

    let mut file = File::create(&f).unwrap();
    file.write_all(b"I'm a file!").unwrap();

    let sample = tool_alert_sample();
    let mut cmd = Command::new(assert_cmd::cargo_bin!("idmef_dump"));
    cmd.args([
        "-f",
        &f.to_string_lossy(),
        "--no-confirm-overwrite",
        sample.to_str().unwrap(),
    ]);

    cmd.assert().success();

    let written = fs::read_to_string(&f).unwrap();
    assert!(written.starts_with("<?xml"), "Expected the file to be replaced");
    assert!(written.contains("<idmef:ToolAlert>"));
}

#[test]
fn it_dumps_json() {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("idmef_dump"));
    cmd.args(["-o", "json", correlation_alert_sample().to_str().unwrap()]);

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["version"], "1.0");
    assert!(
        String::from_utf8_lossy(&output.stdout).contains("multiple ports in short time"),
        "Expected the correlation name in the JSON output"
    );
}

#[test]
fn it_supports_stdin_input_with_dash() {
    let sample = web_service_sample();

    let mut cmd_file = Command::new(assert_cmd::cargo_bin!("idmef_dump"));
    cmd_file.args(["--no-indent", sample.to_str().unwrap()]);
    let out_file = cmd_file.output().unwrap();
    assert!(
        out_file.status.success(),
        "expected file-input run to succeed"
    );
    assert!(
        !out_file.stdout.is_empty(),
        "expected file-input run to produce output"
    );

    let stdin_file = File::open(&sample).unwrap();
    let mut cmd_stdin = Command::new(assert_cmd::cargo_bin!("idmef_dump"));
    cmd_stdin.args(["--no-indent", "-"]);
    cmd_stdin.stdin(stdin_file);
    let out_stdin = cmd_stdin.output().unwrap();
    assert!(
        out_stdin.status.success(),
        "expected stdin-input run to succeed"
    );
    assert_eq!(
        out_stdin.stdout, out_file.stdout,
        "stdin and file input should produce identical output"
    );
}

#[test]
fn it_applies_tag_names() {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo_bin!("idmef_dump"));
    cmd.args([
        "-t",
        tag_names_sample().to_str().unwrap(),
        "--threads",
        "2",
        "-",
    ]);
    cmd.write_stdin(
        r#"<IDMEF-Message version="1.0"><Heartbeat messageid="hb-7"><idmef:HeartbeatInterval>30</idmef:HeartbeatInterval></Heartbeat></IDMEF-Message>"#,
    );

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"<Heartbeat messageid="hb-7">"#))
        .stdout(predicate::str::contains(
            "<idmef:HeartbeatInterval>30</idmef:HeartbeatInterval>",
        ));
}

#[test]
fn it_fails_on_a_bad_input_but_dumps_the_rest() {
    let d = tempdir().unwrap();
    let bad = d.as_ref().join("bad.xml");
    fs::write(&bad, "<not-idmef/>").unwrap();

    let mut cmd = Command::new(assert_cmd::cargo_bin!("idmef_dump"));
    cmd.args([
        bad.to_str().unwrap(),
        heartbeat_sample().to_str().unwrap(),
    ]);

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("<idmef:Heartbeat"))
        .stderr(predicate::str::contains("bad.xml"))
        .stderr(predicate::str::contains("1 of 2 input(s) failed"));
}
