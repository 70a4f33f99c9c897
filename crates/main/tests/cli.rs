use std::fs;
use std::process::Command;

fn kyc_pdf() -> Command {
    Command::new(env!("CARGO_BIN_EXE_kyc-pdf"))
}

#[test]
fn missing_arguments_print_usage_and_exit_1() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = kyc_pdf()
        .current_dir(dir.path())
        .output()
        .expect("run kyc-pdf");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr was: {stderr}");
    assert!(output.stdout.is_empty());
    assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

#[test]
fn missing_output_argument_is_a_usage_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("payload.json");
    fs::write(&input, "{}").expect("write payload");

    let output = kyc_pdf().arg(&input).output().expect("run kyc-pdf");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn help_exits_successfully() {
    let output = kyc_pdf().arg("--help").output().expect("run kyc-pdf");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--language"));
}

#[test]
fn invalid_json_reports_error_chain_without_output() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("payload.json");
    let pdf = dir.path().join("out.pdf");
    fs::write(&input, "{not json").expect("write payload");

    let output = kyc_pdf().arg(&input).arg(&pdf).output().expect("run kyc-pdf");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: failed to parse payload"), "stderr was: {stderr}");
    assert!(stderr.contains("caused by:"), "stderr was: {stderr}");
    assert!(!pdf.exists());
}

#[test]
fn missing_input_file_is_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let pdf = dir.path().join("out.pdf");

    let output = kyc_pdf()
        .arg(dir.path().join("missing.json"))
        .arg(&pdf)
        .output()
        .expect("run kyc-pdf");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read payload"));
    assert!(!pdf.exists());
}
