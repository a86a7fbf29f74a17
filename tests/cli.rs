use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn log_analysis() -> Command {
    Command::new(env!("CARGO_BIN_EXE_log_analysis"))
}

fn temp_log(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp log file");
    file.write_all(content)
        .expect("Failed to write temp log file");
    file
}

#[test]
fn single_argument_prints_usage_and_exits_nonzero() {
    let output = log_analysis().arg("onearg").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Usage:"),
        "expected usage text on stderr: {}",
        stderr
    );
}

#[test]
fn extra_arguments_print_usage_and_exit_nonzero() {
    let output = log_analysis()
        .args(["one", "two", "three"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}

#[test]
fn argument_errors_produce_no_output_files() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("out");

    let output = log_analysis()
        .arg(out_dir.to_str().unwrap())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(!out_dir.exists());
}

#[test]
fn second_argument_that_is_a_file_is_rejected() {
    let log = temp_log(b"");
    let not_a_dir = temp_log(b"occupied");

    let output = log_analysis()
        .args([log.path(), not_a_dir.path()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("is not a directory"));
}

#[test]
fn no_testdata_flag_skips_export_entirely() {
    let log = temp_log(
        b"\
2011-01-01 00:00:00,001 INFO  jcrew.JCrewParser - Start parsing: http://x/a
2011-01-01 00:00:00,002 INFO  jcrew.JCrewParser - Started parsing title for JCrew Product Item
2011-01-01 00:00:00,003 WARN  jcrew.JCrewParser - price is null
2011-01-01 00:00:00,004 INFO  jcrew.JCrewParser - Finished parsing
",
    );
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("out");

    let output = log_analysis()
        .arg(log.path())
        .arg(&out_dir)
        .arg("-n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Skip test data generation"));
    assert!(stdout.contains("found problem: http://x/a"));
    // Export never ran, so the directory was never created.
    assert!(!out_dir.exists());
}

#[test]
fn missing_log_file_exits_nonzero() {
    let dir = TempDir::new().unwrap();

    let output = log_analysis()
        .args(["does/not/exist.log", dir.path().to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}
