use assert_cmd::cargo::CommandCargoExt;
use std::process::Command;

#[test]
fn test_seeded_runs_are_byte_identical() {
    let run = || {
        Command::cargo_bin(env!("CARGO_PKG_NAME"))
            .unwrap()
            .args(["--seed", "7", "--max-instr", "80", "--level", "2"])
            .output()
            .expect("failed to run generator")
    };

    let first = run();
    let second = run();

    assert!(first.status.success());
    assert!(!first.stdout.is_empty());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_output_flag_writes_program_file() {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = temp_dir.path().join("prog.s");

    let status = Command::cargo_bin(env!("CARGO_PKG_NAME"))
        .unwrap()
        .args(["--seed", "7", "--max-instr", "80"])
        .arg("--output")
        .arg(&path)
        .status()
        .expect("failed to run generator");

    assert!(status.success());
    let program = std::fs::read_to_string(&path).expect("output file missing");
    assert!(program.starts_with(".text"));
    assert!(program.contains("# --- Subroutines ---"));
    assert!(program.trim_end().ends_with("END_MAIN:"));
}

#[test]
fn test_output_matches_stdout_for_same_seed() {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = temp_dir.path().join("prog.s");

    let stdout_run = Command::cargo_bin(env!("CARGO_PKG_NAME"))
        .unwrap()
        .args(["--seed", "3", "--level", "1"])
        .output()
        .expect("failed to run generator");
    assert!(stdout_run.status.success());

    let file_run = Command::cargo_bin(env!("CARGO_PKG_NAME"))
        .unwrap()
        .args(["--seed", "3", "--level", "1"])
        .arg("--output")
        .arg(&path)
        .status()
        .expect("failed to run generator");
    assert!(file_run.success());

    let from_file = std::fs::read_to_string(&path).expect("output file missing");
    assert_eq!(String::from_utf8_lossy(&stdout_run.stdout), from_file);
}
