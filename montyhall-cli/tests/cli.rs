use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "montyhall-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_single_run_prints_rates_and_verdict() {
    let exe = env!("CARGO_BIN_EXE_montyhall");
    let output_path = temp_path("single");
    let status = Command::new(exe)
        .args(["1", "3", "1", "2000", "--seed", "42", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Average switch win rate"));
    assert!(content.contains("Average stay win rate"));
    assert!(content.contains("Converged"));
}

#[test]
fn cli_sweep_reports_convergent_total() {
    let exe = env!("CARGO_BIN_EXE_montyhall");
    let output_path = temp_path("sweep");
    let status = Command::new(exe)
        .args(["-m", "3", "12", "4", "6", "--seed", "7", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Total convergent configurations"));
}

#[test]
fn cli_same_seed_gives_same_csv() {
    let exe = env!("CARGO_BIN_EXE_montyhall");
    let run = |label: &str| {
        let path = temp_path(label);
        let status = Command::new(exe)
            .args(["2", "7", "2", "500", "--seed", "0xFEED", "--report", "csv", "--output"])
            .arg(&path)
            .status()
            .expect("run cli");
        assert!(status.success());
        std::fs::read_to_string(path).expect("read output")
    };
    assert_eq!(run("replay-a"), run("replay-b"));
}

#[test]
fn cli_illegal_configuration_exits_with_diagnostic() {
    let exe = env!("CARGO_BIN_EXE_montyhall");
    let output = Command::new(exe)
        .args(["3", "3", "0", "100", "--seed", "1"])
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration k=3 m=3 n=0"));
    assert!(!stderr.contains("panicked"));
}

#[test]
fn cli_too_few_trials_exits_with_diagnostic() {
    let exe = env!("CARGO_BIN_EXE_montyhall");
    let output = Command::new(exe)
        .args(["1", "3", "1", "5"])
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("insufficient data"));
}
