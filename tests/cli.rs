#![cfg(feature = "cli")]

use std::path::Path;
use std::process::{Command, Output};

fn ratiofit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ratiofit"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn ratiofit")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected success\nstdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
}

fn write_config(dir: &Path, text: &str) -> String {
    let path = dir.join("ratiofit.toml");
    std::fs::write(&path, text).expect("write config");
    path.to_string_lossy().into_owned()
}

// ── fit ─────────────────────────────────────────────────────────────────

#[test]
fn cli_fit_ratio() {
    let output = ratiofit(&["fit", "1216", "896", "--ratio", "16:9"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("1,216 × 896  (1,089,536 px)"), "{out}");
    assert!(out.contains("base ratio   1.357 (19:14)"), "{out}");
    assert!(out.contains("ratio        1.778 (16:9)"), "{out}");
    assert!(out.contains("1,376 × 784  (1,078,784 px, 99.0% of budget)"), "{out}");
    assert!(out.contains("target ratio 1.755 (86:49)"), "{out}");
    assert!(out.contains("preview      220 × 125"), "{out}");
}

#[test]
fn cli_fit_defaults_to_base_ratio() {
    let output = ratiofit(&["fit", "1216", "896"]);
    assert_success(&output);
    assert!(stdout(&output).contains("target       1,216 × 896"));
}

#[test]
fn cli_fit_preset() {
    let output = ratiofit(&["fit", "1216", "896", "--preset", "16:9"]);
    assert_success(&output);
    assert!(stdout(&output).contains("1,376 × 784"));
}

#[test]
fn cli_fit_unknown_preset_fails() {
    let output = ratiofit(&["fit", "1216", "896", "--preset", "nope"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown preset \"nope\""), "{}", stderr(&output));
}

#[test]
fn cli_fit_invalid_ratio_fails() {
    let output = ratiofit(&["fit", "1216", "896", "--ratio", "16:0"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid --ratio"), "{}", stderr(&output));
}

#[test]
fn cli_fit_rejects_zero_step() {
    let output = ratiofit(&["fit", "1216", "896", "--step", "0", "--ratio", "16:9"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn cli_fit_legacy() {
    let output = ratiofit(&["fit", "1216", "896", "--ratio", "16:9", "--legacy"]);
    assert_success(&output);
    assert!(stdout(&output).contains("1,390 × 782"));
}

#[test]
fn cli_fit_writes_svg() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fit.svg");
    let output = ratiofit(&[
        "fit",
        "1216",
        "896",
        "--ratio",
        "16:9",
        "--svg",
        path.to_str().expect("utf-8 path"),
    ]);
    assert_success(&output);
    let svg = std::fs::read_to_string(&path).expect("read svg");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Target  1376×784"));
}

#[test]
fn cli_fit_invalid_base_reports_zero_target() {
    let output = ratiofit(&["fit", "abc", "896"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("range        disabled"), "{out}");
    assert!(out.contains("target       0 × 0"), "{out}");
}

// ── simplify / approx / range / presets ────────────────────────────────

#[test]
fn cli_simplify() {
    let output = ratiofit(&["simplify", "1920", "1080"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "1.778 (16:9)");
}

#[test]
fn cli_approx() {
    let output = ratiofit(&["approx", "1.777"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "1.777 (16:9)");

    let output = ratiofit(&["approx", "3.14159265", "--max-denominator", "10"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "3.142 (22:7)");
}

#[test]
fn cli_approx_out_of_range_value_has_no_label() {
    let output = ratiofit(&["approx", "1e30"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "0");

    let output = ratiofit(&["approx", "-2"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "0");
}

#[test]
fn cli_range() {
    let output = ratiofit(&["range", "1216", "896"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.starts_with("min 0.339286  max 5.428571"), "{out}");
}

#[test]
fn cli_range_invalid_base_is_disabled() {
    let output = ratiofit(&["range", "0", "896"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "disabled");
}

#[test]
fn cli_presets_lists_builtins() {
    let output = ratiofit(&["presets"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.lines().any(|l| l.starts_with("16:9 ")), "{out}");
    assert_eq!(out.lines().count(), 11);
}

// ── config ──────────────────────────────────────────────────────────────

#[test]
fn cli_config_adds_presets() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(
        dir.path(),
        "[[presets]]\nlabel = \"cinema\"\nratio = \"2.39\"\n",
    );
    let output = ratiofit(&["--config", &config, "presets"]);
    assert_success(&output);
    assert!(stdout(&output).contains("cinema"));

    let output = ratiofit(&["--config", &config, "fit", "1216", "896", "--preset", "Cinema"]);
    assert_success(&output);
    assert!(stdout(&output).contains("ratio        2.390"));
}

#[test]
fn cli_config_changes_step() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), "[fit]\nstep = 8\n");
    let output = ratiofit(&["--config", &config, "config"]);
    assert_success(&output);
    assert!(stdout(&output).contains("step = 8"));
}

#[test]
fn cli_bad_config_fails() {
    let dir = tempfile::tempdir().expect("tempdir");

    let config = write_config(dir.path(), "[fit]\nstep = 0\n");
    let output = ratiofit(&["--config", &config, "presets"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("fit.step must be non-zero"), "{}", stderr(&output));

    let config = write_config(dir.path(), "[fit\n");
    let output = ratiofit(&["--config", &config, "presets"]);
    assert!(!output.status.success());

    let missing = dir.path().join("missing.toml");
    let output = ratiofit(&["--config", missing.to_str().expect("utf-8 path"), "presets"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read config"), "{}", stderr(&output));
}
