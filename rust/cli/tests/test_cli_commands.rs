mod helpers;

use helpers::{EnvGuard, run_cli};
use serial_test::serial;

#[test]
fn help_goes_to_stdout_with_success() {
    let res = run_cli(&["--help"], "");
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("play"));
    assert!(res.stdout.contains("sim"));
    assert!(res.stdout.contains("cfg"));
    assert!(res.stderr.is_empty());
}

#[test]
fn unknown_command_lists_available_ones() {
    let res = run_cli(&["deal"], "");
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Usage: cincuentazo <command> [options]"));
    for cmd in ["play", "sim", "cfg"] {
        assert!(res.stderr.contains(&format!("  {}", cmd)));
    }
    assert!(res.stdout.is_empty());
}

#[test]
fn malformed_think_range_is_a_usage_error() {
    let res = run_cli(&["play", "--think-ms", "900-100"], "");
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("exceeds maximum"));
}

#[test]
#[serial]
fn cfg_reports_defaults_with_sources() {
    let _env = EnvGuard::clean(&[]);
    let res = run_cli(&["cfg"], "");
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);

    let json: serde_json::Value = serde_json::from_str(&res.stdout).expect("cfg prints JSON");
    assert_eq!(json["machines"]["value"], 1);
    assert_eq!(json["machines"]["source"], "default");
    assert!(json["seed"]["value"].is_null());
    assert_eq!(json["strategy"]["value"], "first-legal");
    assert_eq!(json["poll_interval_ms"]["value"], 1000);
    assert_eq!(json["think_min_ms"]["value"], 2000);
    assert_eq!(json["think_max_ms"]["value"], 4000);
}

#[test]
#[serial]
fn cfg_with_invalid_environment_fails() {
    let _env = EnvGuard::clean(&[("CINCUENTAZO_MACHINES", "many")]);
    let res = run_cli(&["cfg"], "");
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid machines in CINCUENTAZO_MACHINES"));
    assert!(res.stdout.is_empty());
}

#[test]
#[serial]
fn verbose_runs_twice_in_one_process() {
    let _env = EnvGuard::clean(&[]);
    for _ in 0..2 {
        let res = run_cli(&["--verbose", "cfg"], "");
        assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
        assert!(res.stdout.contains("\"machines\""));
    }
}
