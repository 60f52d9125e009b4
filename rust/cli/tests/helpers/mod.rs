#![allow(dead_code)]

use std::io::Cursor;

pub const CONFIG_VARS: &[&str] = &[
    "CINCUENTAZO_CONFIG",
    "CINCUENTAZO_MACHINES",
    "CINCUENTAZO_SEED",
    "CINCUENTAZO_STRATEGY",
    "CINCUENTAZO_POLL_MS",
    "CINCUENTAZO_THINK_MIN_MS",
    "CINCUENTAZO_THINK_MAX_MS",
    "CINCUENTAZO_SIM_BREAK_AFTER",
];

#[derive(Debug)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the CLI in-process with `input` as the human's commands.
pub fn run_cli(args: &[&str], input: &str) -> CliResult {
    let mut argv = vec!["cincuentazo"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let exit_code = cincuentazo_cli::run_with_input(argv, &mut out, &mut err, &mut stdin);
    CliResult {
        exit_code,
        stdout: String::from_utf8(out).expect("stdout is utf-8"),
        stderr: String::from_utf8(err).expect("stderr is utf-8"),
    }
}

/// Sets environment variables for the lifetime of the guard and restores
/// the previous values on drop. Tests using it must be `#[serial]`.
#[derive(Debug)]
pub struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    /// Clears every configuration variable, then applies `pairs`.
    pub fn clean(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for key in CONFIG_VARS {
            restores.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
        for (key, value) in pairs {
            unsafe {
                std::env::set_var(key, value);
            }
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            match previous {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

/// Flags that take the pacing out of a match.
pub const FAST: &[&str] = &["--poll-ms", "1", "--think-ms", "0"];
