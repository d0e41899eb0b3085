use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    for watched in ["build.rs", ".git/HEAD", ".git/refs"] {
        println!("cargo:rerun-if-changed={watched}");
    }

    let git_hash = command_stdout("git", &["rev-parse", "--short", "HEAD"])
        .unwrap_or_else(|| UNKNOWN.to_string());
    let git_status = command_stdout_raw("git", &["status", "--porcelain"])
        .map(|status| if status.trim().is_empty() { "clean" } else { "dirty" })
        .unwrap_or(UNKNOWN)
        .to_string();
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let rustc = command_stdout("rustc", &["--version"]).unwrap_or_else(|| UNKNOWN.to_string());

    let metadata = [
        ("HASH", git_hash),
        ("STATUS", git_status),
        ("TIMESTAMP", timestamp),
        ("TARGET", env::var("TARGET").unwrap_or_else(|_| UNKNOWN.into())),
        ("PROFILE", env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.into())),
        ("RUSTC", rustc),
    ];
    for (key, value) in metadata {
        println!("cargo:rustc-env=BILLDESK_BUILD_{key}={value}");
    }
}

/// Trimmed, non-empty stdout of a successful command.
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    command_stdout_raw(program, args)
        .map(|out| out.trim().to_string())
        .filter(|out| !out.is_empty())
}

fn command_stdout_raw(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}
