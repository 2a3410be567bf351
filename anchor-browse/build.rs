//! Build identification for the anchor-browse startup line
//!
//! Emits `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE`. The timestamp
//! honours `SOURCE_DATE_EPOCH` so packaged builds are reproducible.

use chrono::{DateTime, SecondsFormat, Utc};
use std::process::Command;

fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let described = String::from_utf8(output.stdout).ok()?;
    Some(described.trim().to_string()).filter(|s| !s.is_empty())
}

fn build_time() -> DateTime<Utc> {
    std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}

fn main() {
    let git_hash = git_describe().unwrap_or_else(|| "unknown".to_string());
    let timestamp = build_time().to_rfc3339_opts(SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    for (key, value) in [
        ("GIT_HASH", git_hash.as_str()),
        ("BUILD_TIMESTAMP", timestamp.as_str()),
        ("BUILD_PROFILE", profile.as_str()),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../.git/HEAD");
}
