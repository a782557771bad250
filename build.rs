//! Stamps the build with the values shown in the app footer and startup log.
//!
//! - `FITZ_VERSION`: release name, or the crate version
//! - `FITZ_GIT_SHA`: short commit, from the environment (CI) or `git`

use std::env;
use std::process::Command;

const SHORT_SHA_LEN: usize = 7;

/// Overrides that change the stamped values
const WATCHED_ENV: &[&str] = &["FITZ_VERSION", "FITZ_GIT_SHA", "GITHUB_SHA"];

fn main() {
    let version = env::var("FITZ_VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| "dev".to_string());

    let git_sha = env::var("FITZ_GIT_SHA")
        .ok()
        .or_else(|| env::var("GITHUB_SHA").ok().map(|sha| short(&sha)))
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=FITZ_VERSION={version}");
    println!("cargo:rustc-env=FITZ_GIT_SHA={git_sha}");

    for var in WATCHED_ENV {
        println!("cargo:rerun-if-env-changed={var}");
    }
}

fn short(sha: &str) -> String {
    sha.trim().chars().take(SHORT_SHA_LEN).collect()
}

fn git_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let sha = String::from_utf8(output.stdout).ok()?;
    Some(short(&sha)).filter(|s| !s.is_empty())
}
