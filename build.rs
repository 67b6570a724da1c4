//! Embeds the commit hash and build date shown in the simulator banner.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn git_commit() -> String {
    Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    // CI sets these explicitly; local builds ask git and the clock
    let commit = env::var("BUILD_COMMIT").unwrap_or_else(|_| git_commit());
    let date = env::var("BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let dest = Path::new(&out_dir).join("build_info.rs");
    let contents = format!(
        "pub const BUILD_COMMIT: &str = {:?};\npub const BUILD_DATE: &str = {:?};\n",
        commit, date
    );
    fs::write(&dest, contents).expect("failed to write build_info.rs");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=BUILD_DATE");
}
