//! Commit hash and build date, generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line banner for CLI output, e.g. `lunar_lander 0.1.0 (abc1234, 2026-01-01)`.
pub fn version_line() -> String {
    format!(
        "{} {} ({}, {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    )
}
