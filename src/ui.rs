//! Console output for the user.
//!
//! Progress lines go to stdout, errors to stderr. Diagnostics
//! that only matter when debugging go through `tracing` instead.

use console::style;

use crate::domain::{BumpType, ReleasePoint};

pub const USAGE: &str = "Usage: bump-version --path <path> [--tag-prefix <prefix>] [--file <file> --type <text|json>] [--dry-run] [--prerelease-suffix <suffix>]";

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_usage() {
    println!("{}", USAGE);
}

/// Show the release point the bump starts from.
///
/// # Arguments
/// * `marker` - Tag prefix or version file the release was found through
/// * `release` - Resolved release point
pub fn display_release_point(marker: &str, release: &ReleasePoint) {
    println!(
        "Latest version for {}: {} (Commit: {})",
        style(marker).bold(),
        release.version,
        release.commit.as_deref().unwrap_or("")
    );
}

pub fn display_no_change() {
    println!("No changes requiring version bump.");
}

pub fn display_detected(bump: BumpType) {
    println!("Detected {} change.", style(bump).cyan());
}

/// Display the version transition, e.g. "1.1.0 -> 1.2.0".
pub fn display_version_change(old: &str, new: &str) {
    println!(
        "Bumping version: {} -> {}",
        style(old).red(),
        style(new).green()
    );
}
