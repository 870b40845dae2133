//! Main workflow orchestration logic
//!
//! Runs the whole pipeline once: resolve the release point, classify the
//! commits since then, compute the next version and hand it to the sinks.
//! Argument parsing stays in main.rs so the workflow can be driven
//! programmatically and against a mock repository.

use crate::analyzer::{self, ChangeClassifier};
use crate::ci_output::CiOutput;
use crate::domain::{BumpType, ReleasePoint, ReleaseStrategy};
use crate::error::Result;
use crate::git::Repository;
use crate::ui;
use crate::version_file::VersionFile;

/// Arguments for the bump workflow
///
/// Mirrors the CLI Args after paths have been made repository-relative.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// Repository-relative path whose history decides the bump
    pub path: String,

    /// How the last release is located
    pub strategy: ReleaseStrategy,

    /// File to write the new version into
    pub target: Option<VersionFile>,

    /// Compute and report only, leave the target file alone
    pub dry_run: bool,

    /// Appended verbatim to the new version
    pub prerelease_suffix: Option<String>,

    /// Where CI outputs go, when running under CI
    pub ci_output: Option<CiOutput>,
}

/// Result of a bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Release point the bump started from
    pub release: ReleasePoint,

    /// Severity found in the commit history
    pub bump: BumpType,

    /// Next version, `None` when no bump was needed
    pub new_version: Option<String>,

    /// Next tag name, tag mode only
    pub new_tag: Option<String>,

    /// Whether the target file was rewritten
    pub file_written: bool,

    /// Whether CI outputs were appended
    pub ci_written: bool,
}

/// Main bump workflow
///
/// 1. Check the target file exists
/// 2. Resolve the release point
/// 3. Classify commits touching the path since then
/// 4. Compute the next version (and tag in tag mode)
/// 5. Write the target file unless dry run
/// 6. Append CI outputs when running under CI
///
/// When no bump is needed nothing is written and the result carries
/// `BumpType::None`.
pub fn run_bump_workflow<R: Repository + ?Sized>(
    repo: &R,
    classifier: &ChangeClassifier,
    args: &BumpWorkflowArgs,
) -> Result<WorkflowResult> {
    if let Some(target) = &args.target {
        target.ensure_exists()?;
    }

    let release = analyzer::resolve(repo, &args.strategy)?;
    ui::display_release_point(&args.strategy.marker(), &release);

    let bump = classifier.classify(repo, &args.path, &release);
    if bump == BumpType::None {
        ui::display_no_change();
        return Ok(WorkflowResult {
            release,
            bump,
            new_version: None,
            new_tag: None,
            file_written: false,
            ci_written: false,
        });
    }
    ui::display_detected(bump);

    let next = release
        .version
        .bump(bump)?
        .with_suffix(args.prerelease_suffix.as_deref());
    let new_version = next.to_string();
    let new_tag = args.strategy.tag_prefix().map(|prefix| prefix.format(&next));
    ui::display_version_change(&release.version.to_string(), &new_version);

    let mut file_written = false;
    if let Some(target) = &args.target {
        if args.dry_run {
            ui::display_status(&format!(
                "Dry run: would write {} to {}",
                new_version,
                target.path.display()
            ));
        } else {
            target.write_version(&new_version)?;
            file_written = true;
            ui::display_success(&format!(
                "Updated {} ({})",
                target.path.display(),
                target.format
            ));
        }
    }

    let mut ci_written = false;
    if let Some(output) = &args.ci_output {
        output.write_bump(&new_version, new_tag.as_deref())?;
        ci_written = true;
    }

    Ok(WorkflowResult {
        release,
        bump,
        new_version: Some(new_version),
        new_tag,
        file_written,
        ci_written,
    })
}
