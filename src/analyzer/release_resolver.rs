use crate::boundary::BoundaryWarning;
use crate::domain::version::parse_semver;
use crate::domain::{ReleasePoint, ReleaseStrategy, TagPrefix, Version};
use crate::error::{Degrade, Result};
use crate::git::Repository;

/// Locate the last release for the given strategy
///
/// Repository query failures degrade to "nothing released" (0.0.0, no
/// commit). In file mode the version itself comes from the file, and a file
/// that cannot be read or parsed is an error.
pub fn resolve<R: Repository + ?Sized>(
    repo: &R,
    strategy: &ReleaseStrategy,
) -> Result<ReleasePoint> {
    match strategy {
        ReleaseStrategy::Tag(prefix) => Ok(resolve_from_tags(repo, prefix)),
        ReleaseStrategy::File { file, repo_path } => {
            let version = file.read_version()?;
            let commit = repo
                .last_commit_touching(repo_path)
                .or_degraded("find last commit touching version file");
            if commit.is_none() {
                report(BoundaryWarning::NoPriorRelease {
                    marker: repo_path.clone(),
                });
            }
            Ok(ReleasePoint::new(version, commit))
        }
    }
}

/// Latest tag carrying `prefix` and the commit it points at
pub fn resolve_from_tags<R: Repository + ?Sized>(repo: &R, prefix: &TagPrefix) -> ReleasePoint {
    let Some((tag, version)) = latest_tag(repo, prefix) else {
        report(BoundaryWarning::NoPriorRelease {
            marker: prefix.prefix.clone(),
        });
        return ReleasePoint::initial();
    };

    let commit = repo.resolve_tag(&tag).or_degraded("resolve tag to commit");
    tracing::debug!(%tag, commit = commit.as_deref().unwrap_or(""), "latest release tag");
    ReleasePoint::new(Version::from(&version), commit)
}

/// Highest version among tags carrying `prefix`, by semver precedence
///
/// Tags whose remainder is not a version are skipped.
pub fn latest_tag<R: Repository + ?Sized>(
    repo: &R,
    prefix: &TagPrefix,
) -> Option<(String, semver::Version)> {
    let tags = repo.list_tags(&prefix.prefix).or_degraded("list tags");

    tags.into_iter()
        .filter_map(|tag| {
            let part = prefix.version_part(&tag)?;
            match parse_semver(part) {
                Ok(version) => Some((tag, version)),
                Err(e) => {
                    let warning = BoundaryWarning::UnparsableTag {
                        tag: tag.clone(),
                        reason: e.to_string(),
                    };
                    tracing::debug!(%warning, "skipping tag");
                    None
                }
            }
        })
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
}

fn report(warning: BoundaryWarning) {
    tracing::info!(%warning);
}
