use crate::domain::tag::TagPrefix;
use crate::domain::version::Version;
use crate::version_file::VersionFile;

/// Last released version and the commit it was released at
///
/// `commit` is `None` when nothing was released yet; the classifier then
/// scans the full history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleasePoint {
    pub version: Version,
    pub commit: Option<String>,
}

impl ReleasePoint {
    pub fn new(version: Version, commit: Option<String>) -> Self {
        ReleasePoint { version, commit }
    }

    /// Nothing released yet: 0.0.0 with no commit
    pub fn initial() -> Self {
        Self::default()
    }
}

/// How the last release is located
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseStrategy {
    /// Latest tag carrying the prefix
    Tag(TagPrefix),
    /// Last commit that modified the version file
    File {
        file: VersionFile,
        /// Path of `file` relative to the repository root
        repo_path: String,
    },
}

impl ReleaseStrategy {
    /// Tag prefix when running in tag mode
    pub fn tag_prefix(&self) -> Option<&TagPrefix> {
        match self {
            ReleaseStrategy::Tag(prefix) => Some(prefix),
            ReleaseStrategy::File { .. } => None,
        }
    }

    /// Human readable name of the release marker
    pub fn marker(&self) -> String {
        match self {
            ReleaseStrategy::Tag(prefix) => prefix.prefix.clone(),
            ReleaseStrategy::File { file, .. } => file.path.display().to_string(),
        }
    }
}
