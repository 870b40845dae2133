use crate::config::ClassifierConfig;
use crate::domain::{BumpType, ReleasePoint};
use crate::error::{BumpError, Degrade, Result};
use crate::git::Repository;
use regex::Regex;

/// Classifies the commits since a release point as a single bump type
///
/// Checks run against the whole message blob in fixed priority order:
/// a breaking-change marker anywhere wins, then a line starting with a
/// feature type, then a line starting with a fix type.
#[derive(Debug, Clone)]
pub struct ChangeClassifier {
    breaking_change_markers: Vec<String>,
    minor_line: Option<Regex>,
    patch_line: Option<Regex>,
}

impl ChangeClassifier {
    /// Build a classifier from configuration
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        Ok(ChangeClassifier {
            breaking_change_markers: config
                .breaking_change_markers
                .iter()
                .filter(|m| !m.is_empty())
                .cloned()
                .collect(),
            minor_line: type_line_regex(&config.minor_types)?,
            patch_line: type_line_regex(&config.patch_types)?,
        })
    }

    /// Classify the commits touching `path` since `release`
    ///
    /// A failed log query is treated as "no commits".
    pub fn classify<R: Repository + ?Sized>(
        &self,
        repo: &R,
        path: &str,
        release: &ReleasePoint,
    ) -> BumpType {
        let messages = repo
            .commit_messages(path, release.commit.as_deref())
            .or_degraded("read commit log");
        self.classify_messages(&messages)
    }

    /// Classify a blob of concatenated commit messages
    pub fn classify_messages(&self, messages: &str) -> BumpType {
        if messages.trim().is_empty() {
            return BumpType::None;
        }

        if self
            .breaking_change_markers
            .iter()
            .any(|marker| messages.contains(marker.as_str()))
        {
            return BumpType::Major;
        }

        if matches_line(&self.minor_line, messages) {
            return BumpType::Minor;
        }

        if matches_line(&self.patch_line, messages) {
            return BumpType::Patch;
        }

        BumpType::None
    }
}

fn matches_line(re: &Option<Regex>, messages: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(messages))
}

/// `^(?:feat|...)(\(scope\))?:` anchored at every line start
fn type_line_regex(types: &[String]) -> Result<Option<Regex>> {
    let alternatives: Vec<String> = types
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| regex::escape(t))
        .collect();
    if alternatives.is_empty() {
        return Ok(None);
    }

    let pattern = format!(r"(?m)^(?:{})(\(.*\))?:", alternatives.join("|"));
    Regex::new(&pattern)
        .map(Some)
        .map_err(|e| BumpError::config(format!("Invalid commit type pattern: {}", e)))
}
