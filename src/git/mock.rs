use crate::error::{BumpError, Result};
use crate::git::Repository;
use std::collections::HashMap;

/// A commit in the mock history
#[derive(Debug, Clone, PartialEq)]
pub struct MockCommit {
    pub id: String,
    pub message: String,
    /// Files changed by this commit, repository-relative
    pub paths: Vec<String>,
}

/// Mock repository for testing without actual git operations
///
/// History is linear; commits are added oldest first and HEAD is the last one.
pub struct MockRepository {
    commits: Vec<MockCommit>,
    tags: HashMap<String, String>,
    failing: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: HashMap::new(),
            failing: false,
        }
    }

    /// A repository whose every query fails
    pub fn failing() -> Self {
        MockRepository {
            failing: true,
            ..Self::new()
        }
    }

    /// Append a commit on top of the current HEAD
    pub fn add_commit(&mut self, id: impl Into<String>, message: impl Into<String>, paths: &[&str]) {
        self.commits.push(MockCommit {
            id: id.into(),
            message: message.into(),
            paths: paths.iter().map(|p| p.to_string()).collect(),
        });
    }

    /// Add a tag pointing to a commit id
    pub fn add_tag(&mut self, name: impl Into<String>, commit_id: impl Into<String>) {
        self.tags.insert(name.into(), commit_id.into());
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            Err(BumpError::config("mock repository query failed"))
        } else {
            Ok(())
        }
    }

    fn newest_first(&self) -> impl Iterator<Item = &MockCommit> {
        self.commits.iter().rev()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn touches(commit: &MockCommit, path: &str) -> bool {
    let path = path.trim_end_matches('/');
    path.is_empty()
        || path == "."
        || commit
            .paths
            .iter()
            .any(|p| p == path || p.starts_with(&format!("{}/", path)))
}

impl Repository for MockRepository {
    fn list_tags(&self, prefix: &str) -> Result<Vec<String>> {
        self.check()?;
        Ok(self
            .tags
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn resolve_tag(&self, tag_name: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.tags.get(tag_name).cloned())
    }

    fn last_commit_touching(&self, path: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self
            .newest_first()
            .find(|c| touches(c, path))
            .map(|c| c.id.clone()))
    }

    fn commit_messages(&self, path: &str, since: Option<&str>) -> Result<String> {
        self.check()?;
        let messages: Vec<&str> = self
            .newest_first()
            .take_while(|c| Some(c.id.as_str()) != since)
            .filter(|c| touches(c, path))
            .map(|c| c.message.as_str())
            .collect();
        Ok(messages.join("\n"))
    }
}
