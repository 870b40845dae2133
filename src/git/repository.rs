use crate::error::{BumpError, Result};
use git2::{Commit, DiffOptions, Oid, Repository as Git2Repo, Sort, Tree};
use std::path::{Component, Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Convert a filesystem path into a repository-relative pathspec
    ///
    /// Relative paths are taken relative to `base` (usually the current
    /// directory). The repository root itself maps to the empty string.
    pub fn repo_relative(&self, path: &Path, base: &Path) -> Result<String> {
        let workdir = self
            .repo
            .workdir()
            .ok_or_else(|| BumpError::config("Repository has no working directory"))?;

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        };
        let absolute = absolute
            .canonicalize()
            .unwrap_or_else(|_| normalize(&absolute));
        let workdir = workdir
            .canonicalize()
            .unwrap_or_else(|_| normalize(workdir));

        let relative = absolute.strip_prefix(&workdir).map_err(|_| {
            BumpError::config(format!(
                "Path {} is outside the repository at {}",
                path.display(),
                workdir.display()
            ))
        })?;

        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Ok(parts.join("/"))
    }

    fn head_walk(&self) -> Result<git2::Revwalk<'_>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;
        Ok(revwalk)
    }

    /// Whether `commit` changed anything under `path`
    ///
    /// A merge counts only if it differs from every parent, which mirrors
    /// the default history simplification of `git log -- <path>`.
    fn touches(&self, commit: &Commit<'_>, path: &str) -> Result<bool> {
        if path.is_empty() {
            return Ok(true);
        }

        let tree = commit.tree()?;
        if commit.parent_count() == 0 {
            return self.has_changes(None, &tree, path);
        }

        for parent in commit.parents() {
            let parent_tree = parent.tree()?;
            if !self.has_changes(Some(&parent_tree), &tree, path)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn has_changes(&self, old: Option<&Tree<'_>>, new: &Tree<'_>, path: &str) -> Result<bool> {
        let mut opts = DiffOptions::new();
        opts.pathspec(path);
        let diff = self.repo.diff_tree_to_tree(old, Some(new), Some(&mut opts))?;
        Ok(diff.deltas().len() > 0)
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self, prefix: &str) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags
            .iter()
            .flatten()
            .filter(|name| name.starts_with(prefix))
            .map(|s| s.to_string())
            .collect())
    }

    fn resolve_tag(&self, tag_name: &str) -> Result<Option<String>> {
        let reference_name = format!("refs/tags/{}", tag_name);

        match self.repo.find_reference(&reference_name) {
            Ok(reference) => {
                let commit = reference.peel_to_commit()?;
                Ok(Some(commit.id().to_string()))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn last_commit_touching(&self, path: &str) -> Result<Option<String>> {
        let path = clean_pathspec(path);

        for oid in self.head_walk()? {
            let commit = self.repo.find_commit(oid?)?;
            if self.touches(&commit, &path)? {
                return Ok(Some(commit.id().to_string()));
            }
        }
        Ok(None)
    }

    fn commit_messages(&self, path: &str, since: Option<&str>) -> Result<String> {
        let path = clean_pathspec(path);
        let mut revwalk = self.head_walk()?;
        if let Some(since) = since {
            revwalk.hide(Oid::from_str(since)?)?;
        }

        let mut messages = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            if self.touches(&commit, &path)? {
                messages.push(String::from_utf8_lossy(commit.message_bytes()).into_owned());
            }
        }

        tracing::debug!(
            path = %path,
            since = since.unwrap_or("<root>"),
            commits = messages.len(),
            "collected commit messages"
        );
        Ok(messages.join("\n").trim().to_string())
    }
}

/// Strip "./" prefixes and trailing slashes; "." becomes the empty pathspec.
fn clean_pathspec(path: &str) -> String {
    let mut cleaned = path.trim();
    while let Some(rest) = cleaned.strip_prefix("./") {
        cleaned = rest;
    }
    let cleaned = cleaned.trim_end_matches('/');
    if cleaned == "." {
        String::new()
    } else {
        cleaned.to_string()
    }
}

/// Lexically resolve "." and ".." for paths that do not exist yet
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
