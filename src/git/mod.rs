//! Git operations abstraction layer
//!
//! The release resolver and the change classifier only ever need four
//! read-only questions answered by the repository. They are collected in the
//! [Repository] trait so both can run against fixed answers in tests.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! Paths passed to these methods are relative to the repository root and use
//! `/` as separator. An empty path means the whole repository.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Read-only repository queries used by bump-version
///
/// Commit identifiers are full hex object ids.
///
/// ## Error Handling
///
/// Implementations report failures as [crate::error::BumpError]. Callers
/// decide whether a failure is fatal; the analyzers degrade them to defaults
/// through [crate::error::Degrade].
pub trait Repository {
    /// List tag names starting with `prefix`
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Matching tag names, in no particular order
    /// * `Err` - If the tags cannot be read
    fn list_tags(&self, prefix: &str) -> Result<Vec<String>>;

    /// Resolve a tag to the commit it points at
    ///
    /// Handles both lightweight and annotated tags.
    ///
    /// # Returns
    /// * `Ok(Some(id))` - Commit the tag points at
    /// * `Ok(None)` - If the tag doesn't exist
    /// * `Err` - If there's a Git error
    fn resolve_tag(&self, tag_name: &str) -> Result<Option<String>>;

    /// Find the most recent commit reachable from HEAD that modified `path`
    ///
    /// # Returns
    /// * `Ok(Some(id))` - The newest commit touching `path`
    /// * `Ok(None)` - If no commit ever touched it
    /// * `Err` - If history cannot be walked
    fn last_commit_touching(&self, path: &str) -> Result<Option<String>>;

    /// Full messages of commits touching `path`, newest first, as one blob
    ///
    /// With `since` set only commits after it (exclusive) up to HEAD are
    /// included, otherwise the whole history is. Returns an empty string when
    /// no commit matches.
    fn commit_messages(&self, path: &str, since: Option<&str>) -> Result<String>;
}
