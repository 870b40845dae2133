use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::{BumpError, Result};

/// Append-only `key=value` file handed to us by the CI runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiOutput {
    pub path: PathBuf,
}

impl CiOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CiOutput { path: path.into() }
    }

    /// Look up the output file named by environment variable `var`
    ///
    /// Returns `None` outside CI, i.e. when the variable is unset or empty.
    pub fn from_env(var: &str) -> Option<Self> {
        match env::var_os(var) {
            Some(path) if !path.is_empty() => Some(CiOutput::new(path)),
            _ => None,
        }
    }

    /// Record a bump: `new_version`, `new_tag` (tag mode only) and `bumped=true`
    ///
    /// The file is opened for appending and must already exist.
    pub fn write_bump(&self, new_version: &str, new_tag: Option<&str>) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                BumpError::ci_output(format!("Cannot open {}: {}", self.path.display(), e))
            })?;

        let mut lines = format!("new_version={}\n", new_version);
        if let Some(tag) = new_tag {
            lines.push_str(&format!("new_tag={}\n", tag));
        }
        lines.push_str("bumped=true\n");

        file.write_all(lines.as_bytes()).map_err(|e| {
            BumpError::ci_output(format!("Cannot write {}: {}", self.path.display(), e))
        })?;
        tracing::debug!(path = %self.path.display(), "CI outputs appended");
        Ok(())
    }
}
