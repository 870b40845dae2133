//! Reading and writing the file that records a component's version.
//!
//! Two formats exist. A text file holds nothing but the version string. A JSON
//! file is an object whose `version` field holds it; all other fields are
//! left alone and keep their order.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde_json::Value;

use crate::domain::Version;
use crate::error::{BumpError, Result};

/// On-disk format of a version file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Text,
    Json,
}

impl FromStr for FileFormat {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(FileFormat::Text),
            "json" => Ok(FileFormat::Json),
            other => Err(BumpError::config(format!(
                "Unknown version file type '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Text => write!(f, "text"),
            FileFormat::Json => write!(f, "json"),
        }
    }
}

/// A version file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFile {
    pub path: PathBuf,
    pub format: FileFormat,
}

impl VersionFile {
    pub fn new(path: impl Into<PathBuf>, format: FileFormat) -> Self {
        VersionFile {
            path: path.into(),
            format,
        }
    }

    /// Fail unless the file exists and is a regular file
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(BumpError::version_file(format!(
                "File not found: {}",
                self.path.display()
            )))
        }
    }

    /// Read the version currently recorded in the file
    pub fn read_version(&self) -> Result<Version> {
        let content = self.read()?;
        match self.format {
            FileFormat::Text => Version::parse(content.trim()),
            FileFormat::Json => {
                let root = self.parse_object(&content)?;
                let version = root
                    .get("version")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        BumpError::version_file(format!(
                            "{} has no string 'version' field",
                            self.path.display()
                        ))
                    })?;
                Version::parse(version)
            }
        }
    }

    /// Replace the recorded version with `version`
    ///
    /// Text files are overwritten with the bare string and no trailing
    /// newline. JSON files get their `version` key set and are re-serialized
    /// with two-space indentation and a trailing newline.
    pub fn write_version(&self, version: &str) -> Result<()> {
        let content = match self.format {
            FileFormat::Text => version.to_string(),
            FileFormat::Json => {
                let mut root = self.parse_object(&self.read()?)?;
                root.insert("version".to_string(), Value::String(version.to_string()));
                let mut text = serde_json::to_string_pretty(&Value::Object(root))?;
                text.push('\n');
                text
            }
        };

        fs::write(&self.path, content).map_err(|e| {
            BumpError::version_file(format!("Cannot write {}: {}", self.path.display(), e))
        })?;
        tracing::debug!(path = %self.path.display(), %version, "version file written");
        Ok(())
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            BumpError::version_file(format!("Cannot read {}: {}", self.path.display(), e))
        })
    }

    fn parse_object(&self, content: &str) -> Result<serde_json::Map<String, Value>> {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(BumpError::version_file(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(BumpError::version_file(format!(
                "Cannot parse {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
