use crate::domain::version::Version;

/// Tag naming prefix for one component (e.g. "backend/v", "lib-")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPrefix {
    pub prefix: String,
}

impl TagPrefix {
    /// Create a new tag prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        TagPrefix {
            prefix: prefix.into(),
        }
    }

    /// Format a version as a full tag name
    /// Example: prefix="lib/v", version="1.2.3" -> "lib/v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        format!("{}{}", self.prefix, version)
    }

    /// Return the part of `tag` after the prefix, if the tag carries it
    pub fn version_part<'a>(&self, tag: &'a str) -> Option<&'a str> {
        tag.strip_prefix(self.prefix.as_str())
    }
}
