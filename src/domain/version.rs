use crate::error::{BumpError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Semantic version with an optional opaque suffix
///
/// The suffix (for example `-beta.1`) is kept verbatim for display only.
/// Ordering looks at `(major, minor, patch)` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub suffix: Option<String>,
}

impl Version {
    /// Create a new version without a suffix
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            suffix: None,
        }
    }

    /// Parse a version string such as "1.2.3", "v1.2.3" or "1.2.3-rc.1"
    pub fn parse(text: &str) -> Result<Self> {
        let parsed = parse_semver(text)?;
        Ok(Self::from(&parsed))
    }

    /// Bump version according to bump type
    ///
    /// Any suffix on `self` is dropped. `BumpType::None` returns the core
    /// version unchanged. Fails when the bumped component would overflow.
    pub fn bump(&self, bump_type: BumpType) -> Result<Self> {
        let next = match bump_type {
            BumpType::Major => self
                .major
                .checked_add(1)
                .map(|major| Version::new(major, 0, 0)),
            BumpType::Minor => self
                .minor
                .checked_add(1)
                .map(|minor| Version::new(self.major, minor, 0)),
            BumpType::Patch => self
                .patch
                .checked_add(1)
                .map(|patch| Version::new(self.major, self.minor, patch)),
            BumpType::None => Some(Version::new(self.major, self.minor, self.patch)),
        };

        next.ok_or_else(|| {
            BumpError::version(format!(
                "Cannot apply {} bump to {}: component out of range",
                bump_type, self
            ))
        })
    }

    /// Attach a suffix that is appended verbatim when displayed
    pub fn with_suffix(mut self, suffix: Option<&str>) -> Self {
        self.suffix = suffix.filter(|s| !s.is_empty()).map(str::to_string);
        self
    }

    /// Compare by `(major, minor, patch)` only
    pub fn cmp_core(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::new(0, 0, 0)
    }
}

impl From<&semver::Version> for Version {
    fn from(v: &semver::Version) -> Self {
        let mut suffix = String::new();
        if !v.pre.is_empty() {
            suffix.push('-');
            suffix.push_str(v.pre.as_str());
        }
        if !v.build.is_empty() {
            suffix.push('+');
            suffix.push_str(v.build.as_str());
        }

        Version {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            suffix: (!suffix.is_empty()).then_some(suffix),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(suffix) = &self.suffix {
            write!(f, "{}", suffix)?;
        }
        Ok(())
    }
}

/// Parse a version string into a `semver::Version`, tolerating a leading 'v' or 'V'.
pub fn parse_semver(text: &str) -> Result<semver::Version> {
    let trimmed = text.trim();
    let clean = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    semver::Version::parse(clean).map_err(|e| {
        BumpError::version(format!(
            "Invalid version format: '{}' - expected X.Y.Z ({})",
            text, e
        ))
    })
}

/// Severity of the change found in the commit history
///
/// Variants are declared from least to most severe so the derived ordering
/// can be used to keep the highest match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum BumpType {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpType::None => "none",
            BumpType::Patch => "patch",
            BumpType::Minor => "minor",
            BumpType::Major => "major",
        };
        write!(f, "{}", name)
    }
}
