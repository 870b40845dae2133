use std::fmt;

/// Non-fatal situations met while resolving a release point.
/// They never stop a run but should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A repository query failed and its default answer was used instead
    RepositoryQueryFailed { operation: String, reason: String },
    /// Tag carries the prefix but its remainder is not a version
    UnparsableTag { tag: String, reason: String },
    /// No release marker exists, the whole history is scanned
    NoPriorRelease { marker: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::RepositoryQueryFailed { operation, reason } => {
                write!(f, "Repository query '{}' failed: {}", operation, reason)
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::NoPriorRelease { marker } => {
                write!(
                    f,
                    "No prior release found for '{}', scanning full history",
                    marker
                )
            }
        }
    }
}
