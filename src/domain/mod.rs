//! Domain logic - pure business rules independent of git operations

pub mod release;
pub mod tag;
pub mod version;

pub use release::{ReleasePoint, ReleaseStrategy};
pub use tag::TagPrefix;
pub use version::{BumpType, Version};
