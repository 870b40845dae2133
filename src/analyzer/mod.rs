//! Commit history analysis - release point lookup and change classification

pub mod change_classifier;
pub mod release_resolver;

pub use change_classifier::ChangeClassifier;
pub use release_resolver::resolve;
