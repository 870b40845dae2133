pub mod analyzer;
pub mod boundary;
pub mod ci_output;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod ui;
pub mod version_file;

pub use error::{BumpError, Result};
