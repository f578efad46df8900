//! Plain-text reports of SISTEMA functional-safety projects.
//!
//! A SISTEMA project file (`.ssm`) is an XML document of flat tables. This
//! crate rebuilds the project tree from those tables and renders every node
//! with the tabs and fields the SISTEMA user interface would show for it.

pub mod domain;
pub use domain::{Config, Report, Tree};

/// Project files on disk and the report files generated from them.
pub mod storage;
pub use storage::{Converter, RowStore};

#[cfg(test)]
mod fixtures;
