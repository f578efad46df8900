//! The project tree and its rendering.
//!
//! This module knows nothing about files. It turns a [`RowStore`](crate::storage::RowStore)
//! into a [`Tree`] of typed nodes, decides which tabs and fields of each node
//! are relevant, and renders them as a plain-text [`Report`].

mod config;
pub use config::Config;

/// Conversions from raw attribute values to display strings.
pub mod format;

/// Nodes of the project tree and their derived state.
pub mod node;
pub use node::{Node, NodeId, NodeKind, State, StateError};

/// Enumerated selections such as determination methods.
pub mod selection;

pub mod tab;
pub use tab::{Field, RenderError, Tab, TabContext};

pub mod tabs;

mod tree;
pub use tree::{BuildError, Tree};

mod report;
pub use report::Report;
