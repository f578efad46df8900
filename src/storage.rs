//! Reading project files and writing reports.

mod converter;
mod document;
mod oid;

pub use converter::{ConvertError, Converter};
pub use document::{LoadError, MissingAttribute, NotFound, Row, RowStore, Table};
pub use oid::{EmptyOidError, Oid};
