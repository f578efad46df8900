//! The flat table-of-tables view of a SISTEMA project document.
//!
//! A project file is an XML document whose root holds a `tables` element.
//! Each `table` carries a `table_name` attribute and a `rows` element, and
//! every child of `rows` is a flat set of attributes identified by a unique
//! `oid`. The [`RowStore`] loads all of it once and never changes afterwards;
//! it knows nothing about the project tree built on top of it.

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use roxmltree::{Document, Node};
use tracing::instrument;

use crate::storage::Oid;

/// A single row: an identifier plus its raw attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    oid: Oid,
    attributes: HashMap<String, String>,
}

impl Row {
    /// The identifier of this row.
    #[must_use]
    pub const fn oid(&self) -> &Oid {
        &self.oid
    }

    /// Returns the raw value of an attribute, if the row defines it.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).map(String::as_str)
    }

    /// Returns the raw value of an attribute the caller relies on.
    ///
    /// # Errors
    ///
    /// Returns [`MissingAttribute`] if the row does not define it.
    pub fn require(&self, attribute: &str) -> Result<&str, MissingAttribute> {
        self.get(attribute).ok_or_else(|| MissingAttribute {
            oid: self.oid.clone(),
            attribute: attribute.to_string(),
        })
    }
}

/// A named table and its rows, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    rows: Vec<Row>,
}

impl Table {
    /// The `table_name` of this table, e.g. `componentops`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rows of this table, in the order they appear in the document.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// All rows of a project document, grouped by table.
#[derive(Debug, Default)]
pub struct RowStore {
    tables: Vec<Table>,

    /// Position of every row, as (table index, row index).
    index: HashMap<Oid, (usize, usize)>,
}

impl RowStore {
    /// Reads and parses a project document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a well-formed
    /// project document.
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses a project document from its XML text.
    ///
    /// Tables are kept in document order, and rows in the order they appear
    /// within their table.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not well-formed XML, if a table has
    /// no name, or if a row identifier is missing or not unique.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let document = Document::parse(text)?;
        let mut store = Self::default();

        for table in children(document.root_element(), "tables")
            .flat_map(|tables| children(tables, "table"))
        {
            store.read_table(table)?;
        }

        tracing::info!(
            "Loaded {} rows from {} tables",
            store.index.len(),
            store.tables.len()
        );

        Ok(store)
    }

    fn read_table(&mut self, element: Node<'_, '_>) -> Result<(), LoadError> {
        let name = element
            .attribute("table_name")
            .ok_or(LoadError::UnnamedTable)?
            .to_string();
        let table_index = self.tables.len();
        let mut rows = Vec::new();

        for (row_index, row) in children(element, "rows")
            .flat_map(|rows| rows.children().filter(Node::is_element))
            .enumerate()
        {
            let oid = row
                .attribute("oid")
                .and_then(|oid| Oid::try_from(oid).ok())
                .ok_or_else(|| LoadError::MissingOid {
                    table: name.clone(),
                    index: row_index,
                })?;

            if self.index.contains_key(&oid) {
                return Err(LoadError::DuplicateOid(oid));
            }
            self.index.insert(oid.clone(), (table_index, row_index));

            let attributes = row
                .attributes()
                .map(|attribute| (attribute.name().to_string(), attribute.value().to_string()))
                .collect();

            rows.push(Row { oid, attributes });
        }

        tracing::debug!("Read table '{name}' with {} rows", rows.len());
        self.tables.push(Table { name, rows });
        Ok(())
    }

    /// All tables, in document order.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Finds the first table with the given name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Looks up a row in any table by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no row has the identifier.
    pub fn row(&self, oid: &str) -> Result<&Row, NotFound> {
        self.index
            .get(oid)
            .map(|&(table, row)| &self.tables[table].rows[row])
            .ok_or_else(|| NotFound(oid.to_string()))
    }

    /// Finds the rows of `table` whose `attribute` holds the given
    /// identifier, in document order.
    ///
    /// This is how rows in one table point back at rows in another, e.g. the
    /// applied CCF measures of a subsystem.
    pub fn rows_referencing<'a>(
        &'a self,
        table: &'a str,
        attribute: &'a str,
        oid: &'a str,
    ) -> impl Iterator<Item = &'a Row> + 'a {
        self.tables
            .iter()
            .filter(move |t| t.name == table)
            .flat_map(|t| t.rows.iter())
            .filter(move |row| row.get(attribute) == Some(oid))
    }

    /// The total number of rows across all tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the document contains no rows at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name(tag))
}

/// Errors that can occur when loading a project document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The document is not well-formed XML.
    #[error("malformed project document")]
    Xml(#[from] roxmltree::Error),

    /// A table element has no `table_name`.
    #[error("table element has no 'table_name' attribute")]
    UnnamedTable,

    /// A row has no (or an empty) `oid`.
    #[error("row {index} of table '{table}' has no 'oid' attribute")]
    MissingOid {
        /// The table containing the row.
        table: String,
        /// Zero-based position of the row within its table.
        index: usize,
    },

    /// Two rows share an identifier.
    #[error("row identifier {0} appears more than once")]
    DuplicateOid(Oid),
}

/// A lookup by identifier found no row.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("no row with identifier {0}")]
pub struct NotFound(pub String);

/// A row lacks an attribute the caller relies on.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("row {oid} has no '{attribute}' attribute")]
pub struct MissingAttribute {
    /// The row that was read.
    pub oid: Oid,
    /// The attribute that was expected.
    pub attribute: String,
}
