//! Tabs: labelled groups of fields shown for a node.
//!
//! A [`Tab`] mirrors one tab of the SISTEMA user interface. It is a transient
//! view bound to a node's row while rendering, owning an ordered list of
//! [`Field`]s. Each field reads its raw value either from a row attribute
//! (optionally passed through a formatter) or from a computed-value function,
//! and may name a predicate that hides it. The mapping from field to
//! formatter or computation is fixed when the field table is defined.

use crate::{
    domain::{
        format::FormatError,
        node::Node,
        selection::{Selection, UnknownSelection},
    },
    storage::{MissingAttribute, NotFound, Row, RowStore},
};

/// Decides whether a tab or field is shown.
pub type Predicate = fn(&TabContext<'_>) -> Result<bool, RenderError>;

/// Converts a raw attribute value into its display string.
pub type Formatter = fn(&TabContext<'_>, &str) -> Result<String, RenderError>;

/// Produces a display string for a value that no single attribute holds.
pub type Computed = fn(&TabContext<'_>) -> Result<String, RenderError>;

/// Everything a predicate, formatter or computation may consult: the node
/// (its row and derived state) and the whole document for cross-table
/// lookups.
#[derive(Debug, Clone, Copy)]
pub struct TabContext<'a> {
    node: &'a Node<'a>,
    store: &'a RowStore,
}

impl<'a> TabContext<'a> {
    /// Binds a tab to a node.
    #[must_use]
    pub const fn new(node: &'a Node<'a>, store: &'a RowStore) -> Self {
        Self { node, store }
    }

    /// The node the tab is rendered for.
    #[must_use]
    pub const fn node(&self) -> &'a Node<'a> {
        self.node
    }

    /// The node's row.
    #[must_use]
    pub const fn row(&self) -> &'a Row {
        self.node.row()
    }

    /// The document the node was read from.
    #[must_use]
    pub const fn store(&self) -> &'a RowStore {
        self.store
    }

    /// Reads an attribute of the node's row.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingAttribute`] if the row lacks it.
    pub fn attribute(&self, name: &str) -> Result<&'a str, RenderError> {
        Ok(self.row().require(name)?)
    }

    /// Reads and decodes an enumerated attribute of the node's row.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute is missing or holds an unknown code.
    pub fn selection<S: Selection>(&self, name: &str) -> Result<S, RenderError> {
        Ok(S::decode(self.attribute(name)?)?)
    }
}

/// Where a field's raw value comes from.
#[derive(Debug, Clone, Copy)]
pub enum Source {
    /// A row attribute, optionally passed through a formatter.
    Attribute {
        /// The attribute name.
        name: &'static str,
        /// The formatter applied to the raw value, if any.
        format: Option<Formatter>,
    },
    /// A value computed from the tab context.
    Computed {
        /// A name identifying the value, used in diagnostics.
        name: &'static str,
        /// The computation.
        compute: Computed,
    },
}

/// One line (or block of lines) of a tab.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    title: Option<&'static str>,
    source: Source,
    show: Option<Predicate>,
}

impl Field {
    /// A titled field showing an attribute verbatim.
    #[must_use]
    pub const fn new(title: &'static str, attribute: &'static str) -> Self {
        Self {
            title: Some(title),
            source: Source::Attribute {
                name: attribute,
                format: None,
            },
            show: None,
        }
    }

    /// An untitled field showing an attribute, used for selections and
    /// free-form blocks such as checklists.
    #[must_use]
    pub const fn untitled(attribute: &'static str) -> Self {
        Self {
            title: None,
            source: Source::Attribute {
                name: attribute,
                format: None,
            },
            show: None,
        }
    }

    /// A field whose value is computed rather than read.
    #[must_use]
    pub const fn computed(
        title: Option<&'static str>,
        name: &'static str,
        compute: Computed,
    ) -> Self {
        Self {
            title,
            source: Source::Computed { name, compute },
            show: None,
        }
    }

    /// Passes the attribute value through a formatter.
    ///
    /// # Panics
    ///
    /// Panics if the field is computed. Field tables are constants, so the
    /// mistake surfaces at compile time.
    #[must_use]
    pub const fn formatted(self, format: Formatter) -> Self {
        let source = match self.source {
            Source::Attribute { name, .. } => Source::Attribute {
                name,
                format: Some(format),
            },
            Source::Computed { .. } => panic!("computed fields produce display values directly"),
        };
        Self { source, ..self }
    }

    /// Shows the field only when the predicate holds.
    #[must_use]
    pub const fn shown_if(self, show: Predicate) -> Self {
        Self {
            show: Some(show),
            ..self
        }
    }

    /// The title of the field, if it has one.
    #[must_use]
    pub const fn title(&self) -> Option<&'static str> {
        self.title
    }

    /// The attribute or computed-value name the field reads.
    #[must_use]
    pub const fn source_name(&self) -> &'static str {
        match self.source {
            Source::Attribute { name, .. } | Source::Computed { name, .. } => name,
        }
    }

    /// Whether the field is shown for the given context.
    ///
    /// # Errors
    ///
    /// Propagates errors from the field's predicate.
    pub fn is_shown(&self, context: &TabContext<'_>) -> Result<bool, RenderError> {
        self.show.map_or(Ok(true), |show| show(context))
    }

    /// Produces the display value of the field.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingAttribute`] if the row lacks the
    /// attribute, or any error raised by the formatter or computation.
    pub fn value(&self, context: &TabContext<'_>) -> Result<String, RenderError> {
        match self.source {
            Source::Attribute { name, format } => {
                let raw = context.attribute(name)?;
                match format {
                    Some(format) => format(context, raw),
                    None => Ok(raw.to_string()),
                }
            }
            Source::Computed { compute, .. } => compute(context),
        }
    }

    /// Renders the field as `title: value`, or just the value when the field
    /// is untitled. Returns `None` for an untitled field with nothing to
    /// show.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Field::value`].
    pub fn render(&self, context: &TabContext<'_>) -> Result<Option<String>, RenderError> {
        let value = self.value(context)?;
        Ok(match self.title {
            Some(title) => Some(format!("{title}: {value}")),
            None if value.is_empty() => None,
            None => Some(value),
        })
    }
}

/// A labelled group of fields.
#[derive(Debug, Clone)]
pub struct Tab {
    name: &'static str,
    fields: Vec<Field>,
    show: Option<Predicate>,
}

impl Tab {
    /// Left border of a tab title.
    pub const BORDER_LEFT: char = '│';
    /// Corner below a tab title.
    pub const BORDER_CORNER: char = '└';
    /// Rule below a tab title.
    pub const BORDER_BOTTOM: char = '─';

    /// A tab that is always shown.
    #[must_use]
    pub fn new(name: &'static str, fields: impl Into<Vec<Field>>) -> Self {
        Self {
            name,
            fields: fields.into(),
            show: None,
        }
    }

    /// Shows the tab only when the predicate holds.
    #[must_use]
    pub fn shown_if(mut self, show: Predicate) -> Self {
        self.show = Some(show);
        self
    }

    /// The tab name, as shown in its title.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the tab is shown for the given context.
    ///
    /// # Errors
    ///
    /// Propagates errors from the tab's predicate.
    pub fn is_shown(&self, context: &TabContext<'_>) -> Result<bool, RenderError> {
        self.show.map_or(Ok(true), |show| show(context))
    }

    /// Renders the lines of every visible field.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by a field.
    pub fn render_fields(&self, context: &TabContext<'_>) -> Result<Vec<String>, RenderError> {
        let mut lines = Vec::new();
        for field in &self.fields {
            if !field.is_shown(context)? {
                continue;
            }
            if let Some(line) = field.render(context)? {
                lines.push(line);
            }
        }
        Ok(lines)
    }

    /// Renders the tab: a bordered title underlined to `rule_width`,
    /// followed by its visible fields.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by a field.
    pub fn render(
        &self,
        context: &TabContext<'_>,
        rule_width: usize,
    ) -> Result<String, RenderError> {
        let mut lines = vec![
            format!("{} {}", Self::BORDER_LEFT, self.name),
            format!(
                "{}{}",
                Self::BORDER_CORNER,
                Self::BORDER_BOTTOM.to_string().repeat(rule_width)
            ),
        ];
        lines.extend(self.render_fields(context)?);
        Ok(lines.join("\n"))
    }
}

/// Errors that can occur while rendering tabs.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    /// A field names an attribute the row does not have. Field tables and
    /// the document format must agree, so this is a configuration defect.
    #[error("configuration defect: {0}")]
    MissingAttribute(#[from] MissingAttribute),

    /// A referenced row does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// An enumerated attribute holds an unknown code.
    #[error(transparent)]
    Selection(#[from] UnknownSelection),

    /// An attribute value could not be decoded.
    #[error("row {oid}: {source}")]
    Format {
        /// The row being rendered.
        oid: String,
        /// The decoding failure.
        source: FormatError,
    },
}

impl RenderError {
    /// Attaches the row being rendered to a decoding failure.
    #[must_use]
    pub fn format(context: &TabContext<'_>, source: FormatError) -> Self {
        Self::Format {
            oid: context.node().oid().to_string(),
            source,
        }
    }
}

/// Extension for attaching the current row to decoding failures.
pub trait FormatResultExt<T> {
    /// Converts a [`FormatError`] into a [`RenderError`] naming the row.
    ///
    /// # Errors
    ///
    /// Returns the converted error.
    fn in_row(self, context: &TabContext<'_>) -> Result<T, RenderError>;
}

impl<T> FormatResultExt<T> for Result<T, FormatError> {
    fn in_row(self, context: &TabContext<'_>) -> Result<T, RenderError> {
        self.map_err(|source| RenderError::format(context, source))
    }
}
