//! Assembly of the final report text.
//!
//! The report is a depth-first, pre-order walk of the [`Tree`]. Each visible
//! node with tabs contributes a title block (the path of tree titles from
//! the project down to the node) followed by its visible tabs. Channels have
//! no tabs and only contribute their children. A hidden node hides its whole
//! subtree.

use tracing::instrument;

use crate::{
    domain::{node::NodeId, Config, Node, RenderError, TabContext, Tree},
    storage::RowStore,
};

/// Left border of every title block line.
pub const BORDER_LEFT: char = '║';
/// Connector in front of every path entry below the project.
pub const TREE_BRANCH: char = '└';
/// Corner closing a title block.
pub const BORDER_CORNER: char = '╚';
/// Rule closing a title block.
pub const BORDER_BOTTOM: char = '═';

const TAB_SEPARATOR: &str = "\n\n";
const NODE_SEPARATOR: &str = "\n\n\n";

/// Renders a project tree as plain text.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    tree: &'a Tree<'a>,
    store: &'a RowStore,
    config: &'a Config,
}

impl<'a> Report<'a> {
    /// Prepares a report over an assembled tree.
    #[must_use]
    pub const fn new(tree: &'a Tree<'a>, store: &'a RowStore, config: &'a Config) -> Self {
        Self {
            tree,
            store,
            config,
        }
    }

    /// Renders the whole report.
    ///
    /// Nothing is cached between calls; rendering the same tree twice yields
    /// identical text.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while rendering any field.
    #[instrument(skip(self))]
    pub fn render(&self) -> Result<String, RenderError> {
        Ok(self.render_node(self.tree.root())?.unwrap_or_default())
    }

    /// Renders a node and its descendants, or `None` if the subtree has no
    /// visible content.
    fn render_node(&self, id: NodeId) -> Result<Option<String>, RenderError> {
        let node = self.tree.node(id);
        if !node.state().visible {
            tracing::trace!(oid = %node.oid(), "skipping hidden subtree");
            return Ok(None);
        }

        let mut sections = Vec::new();
        if let Some(content) = self.content(node)? {
            sections.push(content);
        }
        for &child in node.children() {
            if let Some(text) = self.render_node(child)? {
                sections.push(text);
            }
        }

        Ok((!sections.is_empty()).then(|| sections.join(NODE_SEPARATOR)))
    }

    /// A node's own content: its title block and tabs. Structural nodes
    /// have none.
    fn content(&self, node: &Node<'_>) -> Result<Option<String>, RenderError> {
        let tabs = node.kind().tabs();
        if tabs.is_empty() {
            return Ok(None);
        }
        tracing::trace!(oid = %node.oid(), title = node.title(), "rendering node");

        let context = TabContext::new(node, self.store);
        let mut rendered = Vec::with_capacity(tabs.len());
        for tab in &tabs {
            if tab.is_shown(&context)? {
                rendered.push(tab.render(&context, self.config.tab_rule_width())?);
            }
        }

        Ok(Some(format!(
            "{}\n{}",
            title_block(node, self.config.title_rule_width()),
            rendered.join(TAB_SEPARATOR)
        )))
    }
}

/// Draws the path from the project down to the node, one entry per line,
/// each indented one level further than its parent.
fn title_block(node: &Node<'_>, rule_width: usize) -> String {
    let mut lines: Vec<String> = node
        .path()
        .iter()
        .enumerate()
        .map(|(depth, title)| {
            let branch = if depth == 0 { String::new() } else { TREE_BRANCH.to_string() };
            format!("{BORDER_LEFT} {}{branch}{title}", " ".repeat(depth))
        })
        .collect();
    lines.push(format!(
        "{BORDER_CORNER}{}",
        BORDER_BOTTOM.to_string().repeat(rule_width)
    ));
    lines.join("\n")
}
