//! The project tree, assembled from the flat tables of a document.
//!
//! The [`Tree`] knows nothing about XML. It walks the tables of a
//! [`RowStore`] in document order and creates one [`Node`] per row of every
//! table it recognises, registering each node with its parent as it goes.
//! Parents must therefore appear before their children; SISTEMA writes its
//! tables root first, so this holds for any document it produces.

use std::collections::HashMap;

use thiserror::Error;
use tracing::instrument;

use crate::{
    domain::node::{Node, NodeId, NodeKind, StateError},
    storage::{MissingAttribute, Oid, RowStore},
};

/// The project tree. Nodes are stored in creation order and refer to each
/// other by [`NodeId`].
#[derive(Debug)]
pub struct Tree<'s> {
    nodes: Vec<Node<'s>>,

    /// Lookup from row identifier to node.
    index: HashMap<&'s str, NodeId>,

    root: NodeId,
}

/// Errors that can occur when assembling the tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A row names a parent that has not been created (it is missing, or
    /// appears later in the document).
    #[error("{oid} refers to parent {parent}, which does not precede it")]
    UnresolvedParent {
        /// The row whose parent is missing.
        oid: Oid,
        /// The identifier it names as parent.
        parent: String,
    },

    /// A row's parent is a node of the wrong kind.
    #[error("{oid} is a {kind} but its parent {parent} is a {found}")]
    UnexpectedParent {
        /// The row whose parent is of the wrong kind.
        oid: Oid,
        /// The kind of the row.
        kind: NodeKind,
        /// The identifier it names as parent.
        parent: Oid,
        /// The kind of that parent.
        found: NodeKind,
    },

    /// The document has no project row.
    #[error("the document contains no project")]
    MissingProject,

    /// The document has more than one project row.
    #[error("the document contains {0} projects, expected one")]
    MultipleProjects(usize),

    /// A row lacks its parent reference.
    #[error(transparent)]
    MissingAttribute(#[from] MissingAttribute),

    /// A row's derived state could not be determined.
    #[error("{oid}: {source}")]
    State {
        /// The offending row.
        oid: Oid,
        /// The underlying failure.
        source: StateError,
    },
}

impl<'s> Tree<'s> {
    /// Assembles the tree from a document.
    ///
    /// Tables that do not hold nodes (applied measures, libraries, and any
    /// table this crate does not know) are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not have exactly one project, a
    /// parent reference cannot be resolved or names a node of the wrong
    /// kind, or a row cannot be interpreted.
    #[instrument(skip(store))]
    pub fn build(store: &'s RowStore) -> Result<Self, BuildError> {
        let projects: usize = store
            .tables()
            .iter()
            .filter(|table| table.name() == NodeKind::Project.table())
            .map(|table| table.rows().len())
            .sum();
        match projects {
            0 => return Err(BuildError::MissingProject),
            1 => {}
            n => return Err(BuildError::MultipleProjects(n)),
        }

        let mut nodes: Vec<Node<'s>> = Vec::with_capacity(store.len());
        let mut index: HashMap<&'s str, NodeId> = HashMap::with_capacity(store.len());
        let mut root = None;

        for table in store.tables() {
            let Some(kind) = NodeKind::for_table(table.name()) else {
                tracing::debug!(table = table.name(), "skipping table");
                continue;
            };

            for row in table.rows() {
                let parent = match kind.parent_attribute() {
                    Some(attribute) => {
                        let reference = row.require(attribute)?;
                        let &id = index.get(reference).ok_or_else(|| {
                            BuildError::UnresolvedParent {
                                oid: row.oid().clone(),
                                parent: reference.to_string(),
                            }
                        })?;
                        let parent: &Node<'s> = &nodes[id.0];
                        if Some(parent.kind()) != kind.parent_kind() {
                            return Err(BuildError::UnexpectedParent {
                                oid: row.oid().clone(),
                                kind,
                                parent: parent.oid().clone(),
                                found: parent.kind(),
                            });
                        }
                        Some((id, parent))
                    }
                    None => None,
                };

                let node = Node::new(kind, row, parent).map_err(|source| BuildError::State {
                    oid: row.oid().clone(),
                    source,
                })?;

                let id = NodeId(nodes.len());
                if let Some(parent) = node.parent() {
                    nodes[parent.0].add_child(id);
                }
                if kind == NodeKind::Project {
                    root = Some(id);
                }
                index.insert(row.oid().as_str(), id);
                nodes.push(node);
            }
        }

        let root = root.ok_or(BuildError::MissingProject)?;
        tracing::info!(nodes = nodes.len(), "assembled project tree");

        Ok(Self { nodes, index, root })
    }

    /// The project node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id belongs to a different tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node<'s> {
        &self.nodes[id.0]
    }

    /// Finds the node of the row with the given identifier.
    #[must_use]
    pub fn find(&self, oid: &str) -> Option<NodeId> {
        self.index.get(oid).copied()
    }

    /// The nodes of the tree, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<'s>> {
        self.nodes.iter()
    }

    /// The number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes. A built tree always has its project.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
