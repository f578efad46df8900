//! Nodes of the SISTEMA project tree.
//!
//! Every node wraps exactly one row. Whatever a node needs to know about its
//! ancestors (the subsystem's category, whether the parent derives its MTTFD
//! from its children, the path of titles from the root) is captured from the
//! parent when the node is constructed, so rendering never walks upwards.

use std::fmt;

use nonempty::NonEmpty;

use crate::{
    domain::{
        format::{self, FormatError},
        selection::{
            Category, CategoryError, ChannelType, DcMethod, MttfdMethod, PlMethod, Selection,
            UnknownSelection,
        },
        tabs,
        Tab,
    },
    storage::{MissingAttribute, Oid, Row},
};

/// The kinds of node in the project tree, from the root down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The project itself; the unique root.
    Project,
    /// A safety function of the project.
    SafetyFunction,
    /// A subsystem of a safety function.
    Subsystem,
    /// A channel of a subsystem. Channels carry no content of their own.
    Channel,
    /// A block within a channel.
    Block,
    /// An element within a block.
    Element,
}

impl NodeKind {
    /// Every node kind, in the order their tables are expected in a document.
    pub const ALL: [Self; 6] = [
        Self::Project,
        Self::SafetyFunction,
        Self::Subsystem,
        Self::Channel,
        Self::Block,
        Self::Element,
    ];

    /// The node kind whose rows are stored in the given table, if any.
    #[must_use]
    pub fn for_table(table: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.table() == table)
    }

    /// The `table_name` of the table holding rows of this kind.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Project => "projectops",
            Self::SafetyFunction => "sfops",
            Self::Subsystem => "componentops",
            Self::Channel => "channelops",
            Self::Block => "blocops",
            Self::Element => "elementops",
        }
    }

    /// The attribute naming the parent row; absent for the root.
    #[must_use]
    pub const fn parent_attribute(self) -> Option<&'static str> {
        match self {
            Self::Project => None,
            Self::SafetyFunction => Some("projectopoid"),
            Self::Subsystem => Some("sfopoid"),
            Self::Channel => Some("componentopoid"),
            Self::Block | Self::Element => Some("parentopoid"),
        }
    }

    /// The kind a parent of this kind must have.
    #[must_use]
    pub const fn parent_kind(self) -> Option<Self> {
        match self {
            Self::Project => None,
            Self::SafetyFunction => Some(Self::Project),
            Self::Subsystem => Some(Self::SafetyFunction),
            Self::Channel => Some(Self::Subsystem),
            Self::Block => Some(Self::Channel),
            Self::Element => Some(Self::Block),
        }
    }

    /// The fixed short code used in tree titles. Channels use their own
    /// acronym, depending on the channel type.
    #[must_use]
    pub const fn acronym(self) -> &'static str {
        match self {
            Self::Project => "PR",
            Self::SafetyFunction => "SF",
            Self::Subsystem => "SB",
            Self::Channel => "CH",
            Self::Block => "BL",
            Self::Element => "EL",
        }
    }

    /// The lower-case noun used in field titles such as "Name of subsystem".
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::SafetyFunction => "safety function",
            Self::Subsystem => "subsystem",
            Self::Channel => "channel",
            Self::Block => "block",
            Self::Element => "element",
        }
    }

    /// The plural noun of the items an MTTFD or DC value can be derived
    /// from, or `None` if this kind has no such sub-items.
    #[must_use]
    pub const fn sub_items(self) -> Option<&'static str> {
        match self {
            Self::Subsystem => Some("blocks"),
            Self::Block => Some("elements"),
            _ => None,
        }
    }

    /// The tabs of this node kind, in display order.
    ///
    /// Tabs are instantiated on demand; nothing is cached.
    #[must_use]
    pub fn tabs(self) -> Vec<Tab> {
        match self {
            Self::Project => vec![tabs::project::documentation()],
            Self::SafetyFunction => vec![
                tabs::safety_function::documentation(),
                tabs::plr::tab(),
            ],
            Self::Subsystem => vec![
                tabs::documentation::tab(tabs::documentation::Options::SUBSYSTEM),
                tabs::pl::tab(),
                tabs::category::tab(),
                tabs::mttfd::tab(tabs::mttfd::Options::SUBSYSTEM),
                tabs::dc::average(),
                tabs::ccf::tab(),
            ],
            Self::Channel => Vec::new(),
            Self::Block => vec![
                tabs::documentation::tab(tabs::documentation::Options::BLOCK),
                tabs::mttfd::tab(tabs::mttfd::Options::COMPONENT),
                tabs::dc::tab(),
            ],
            Self::Element => vec![
                tabs::documentation::tab(tabs::documentation::Options::ELEMENT),
                tabs::mttfd::tab(tabs::mttfd::Options::COMPONENT),
                tabs::dc::tab(),
            ],
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Derived properties of a node that drive visibility rules.
///
/// Properties a kind does not have stay at their defaults. Ancestor
/// properties (category, PL method) are copied down to every descendant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Whether the node (and so its subtree) appears in the report.
    pub visible: bool,

    /// The category of the owning subsystem.
    pub category: Option<Category>,

    /// How the owning subsystem determines its PL.
    pub pl_method: Option<PlMethod>,

    /// The channel type of a channel, or of the channel owning a block or
    /// element.
    pub channel: Option<ChannelType>,

    /// How this node determines its MTTFD.
    pub mttfd_method: Option<MttfdMethod>,

    /// How this node determines its DC (DCavg for subsystems).
    pub dc_method: Option<DcMethod>,

    /// Whether this node's MTTFD is replaced by a fault exclusion.
    pub fault_excluded: bool,

    /// Whether this node's MTTFD tab is relevant.
    pub mttfd_relevant: bool,

    /// Whether this node's DC (or DCavg) tab is relevant.
    pub dc_relevant: bool,

    /// Whether this node's children contribute to its MTTFD.
    pub mttfd_from_children: bool,

    /// Whether this node's children contribute to its DC.
    pub dc_from_children: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            visible: true,
            category: None,
            pl_method: None,
            channel: None,
            mttfd_method: None,
            dc_method: None,
            fault_excluded: false,
            mttfd_relevant: false,
            dc_relevant: false,
            mttfd_from_children: false,
            dc_from_children: false,
        }
    }
}

impl State {
    /// Derives the state of a node from its row and its parent's state.
    ///
    /// # Errors
    ///
    /// Returns an error if an attribute the rules depend on is missing or
    /// holds an unknown code.
    pub fn derive(kind: NodeKind, row: &Row, parent: Option<&Self>) -> Result<Self, StateError> {
        let inherited = parent.copied().unwrap_or_default();
        let mut state = Self {
            visible: inherited.visible,
            category: inherited.category,
            pl_method: inherited.pl_method,
            channel: inherited.channel,
            ..Self::default()
        };

        match kind {
            NodeKind::Project | NodeKind::SafetyFunction => {}
            NodeKind::Subsystem => {
                let category = Category::decode(row.require("cat")?)?;
                let pl_method = PlMethod::decode(row.require("pldet")?)?;
                state.category = Some(category);
                state.pl_method = Some(pl_method);
                state.mttfd_method = Some(MttfdMethod::decode(row.require("mttfddet")?)?);
                state.dc_method = Some(DcMethod::decode(row.require("dcavgdet")?)?);
                state.mttfd_relevant = pl_method == PlMethod::SubItems;
                state.dc_relevant = !pl_method.is_direct() && category.has_diagnostics();
                state.derive_from_children();
            }
            NodeKind::Channel => {
                let channel = ChannelType::decode(row.require("channeltype")?)?;
                let direct = inherited.pl_method.is_some_and(PlMethod::is_direct);
                let applies = inherited
                    .category
                    .is_some_and(|category| channel.applies_to(category));
                state.channel = Some(channel);
                state.visible = inherited.visible && !direct && applies;
                state.mttfd_from_children = inherited.mttfd_from_children;
                state.dc_from_children = inherited.dc_from_children;
            }
            NodeKind::Block | NodeKind::Element => {
                state.mttfd_method = Some(MttfdMethod::decode(row.require("mttfddet")?)?);
                state.dc_method = Some(DcMethod::decode(row.require("dcdet")?)?);
                state.fault_excluded = format::fault_excluded(row.require("mttfd")?)?;
                state.mttfd_relevant = inherited.mttfd_from_children;
                state.dc_relevant = inherited.dc_from_children;
                state.derive_from_children();
            }
        }

        Ok(state)
    }

    fn derive_from_children(&mut self) {
        self.mttfd_from_children =
            self.mttfd_relevant && self.mttfd_method == Some(MttfdMethod::SubItems);
        self.dc_from_children = self.dc_relevant && self.dc_method == Some(DcMethod::SubItems);
    }
}

/// A node's row could not be interpreted.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StateError {
    /// A required attribute is missing.
    #[error(transparent)]
    MissingAttribute(#[from] MissingAttribute),
    /// An attribute holds an unknown code.
    #[error(transparent)]
    Selection(#[from] UnknownSelection),
    /// An attribute holds an undecodable value.
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl From<CategoryError> for StateError {
    fn from(error: CategoryError) -> Self {
        match error {
            CategoryError::Format(error) => Self::Format(error),
            CategoryError::Unknown(error) => Self::Selection(error),
        }
    }
}

/// Index of a node within its [`Tree`](crate::domain::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// One entry in the project tree.
#[derive(Debug, Clone)]
pub struct Node<'s> {
    kind: NodeKind,
    row: &'s Row,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    state: State,

    /// Tree titles from the root down to and including this node.
    path: NonEmpty<String>,
}

impl<'s> Node<'s> {
    /// Constructs a node from its row, capturing what it needs from its
    /// parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the row lacks an attribute the node depends on, or
    /// holds an unknown code.
    pub fn new(
        kind: NodeKind,
        row: &'s Row,
        parent: Option<(NodeId, &Self)>,
    ) -> Result<Self, StateError> {
        let state = State::derive(kind, row, parent.map(|(_, node)| &node.state))?;
        let title = tree_title(kind, row, &state)?;

        let path = match parent {
            Some((_, parent)) => {
                let mut path = parent.path.clone();
                path.push(title);
                path
            }
            None => NonEmpty::new(title),
        };

        Ok(Self {
            kind,
            row,
            parent: parent.map(|(id, _)| id),
            children: Vec::new(),
            state,
            path,
        })
    }

    /// The kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The row this node wraps.
    #[must_use]
    pub const fn row(&self) -> &'s Row {
        self.row
    }

    /// The identifier of this node's row.
    #[must_use]
    pub const fn oid(&self) -> &'s Oid {
        self.row.oid()
    }

    /// The parent of this node; `None` for the project.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The children of this node, in the order their rows were read.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn add_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    /// Derived properties used by visibility rules.
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// The tree titles from the root down to this node.
    #[must_use]
    pub const fn path(&self) -> &NonEmpty<String> {
        &self.path
    }

    /// This node's own tree title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.path.last()
    }
}

/// Builds the string identifying a node in the project tree: acronym,
/// optional bracketed reference designator, and name.
fn tree_title(kind: NodeKind, row: &Row, state: &State) -> Result<String, MissingAttribute> {
    let (acronym, name) = match (kind, state.channel) {
        (NodeKind::Channel, Some(channel)) => (channel.acronym(), channel.name()),
        _ => (kind.acronym(), row.require("name")?),
    };

    let mut items = vec![acronym.to_string()];
    if let Some(reference) = row.get("equipmentid").filter(|id| !id.is_empty()) {
        items.push(format!("[{reference}]"));
    }
    items.push(name.to_string());

    Ok(items.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::DocumentBuilder;

    #[test]
    fn table_names_map_to_kinds() {
        assert_eq!(NodeKind::for_table("blocops"), Some(NodeKind::Block));
        assert_eq!(NodeKind::for_table("ccfmeasureops"), None);
    }

    #[test]
    fn subsystem_state_follows_pl_method() {
        let store = DocumentBuilder::new()
            .subsystem(
                "sb",
                "sf",
                &[("cat", "cat3"), ("pldet", "detSubItems"), ("mttfddet", "detSubItems")],
            )
            .store();
        let state = State::derive(NodeKind::Subsystem, store.row("sb").unwrap(), None).unwrap();

        assert_eq!(state.category, Some(Category::Three));
        assert!(state.mttfd_relevant);
        assert!(state.dc_relevant);
        assert!(state.mttfd_from_children);
    }

    #[test]
    fn simplified_method_has_no_mttfd() {
        let store = DocumentBuilder::new()
            .subsystem("sb", "sf", &[("cat", "cat2"), ("pldet", "detSubItemsSimple")])
            .store();
        let state = State::derive(NodeKind::Subsystem, store.row("sb").unwrap(), None).unwrap();

        assert!(!state.mttfd_relevant);
        assert!(!state.mttfd_from_children);
        assert!(state.dc_relevant);
    }

    #[test]
    fn channel_hidden_when_pl_entered_directly() {
        let store = DocumentBuilder::new()
            .subsystem("sb", "sf", &[("cat", "cat4"), ("pldet", "detSILDirect")])
            .channel("ch", "sb", "ch1")
            .store();
        let subsystem = State::derive(NodeKind::Subsystem, store.row("sb").unwrap(), None).unwrap();
        let channel =
            State::derive(NodeKind::Channel, store.row("ch").unwrap(), Some(&subsystem)).unwrap();

        assert!(!channel.visible);
    }

    #[test]
    fn fault_exclusion_comes_from_negative_mttfd() {
        let store = DocumentBuilder::new()
            .block("bl", "ch", &[("mttfd", "-1")])
            .store();
        let state = State::derive(NodeKind::Block, store.row("bl").unwrap(), None).unwrap();

        assert!(state.fault_excluded);
    }

    #[test]
    fn unknown_method_is_rejected() {
        let store = DocumentBuilder::new()
            .subsystem("sb", "sf", &[("pldet", "detMagic")])
            .store();
        let error = State::derive(NodeKind::Subsystem, store.row("sb").unwrap(), None).unwrap_err();

        assert!(matches!(error, StateError::Selection(_)));
    }

    #[test]
    fn title_includes_reference_designator() {
        let store = DocumentBuilder::new()
            .subsystem("sb", "sf", &[("name", "Light curtain"), ("equipmentid", "-B1")])
            .store();
        let node = Node::new(NodeKind::Subsystem, store.row("sb").unwrap(), None).unwrap();

        assert_eq!(node.title(), "SB [-B1] Light curtain");
    }

    #[test]
    fn test_channel_title_is_fixed() {
        let store = DocumentBuilder::new().channel("ch", "sb", "chTest").store();
        let node = Node::new(NodeKind::Channel, store.row("ch").unwrap(), None).unwrap();

        assert_eq!(node.title(), "TE Test Channel");
    }
}
