//! [`Element`] implementation over a [`koala_dom::DomTree`].

use std::fmt;

use koala_dom::{DomTree, ElementData, NodeId};

use crate::element::Element;

/// A node of a [`DomTree`] viewed through the [`Element`] trait.
///
/// Usually wraps an element; the document node only shows up as the
/// [`parent`](Element::parent) of the document element.
#[derive(Clone, Copy)]
pub struct DomElement<'a> {
    tree: &'a DomTree,
    node_id: NodeId,
}

impl<'a> DomElement<'a> {
    /// Wrap `node_id` if it is an element of `tree`.
    #[must_use]
    pub fn new(tree: &'a DomTree, node_id: NodeId) -> Option<Self> {
        tree.as_element(node_id).map(|_| Self { tree, node_id })
    }

    /// The wrapped node.
    #[must_use]
    pub const fn node_id(&self) -> NodeId {
        self.node_id
    }

    const fn wrap(&self, node_id: NodeId) -> Self {
        Self {
            tree: self.tree,
            node_id,
        }
    }

    fn data(&self) -> Option<&'a ElementData> {
        self.tree.as_element(self.node_id)
    }
}

impl PartialEq for DomElement<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.node_id == other.node_id
    }
}

impl fmt::Debug for DomElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> {:?}", self.tag_name(), self.node_id)
    }
}

impl Element for DomElement<'_> {
    fn tag_name(&self) -> &str {
        self.data().map_or("", |data| data.tag_name.as_str())
    }

    fn id(&self) -> &str {
        self.data().and_then(ElementData::id).unwrap_or("")
    }

    fn class_attribute(&self) -> &str {
        self.data().map_or("", ElementData::class_attribute)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.data().and_then(|data| data.attribute(name))
    }

    fn children(&self) -> Vec<Self> {
        self.tree
            .element_children(self.node_id)
            .map(|child| self.wrap(child))
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        self.tree.parent(self.node_id).map(|parent| self.wrap(parent))
    }

    fn parent_element(&self) -> Option<Self> {
        self.tree
            .parent(self.node_id)
            .and_then(|parent| Self::new(self.tree, parent))
    }

    fn is_connected(&self) -> bool {
        self.tree.is_connected(self.node_id)
    }

    fn is_checked_input(&self) -> bool {
        self.data().is_some_and(ElementData::is_checked_input)
    }

    fn document_location_fragment(&self) -> &str {
        self.tree.location_fragment()
    }
}
