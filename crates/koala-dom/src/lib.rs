//! Arena-based DOM tree for the Koala selector engine.
//!
//! This crate provides the node storage that selector matching reads from,
//! following the [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! All nodes live in one vector and refer to each other through [`NodeId`]
//! indices, so the tree can be walked in any direction without fighting the
//! borrow checker. Detached nodes stay in the arena; they simply have no
//! parent and are not [connected](DomTree::is_connected).

use std::collections::{HashMap, HashSet};

use koala_common::url;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node document... and parent (null or an element)."
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// Element-specific data.
///
/// NOTE: Only the local name and attribute list are stored. Namespaces are
/// not modeled; selector matching compares local names ignoring ASCII case.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create an element with the given local name and no attributes.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attrs: AttributesMap::new(),
        }
    }

    /// Builder-style helper that sets an attribute and returns the element.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        let _ = self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// Raw text of the class attribute, or `""` when absent.
    #[must_use]
    pub fn class_attribute(&self) -> &str {
        self.attrs.get("class").map_or("", String::as_str)
    }

    /// Returns the set of class names from the class attribute.
    ///
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the element belongs to."
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        self.class_attribute()
            .split(' ')
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// [§ 4.10.5.1.15 Checkbox state](https://html.spec.whatwg.org/multipage/input.html#checkbox-state-(type=checkbox))
    /// [§ 4.10.5.1.16 Radio Button state](https://html.spec.whatwg.org/multipage/input.html#radio-button-state-(type=radio))
    ///
    /// True for an `<input type=checkbox|radio>` whose checkedness is set.
    /// Checkedness is taken from the `checked` content attribute, since the
    /// tree carries no form-control state.
    #[must_use]
    pub fn is_checked_input(&self) -> bool {
        self.tag_name.eq_ignore_ascii_case("input")
            && self.attribute("type").is_some_and(|kind| {
                kind.eq_ignore_ascii_case("checkbox") || kind.eq_ignore_ascii_case("radio")
            })
            && self.attrs.contains_key("checked")
    }
}

/// Arena-based DOM tree.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree."
///
/// The tree also owns its document's URL, which `:target` matching reads
/// the fragment from.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes, indexed by `NodeId`. The Document is at `NodeId::ROOT`.
    nodes: Vec<Node>,
    /// [§ 4.5](https://dom.spec.whatwg.org/#concept-document-url)
    /// "Each document has an associated URL"
    url: String,
}

impl DomTree {
    /// Create a tree containing only the Document node, at `about:blank`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_url("about:blank")
    }

    /// Create a tree containing only the Document node, at `url`.
    #[must_use]
    pub fn with_url(url: &str) -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![document],
            url: url.to_string(),
        }
    }

    /// Get the document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the arena, detached ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false in practice; the Document node is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new, detached node and return its ID.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`. A child that already has
    /// a parent is removed from it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.0].parent {
            self.remove_child(old_parent, child);
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Detaches `child` from `parent`. The subtree stays in the arena and can be
    /// re-attached later. Does nothing if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let siblings = &mut self.nodes[parent.0].children;
        let Some(position) = siblings.iter().position(|&c| c == child) else {
            return;
        };
        let _ = siblings.remove(position);
        self.nodes[child.0].parent = None;
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node, text and comments included.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// [§ 4.2.6](https://dom.spec.whatwg.org/#dom-parentnode-children)
    ///
    /// "The children getter steps are to return an `HTMLCollection` collection
    /// rooted at this matching only element children."
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.as_element(c).is_some())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over the descendants of `id` in tree order (pre-order),
    /// excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#connected)
    ///
    /// "An element is connected if its shadow-including root is a document."
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == NodeId::ROOT || self.ancestors(id).any(|a| a == NodeId::ROOT)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(NodeId::ROOT).next()
    }

    /// The document's URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Replace the document's URL.
    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    /// [§ 7.4.2.3.3 Fragment navigations](https://html.spec.whatwg.org/multipage/browsing-the-web.html#scroll-to-fragid)
    ///
    /// Navigate to `fragment` within the same document. An empty fragment
    /// clears it.
    pub fn set_fragment(&mut self, fragment: &str) {
        let base = url::strip_fragment(&self.url);
        self.url = if fragment.is_empty() {
            base.to_string()
        } else {
            format!("{base}#{fragment}")
        };
    }

    /// The fragment of the document's URL, without the leading `#`.
    #[must_use]
    pub fn location_fragment(&self) -> &str {
        url::fragment(&self.url)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
