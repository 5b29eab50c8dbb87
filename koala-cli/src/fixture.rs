//! JSON DOM fixtures.
//!
//! A fixture is the document URL plus the document's child nodes. Element
//! nodes carry `tag`, text nodes `text` and comment nodes `comment`:
//!
//! ```json
//! {
//!   "url": "https://example.com/guide#intro",
//!   "children": [
//!     { "tag": "html", "children": [
//!       { "tag": "body", "children": [
//!         { "tag": "p", "attrs": { "id": "intro" }, "children": [{ "text": "Hello" }] },
//!         { "comment": "footer" }
//!       ] }
//!     ] }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use anyhow::{Result, ensure};
use koala_dom::{DomTree, ElementData, NodeId, NodeType};
use serde::Deserialize;

/// A whole document.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    /// Document URL. `about:blank` when absent.
    #[serde(default)]
    pub url: Option<String>,
    /// Children of the Document node.
    #[serde(default)]
    pub children: Vec<FixtureNode>,
}

/// One node below the document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FixtureNode {
    /// An element and its subtree.
    Element {
        /// Tag name.
        tag: String,
        /// Attributes, applied in name order.
        #[serde(default)]
        attrs: BTreeMap<String, String>,
        /// Child nodes in tree order.
        #[serde(default)]
        children: Vec<FixtureNode>,
    },
    /// A text node.
    Text {
        /// Character data.
        text: String,
    },
    /// A comment node.
    Comment {
        /// Comment data.
        comment: String,
    },
}

impl Fixture {
    /// Build the arena tree.
    ///
    /// # Errors
    ///
    /// Returns an error if an element has an empty tag name.
    pub fn into_tree(self) -> Result<DomTree> {
        let mut tree = self
            .url
            .as_deref()
            .map_or_else(DomTree::new, DomTree::with_url);
        for child in self.children {
            append(&mut tree, NodeId::ROOT, child)?;
        }
        Ok(tree)
    }
}

fn append(tree: &mut DomTree, parent: NodeId, node: FixtureNode) -> Result<()> {
    let (node_type, children) = match node {
        FixtureNode::Element {
            tag,
            attrs,
            children,
        } => {
            ensure!(!tag.is_empty(), "element without a tag name");
            let data = attrs
                .iter()
                .fold(ElementData::new(&tag), |data, (name, value)| {
                    data.with_attr(name, value)
                });
            (NodeType::Element(data), children)
        }
        FixtureNode::Text { text } => (NodeType::Text(text), Vec::new()),
        FixtureNode::Comment { comment } => (NodeType::Comment(comment), Vec::new()),
    };

    let id = tree.alloc(node_type);
    tree.append_child(parent, id);
    for child in children {
        append(tree, id, child)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(json: &str) -> DomTree {
        serde_json::from_str::<Fixture>(json)
            .unwrap()
            .into_tree()
            .unwrap()
    }

    #[test]
    fn test_builds_tree_in_order() {
        let tree = load(
            r#"{
                "url": "https://example.com/#top",
                "children": [{ "tag": "html", "children": [
                    { "tag": "head" },
                    { "tag": "body", "attrs": { "class": "home" }, "children": [
                        { "text": "hi" },
                        { "comment": "note" }
                    ] }
                ] }]
            }"#,
        );

        assert_eq!(tree.location_fragment(), "top");
        let html = tree.document_element().unwrap();
        let tags: Vec<&str> = tree
            .element_children(html)
            .filter_map(|id| tree.as_element(id))
            .map(|data| data.tag_name.as_str())
            .collect();
        assert_eq!(tags, vec!["head", "body"]);

        let body = tree.element_children(html).nth(1).unwrap();
        assert_eq!(tree.as_element(body).unwrap().class_attribute(), "home");
        assert_eq!(tree.children(body).len(), 2);
        assert_eq!(tree.as_text(tree.children(body)[0]), Some("hi"));
    }

    #[test]
    fn test_missing_url_is_about_blank() {
        let tree = load(r#"{ "children": [] }"#);
        assert_eq!(tree.url(), "about:blank");
        assert_eq!(tree.location_fragment(), "");
    }

    #[test]
    fn test_empty_tag_is_rejected() {
        let fixture: Fixture = serde_json::from_str(r#"{ "children": [{ "tag": "" }] }"#).unwrap();
        assert!(fixture.into_tree().is_err());
    }
}
