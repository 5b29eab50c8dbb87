//! The read-only view of a tree node that selector matching needs.

/// [§ 3.2 Data Models](https://www.w3.org/TR/selectors-4/#data-model)
///
/// "Selectors are evaluated against an element tree such as the DOM."
///
/// Implementors expose exactly the element state the matcher reads. The
/// matcher never mutates anything through this trait, so the tree must
/// not change for the duration of a `matches` call.
pub trait Element: Clone + PartialEq {
    /// The element's local name. Compared ignoring ASCII case.
    fn tag_name(&self) -> &str;

    /// The element's id, or `""` when it has none.
    fn id(&self) -> &str;

    /// Raw text of the class attribute, or `""` when absent.
    fn class_attribute(&self) -> &str;

    /// Value of the named attribute, `None` when the attribute is absent.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Element children in document order. Text and comments are skipped.
    fn children(&self) -> Vec<Self>;

    /// The parent node, whether it is an element or the document itself.
    /// Sibling-position pseudo-classes index into this node's children.
    fn parent(&self) -> Option<Self>;

    /// The parent, only if it is an element. Combinator traversal walks
    /// this chain so the document node is never tested against a selector.
    fn parent_element(&self) -> Option<Self>;

    /// [§ 4.4](https://dom.spec.whatwg.org/#connected) Whether the element
    /// is in a document.
    fn is_connected(&self) -> bool;

    /// True only for a checkbox or radio input that is currently checked.
    fn is_checked_input(&self) -> bool;

    /// Fragment of the owning document's URL without the leading `#`, or
    /// `""` when there is none.
    fn document_location_fragment(&self) -> &str;
}
