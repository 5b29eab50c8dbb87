//! Integration tests for type, id, class and attribute matching and the
//! priority weights they contribute.

use koala_dom::{DomTree, ElementData, NodeId, NodeType};
use koala_selectors::{
    AttributeOperator, AttributeSelector, CompoundSelector, DomElement, PseudoClause, matches,
};

/// Allocate an element and append it to `parent`.
fn append(tree: &mut DomTree, parent: NodeId, data: ElementData) -> NodeId {
    let id = tree.alloc(NodeType::Element(data));
    tree.append_child(parent, id);
    id
}

/// Match and return only the weight.
fn weight(selector: &CompoundSelector, tree: &DomTree, id: NodeId) -> Option<u32> {
    let element = DomElement::new(tree, id).unwrap();
    matches(selector, &element)
        .unwrap()
        .map(|m| m.priority_weight)
}

// =============================================================================
// Type and universal selectors
// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
// =============================================================================

#[test]
fn test_universal_matches_anything_with_zero_weight() {
    let mut tree = DomTree::new();
    let div = append(&mut tree, NodeId::ROOT, ElementData::new("div"));
    let span = append(&mut tree, div, ElementData::new("span").with_attr("id", "x"));
    let detached = tree.alloc(NodeType::Element(ElementData::new("p")));

    let universal = CompoundSelector::universal();
    assert_eq!(weight(&universal, &tree, div), Some(0));
    assert_eq!(weight(&universal, &tree, span), Some(0));
    assert_eq!(weight(&universal, &tree, detached), Some(0));
}

#[test]
fn test_empty_compound_matches_with_zero_weight() {
    let mut tree = DomTree::new();
    let div = append(&mut tree, NodeId::ROOT, ElementData::new("div"));
    assert_eq!(weight(&CompoundSelector::new(), &tree, div), Some(0));
}

#[test]
fn test_type_selector_ignores_ascii_case() {
    let mut tree = DomTree::new();
    let div = append(&mut tree, NodeId::ROOT, ElementData::new("div"));

    assert_eq!(weight(&CompoundSelector::new().with_tag("div"), &tree, div), Some(1));
    assert_eq!(weight(&CompoundSelector::new().with_tag("DIV"), &tree, div), Some(1));
    assert_eq!(weight(&CompoundSelector::new().with_tag("span"), &tree, div), None);
}

// =============================================================================
// ID selectors
// =============================================================================

#[test]
fn test_id_selector_is_case_sensitive() {
    let mut tree = DomTree::new();
    let upper = append(&mut tree, NodeId::ROOT, ElementData::new("div").with_attr("id", "A"));
    let lower = append(&mut tree, NodeId::ROOT, ElementData::new("div").with_attr("id", "a"));

    let selector = CompoundSelector::new().with_id("a");
    assert_eq!(weight(&selector, &tree, upper), None);
    assert_eq!(weight(&selector, &tree, lower), Some(100));
}

#[test]
fn test_id_selector_requires_an_id() {
    let mut tree = DomTree::new();
    let div = append(&mut tree, NodeId::ROOT, ElementData::new("div"));
    assert_eq!(weight(&CompoundSelector::new().with_id("main"), &tree, div), None);
}

// =============================================================================
// Class selectors
// =============================================================================

#[test]
fn test_class_selectors_require_every_class() {
    let mut tree = DomTree::new();
    let div = append(&mut tree, NodeId::ROOT, ElementData::new("div").with_attr("class", "a b c"));

    let a_and_c = CompoundSelector::new().with_class("a").with_class("c");
    assert_eq!(weight(&a_and_c, &tree, div), Some(20));

    let a_and_d = CompoundSelector::new().with_class("a").with_class("d");
    assert_eq!(weight(&a_and_d, &tree, div), None);
}

#[test]
fn test_class_selector_does_not_match_substrings() {
    let mut tree = DomTree::new();
    let div = append(&mut tree, NodeId::ROOT, ElementData::new("div").with_attr("class", "button"));
    assert_eq!(weight(&CompoundSelector::new().with_class("butt"), &tree, div), None);
}

#[test]
fn test_class_tokens_split_on_space() {
    let mut tree = DomTree::new();
    let div = append(&mut tree, NodeId::ROOT, ElementData::new("div").with_attr("class", "x  y"));
    assert_eq!(weight(&CompoundSelector::new().with_class("y"), &tree, div), Some(10));
}

#[test]
fn test_class_selector_without_class_attribute() {
    let mut tree = DomTree::new();
    let div = append(&mut tree, NodeId::ROOT, ElementData::new("div"));
    assert_eq!(weight(&CompoundSelector::new().with_class("a"), &tree, div), None);
}

// =============================================================================
// Attribute selectors
// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
// =============================================================================

#[test]
fn test_attribute_presence() {
    let mut tree = DomTree::new();
    let link = append(&mut tree, NodeId::ROOT, ElementData::new("a").with_attr("href", ""));
    let plain = append(&mut tree, NodeId::ROOT, ElementData::new("a"));

    let selector = CompoundSelector::new().with_attribute(AttributeSelector::exists("href"));
    assert_eq!(weight(&selector, &tree, link), Some(10));
    assert_eq!(weight(&selector, &tree, plain), None);
}

#[test]
fn test_attribute_equals() {
    let mut tree = DomTree::new();
    let text = append(&mut tree, NodeId::ROOT, ElementData::new("input").with_attr("type", "text"));
    let password =
        append(&mut tree, NodeId::ROOT, ElementData::new("input").with_attr("type", "password"));

    let selector = CompoundSelector::new().with_attribute(AttributeSelector::with_value(
        "type",
        AttributeOperator::Equals,
        "text",
    ));
    assert_eq!(weight(&selector, &tree, text), Some(10));
    assert_eq!(weight(&selector, &tree, password), None);
}

#[test]
fn test_attribute_value_required_but_empty() {
    let mut tree = DomTree::new();
    let empty = append(&mut tree, NodeId::ROOT, ElementData::new("div").with_attr("title", ""));

    let selector = CompoundSelector::new().with_attribute(AttributeSelector::with_value(
        "title",
        AttributeOperator::Equals,
        "",
    ));
    assert_eq!(weight(&selector, &tree, empty), None);
}

#[test]
fn test_attribute_pattern_operators() {
    let mut tree = DomTree::new();
    let img = append(
        &mut tree,
        NodeId::ROOT,
        ElementData::new("img")
            .with_attr("src", "https://cdn.example.com/photo.png")
            .with_attr("lang", "en-US")
            .with_attr("data-tags", "wide hero dark"),
    );

    let cases = [
        (AttributeSelector::with_value("src", AttributeOperator::PrefixMatch, "https://"), true),
        (AttributeSelector::with_value("src", AttributeOperator::SuffixMatch, ".png"), true),
        (AttributeSelector::with_value("src", AttributeOperator::SuffixMatch, ".jpg"), false),
        (AttributeSelector::with_value("src", AttributeOperator::SubstringMatch, "cdn"), true),
        (AttributeSelector::with_value("lang", AttributeOperator::DashMatch, "en"), true),
        (AttributeSelector::with_value("lang", AttributeOperator::DashMatch, "e"), false),
        (AttributeSelector::with_value("data-tags", AttributeOperator::Includes, "hero"), true),
        (AttributeSelector::with_value("data-tags", AttributeOperator::Includes, "her"), false),
    ];

    for (attribute, expected) in cases {
        let description = attribute.to_string();
        let selector = CompoundSelector::new().with_attribute(attribute);
        assert_eq!(
            weight(&selector, &tree, img).is_some(),
            expected,
            "{description}"
        );
    }
}

#[test]
fn test_attribute_case_insensitive_flag() {
    let mut tree = DomTree::new();
    let input = append(&mut tree, NodeId::ROOT, ElementData::new("input").with_attr("type", "TEXT"));

    let sensitive = AttributeSelector::with_value("type", AttributeOperator::Equals, "text");
    let insensitive = sensitive.clone().ignore_case();

    assert_eq!(weight(&CompoundSelector::new().with_attribute(sensitive), &tree, input), None);
    assert_eq!(
        weight(&CompoundSelector::new().with_attribute(insensitive), &tree, input),
        Some(10)
    );
}

#[test]
fn test_every_attribute_adds_weight() {
    let mut tree = DomTree::new();
    let input = append(
        &mut tree,
        NodeId::ROOT,
        ElementData::new("input")
            .with_attr("type", "email")
            .with_attr("required", ""),
    );

    let selector = CompoundSelector::new()
        .with_attribute(AttributeSelector::with_value("type", AttributeOperator::Equals, "email"))
        .with_attribute(AttributeSelector::exists("required"));
    assert_eq!(weight(&selector, &tree, input), Some(20));
}

// =============================================================================
// Whole compound behavior
// =============================================================================

#[test]
fn test_compound_weight_is_summed() {
    // input#agree.required[type="checkbox"]:checked
    let mut tree = DomTree::new();
    let form = append(&mut tree, NodeId::ROOT, ElementData::new("form"));
    let input = append(
        &mut tree,
        form,
        ElementData::new("input")
            .with_attr("id", "agree")
            .with_attr("class", "required")
            .with_attr("type", "checkbox")
            .with_attr("checked", ""),
    );

    let selector = CompoundSelector::new()
        .with_tag("input")
        .with_id("agree")
        .with_class("required")
        .with_attribute(AttributeSelector::with_value(
            "type",
            AttributeOperator::Equals,
            "checkbox",
        ))
        .with_pseudo(PseudoClause::new("checked"));

    assert_eq!(weight(&selector, &tree, input), Some(1 + 100 + 10 + 10 + 10));
    assert_eq!(
        selector.to_string(),
        "input#agree.required[type=\"checkbox\"]:checked"
    );
}

#[test]
fn test_structural_failure_short_circuits_pseudo_classes() {
    // The invalid :nth-child is never reached because the tag already failed
    let mut tree = DomTree::new();
    let div = append(&mut tree, NodeId::ROOT, ElementData::new("div"));
    let selector = CompoundSelector::new()
        .with_tag("span")
        .with_pseudo(PseudoClause::new("nth-child"));

    let element = DomElement::new(&tree, div).unwrap();
    assert_eq!(matches(&selector, &element), Ok(None));
}

#[test]
fn test_pseudo_element_never_matches() {
    let mut tree = DomTree::new();
    let p = append(&mut tree, NodeId::ROOT, ElementData::new("p"));

    let before = CompoundSelector::new().with_tag("p").pseudo_element("before");
    assert_eq!(weight(&before, &tree, p), None);
    assert_eq!(before.to_string(), "p::before");
}

#[test]
fn test_matching_is_idempotent() {
    let mut tree = DomTree::new();
    let ul = append(&mut tree, NodeId::ROOT, ElementData::new("ul"));
    let li = append(&mut tree, ul, ElementData::new("li").with_attr("class", "item"));

    let selector = CompoundSelector::new()
        .with_tag("li")
        .with_class("item")
        .with_pseudo(PseudoClause::new("last-child"));
    let element = DomElement::new(&tree, li).unwrap();

    let first = selector.matches(&element);
    let second = selector.matches(&element);
    assert_eq!(first, second);
    assert_eq!(first.unwrap().map(|m| m.priority_weight), Some(21));
}
