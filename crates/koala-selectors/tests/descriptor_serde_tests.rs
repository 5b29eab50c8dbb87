//! Loading selector descriptors from JSON, the format `koala-select` reads.

use koala_selectors::{AttributeOperator, Combinator, CompoundSelector, NthFormula, PseudoClass};

#[test]
fn test_minimal_descriptor_defaults() {
    let selector: CompoundSelector = serde_json::from_str("{}").unwrap();
    assert_eq!(selector, CompoundSelector::new());
    assert_eq!(selector.combinator, Combinator::Descendant);
}

#[test]
fn test_full_descriptor() {
    let json = r#"{
        "tag_name": "input",
        "id": "agree",
        "class_names": ["required"],
        "attributes": [
            { "name": "type", "operator": "equals", "value": "checkbox" },
            { "name": "lang", "operator": "dash_match", "value": "EN", "case_insensitive": true },
            { "name": "disabled" }
        ],
        "pseudos": [{ "name": "checked" }],
        "combinator": "child"
    }"#;
    let selector: CompoundSelector = serde_json::from_str(json).unwrap();

    assert_eq!(selector.tag_name.as_deref(), Some("input"));
    assert_eq!(selector.combinator, Combinator::Child);

    let attributes = selector.attributes.as_deref().unwrap();
    assert_eq!(attributes[0].operator, AttributeOperator::Equals);
    assert_eq!(attributes[1].operator, AttributeOperator::DashMatch);
    assert!(attributes[1].case_insensitive);
    assert_eq!(attributes[2].operator, AttributeOperator::Exists);
    assert_eq!(attributes[2].value, None);

    let pseudos = selector.pseudos.as_deref().unwrap();
    assert_eq!(pseudos[0].kind, Some(PseudoClass::Checked));
}

#[test]
fn test_pseudo_clause_kind_and_nth_are_derived() {
    let json = r#"{ "pseudos": [
        { "name": "NTH-CHILD", "arguments": "odd of .item", "selectors": [{ "class_names": ["item"] }] },
        { "name": "hover" }
    ] }"#;
    let selector: CompoundSelector = serde_json::from_str(json).unwrap();
    let pseudos = selector.pseudos.as_deref().unwrap();

    assert_eq!(pseudos[0].kind, Some(PseudoClass::NthChild));
    assert_eq!(pseudos[0].nth, Some(NthFormula::odd()));
    assert_eq!(pseudos[0].selectors.as_ref().map(Vec::len), Some(1));
    assert_eq!(pseudos[1].kind, None);
}

#[test]
fn test_arguments_are_generated_when_omitted() {
    let json = r#"{ "pseudos": [{ "name": "nth-of-type", "nth": { "a": 3, "b": -1 } }] }"#;
    let selector: CompoundSelector = serde_json::from_str(json).unwrap();
    let clause = &selector.pseudos.as_deref().unwrap()[0];
    assert_eq!(clause.nth, Some(NthFormula::new(3, -1)));
    assert_eq!(clause.arguments.as_deref(), Some("3n-1"));

    let json = r#"{ "pseudos": [{ "name": "not", "selectors": [{ "id": "skip" }] }] }"#;
    let selector: CompoundSelector = serde_json::from_str(json).unwrap();
    let clause = &selector.pseudos.as_deref().unwrap()[0];
    assert_eq!(clause.arguments.as_deref(), Some("#skip"));
}

#[test]
fn test_serialize_skips_unset_fields() {
    let selector = CompoundSelector::new().with_tag("p").with_class("lead");
    let value = serde_json::to_value(&selector).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "tag_name": "p",
            "class_names": ["lead"],
            "is_pseudo_element": false,
            "combinator": "descendant"
        })
    );

    let back: CompoundSelector = serde_json::from_value(value).unwrap();
    assert_eq!(back, selector);
}

#[test]
fn test_unknown_operator_is_rejected() {
    let json = r#"{ "attributes": [{ "name": "x", "operator": "regex", "value": "a" }] }"#;
    assert!(serde_json::from_str::<CompoundSelector>(json).is_err());
}
