//! Compound selector descriptors.
//!
//! A [`CompoundSelector`] is produced once by whatever parses selector text
//! and is then matched against any number of elements. Nothing in this crate
//! mutates a descriptor after it is built.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

use crate::nth::NthFormula;

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
///
/// Example: `input#agree.required[type="checkbox"]:checked`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompoundSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// `"*"` is the universal selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_names: Option<Vec<String>>,

    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AttributeSelector>>,

    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pseudos: Option<Vec<PseudoClause>>,

    /// [§ 3.6 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
    /// A pseudo-element never matches a real element.
    pub is_pseudo_element: bool,

    /// How this compound relates to the one on its left. Only the combinator
    /// traversal reads this; it is ignored on the leftmost compound.
    pub combinator: Combinator,
}

impl CompoundSelector {
    /// An empty compound, which matches every element with weight 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `*`
    #[must_use]
    pub fn universal() -> Self {
        Self::new().with_tag("*")
    }

    /// Set the type selector.
    #[must_use]
    pub fn with_tag(mut self, tag_name: &str) -> Self {
        self.tag_name = Some(tag_name.to_string());
        self
    }

    /// Set the ID selector.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Add a class selector. Repeating a class has no effect.
    #[must_use]
    pub fn with_class(mut self, class_name: &str) -> Self {
        let classes = self.class_names.get_or_insert_with(Vec::new);
        if !classes.iter().any(|c| c == class_name) {
            classes.push(class_name.to_string());
        }
        self
    }

    /// Add an attribute selector.
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeSelector) -> Self {
        self.attributes.get_or_insert_with(Vec::new).push(attribute);
        self
    }

    /// Add a pseudo-class clause.
    #[must_use]
    pub fn with_pseudo(mut self, clause: PseudoClause) -> Self {
        self.pseudos.get_or_insert_with(Vec::new).push(clause);
        self
    }

    /// Mark this compound as a pseudo-element such as `::before`.
    #[must_use]
    pub fn pseudo_element(mut self, name: &str) -> Self {
        self.is_pseudo_element = true;
        self.with_pseudo(PseudoClause::new(name))
    }

    /// Set the combinator joining this compound to the previous one.
    #[must_use]
    pub fn with_combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combinator {
    /// [§ 16.1](https://www.w3.org/TR/selectors-4/#descendant-combinators) `A B`
    #[default]
    Descendant,
    /// [§ 16.2](https://www.w3.org/TR/selectors-4/#child-combinators) `A > B`
    Child,
    /// [§ 16.3](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators) `A + B`
    NextSibling,
    /// [§ 16.4](https://www.w3.org/TR/selectors-4/#general-sibling-combinators) `A ~ B`
    SubsequentSibling,
}

/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSelector {
    /// Attribute name, matched exactly.
    pub name: String,
    /// How `value` is compared against the element's attribute.
    #[serde(default)]
    pub operator: AttributeOperator,
    /// Required value. `None` only tests for presence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// [§ 6.3](https://www.w3.org/TR/selectors-4/#attribute-case) The `i` flag.
    #[serde(default)]
    pub case_insensitive: bool,
}

impl AttributeSelector {
    /// `[name]`
    #[must_use]
    pub fn exists(name: &str) -> Self {
        Self {
            name: name.to_string(),
            operator: AttributeOperator::Exists,
            value: None,
            case_insensitive: false,
        }
    }

    /// `[name<op>"value"]`
    #[must_use]
    pub fn with_value(name: &str, operator: AttributeOperator, value: &str) -> Self {
        Self {
            name: name.to_string(),
            operator,
            value: Some(value.to_string()),
            case_insensitive: false,
        }
    }

    /// Test an element's attribute value against the required value.
    /// A value given with [`AttributeOperator::Exists`] is compared exactly.
    #[must_use]
    pub fn matches_value(&self, actual: &str) -> bool {
        let Some(expected) = &self.value else {
            return true;
        };
        let operator = match self.operator {
            AttributeOperator::Exists => AttributeOperator::Equals,
            operator => operator,
        };
        operator.matches(actual, expected, self.case_insensitive)
    }

    /// Compare values ignoring ASCII case, as the `i` flag does.
    #[must_use]
    pub fn ignore_case(mut self) -> Self {
        self.case_insensitive = true;
        self
    }
}

/// Attribute value comparison, decided when the selector is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeOperator {
    /// `[attr]`: "Represents an element with the att attribute"
    #[default]
    Exists,
    /// `[attr=val]`: "whose value is exactly 'val'"
    Equals,
    /// `[attr~=val]`: "a whitespace-separated list of words, one of which is exactly 'val'"
    Includes,
    /// `[attr|=val]`: "either being exactly 'val' or beginning with 'val' immediately followed by '-'"
    DashMatch,
    /// `[attr^=val]`: "begins with the prefix 'val'"
    PrefixMatch,
    /// `[attr$=val]`: "ends with the suffix 'val'"
    SuffixMatch,
    /// `[attr*=val]`: "contains at least one instance of the substring 'val'"
    SubstringMatch,
}

impl AttributeOperator {
    /// The operator as written between the name and the value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exists => "",
            Self::Equals => "=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
            Self::PrefixMatch => "^=",
            Self::SuffixMatch => "$=",
            Self::SubstringMatch => "*=",
        }
    }

    /// Test `actual` against `expected`.
    ///
    /// "If 'val' is the empty string", the `~=`, `^=`, `$=` and `*=` forms
    /// "represent nothing".
    #[must_use]
    pub fn matches(self, actual: &str, expected: &str, case_insensitive: bool) -> bool {
        let (actual, expected) = if case_insensitive {
            (actual.to_ascii_lowercase(), expected.to_ascii_lowercase())
        } else {
            (actual.to_string(), expected.to_string())
        };

        match self {
            Self::Exists => true,
            Self::Equals => actual == expected,
            Self::Includes => {
                !expected.is_empty() && actual.split_ascii_whitespace().any(|w| w == expected)
            }
            Self::DashMatch => {
                actual == expected
                    || actual
                        .strip_prefix(expected.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            Self::PrefixMatch => !expected.is_empty() && actual.starts_with(expected.as_str()),
            Self::SuffixMatch => !expected.is_empty() && actual.ends_with(expected.as_str()),
            Self::SubstringMatch => !expected.is_empty() && actual.contains(expected.as_str()),
        }
    }
}

/// Pseudo-classes the matcher understands.
///
/// Names are resolved to this enum once, when a [`PseudoClause`] is built,
/// so matching never dispatches on strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PseudoClass {
    /// [§ 14.3.1 `:first-child`](https://www.w3.org/TR/selectors-4/#the-first-child-pseudo)
    FirstChild,
    /// [§ 14.3.2 `:last-child`](https://www.w3.org/TR/selectors-4/#the-last-child-pseudo)
    LastChild,
    /// [§ 14.3.3 `:only-child`](https://www.w3.org/TR/selectors-4/#the-only-child-pseudo)
    OnlyChild,
    /// [§ 14.4.1 `:first-of-type`](https://www.w3.org/TR/selectors-4/#the-first-of-type-pseudo)
    FirstOfType,
    /// [§ 14.4.2 `:last-of-type`](https://www.w3.org/TR/selectors-4/#the-last-of-type-pseudo)
    LastOfType,
    /// [§ 14.4.3 `:only-of-type`](https://www.w3.org/TR/selectors-4/#the-only-of-type-pseudo)
    OnlyOfType,
    /// [§ 13.3.2 `:checked`](https://www.w3.org/TR/selectors-4/#checked)
    Checked,
    /// [§ 14.2 `:empty`](https://www.w3.org/TR/selectors-4/#the-empty-pseudo)
    Empty,
    /// [§ 14.1 `:root`](https://www.w3.org/TR/selectors-4/#the-root-pseudo)
    Root,
    /// [§ 4.3 `:not()`](https://www.w3.org/TR/selectors-4/#negation)
    Not,
    /// [§ 14.3.4 `:nth-child()`](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
    NthChild,
    /// [§ 14.4.4 `:nth-of-type()`](https://www.w3.org/TR/selectors-4/#the-nth-of-type-pseudo)
    NthOfType,
    /// [§ 14.3.5 `:nth-last-child()`](https://www.w3.org/TR/selectors-4/#the-nth-last-child-pseudo)
    NthLastChild,
    /// [§ 14.4.5 `:nth-last-of-type()`](https://www.w3.org/TR/selectors-4/#the-nth-last-of-type-pseudo)
    NthLastOfType,
    /// [§ 8.2 `:target`](https://www.w3.org/TR/selectors-4/#the-target-pseudo)
    Target,
    /// [§ 4.2 `:is()`](https://www.w3.org/TR/selectors-4/#matches)
    Is,
    /// [§ 4.4 `:where()`](https://www.w3.org/TR/selectors-4/#zero-matches)
    Where,
}

impl PseudoClass {
    /// Functional pseudo-classes that are meaningless without an argument.
    #[must_use]
    pub const fn requires_argument(self) -> bool {
        matches!(
            self,
            Self::Not | Self::NthChild | Self::NthOfType | Self::NthLastChild | Self::NthLastOfType
        )
    }

    /// Pseudo-classes that index into the parent's child list.
    #[must_use]
    pub const fn depends_on_position(self) -> bool {
        matches!(
            self,
            Self::FirstChild
                | Self::LastChild
                | Self::OnlyChild
                | Self::FirstOfType
                | Self::LastOfType
                | Self::OnlyOfType
                | Self::NthChild
                | Self::NthOfType
                | Self::NthLastChild
                | Self::NthLastOfType
        )
    }

    /// The `:nth-*` family.
    #[must_use]
    pub const fn is_nth(self) -> bool {
        matches!(
            self,
            Self::NthChild | Self::NthOfType | Self::NthLastChild | Self::NthLastOfType
        )
    }
}

/// One pseudo-class (or pseudo-element name) in a compound selector.
///
/// `kind` is `None` for names this crate does not recognize; such clauses
/// never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PseudoClauseRepr", into = "PseudoClauseRepr")]
pub struct PseudoClause {
    /// The name as written, without colons.
    pub name: String,
    /// The recognized pseudo-class, resolved from `name`.
    pub kind: Option<PseudoClass>,
    /// Raw argument text between the parentheses.
    pub arguments: Option<String>,
    /// Nested selector list of `:not()`, `:is()`, `:where()` or the
    /// `of S` part of `:nth-child()` / `:nth-last-child()`.
    pub selectors: Option<Vec<CompoundSelector>>,
    /// Compiled `An+B` of the `:nth-*` family.
    pub nth: Option<NthFormula>,
}

impl PseudoClause {
    /// A clause without arguments, such as `:first-child`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: name.parse().ok(),
            arguments: None,
            selectors: None,
            nth: None,
        }
    }

    /// Set the raw argument text. For the `:nth-*` family the `An+B` part
    /// (everything before an `of`) is compiled as well.
    #[must_use]
    pub fn with_arguments(mut self, arguments: &str) -> Self {
        if self.kind.is_some_and(PseudoClass::is_nth) && self.nth.is_none() {
            let formula = arguments
                .split_once(" of ")
                .map_or(arguments, |(formula, _)| formula);
            self.nth = formula.parse().ok();
        }
        self.arguments = Some(arguments.to_string());
        self
    }

    /// Set the nested selector list and regenerate the argument text.
    #[must_use]
    pub fn with_selectors(mut self, selectors: Vec<CompoundSelector>) -> Self {
        self.selectors = Some(selectors);
        self.arguments = Some(self.generated_arguments());
        self
    }

    /// Set the `An+B` formula and regenerate the argument text.
    #[must_use]
    pub fn with_nth(mut self, nth: NthFormula) -> Self {
        self.nth = Some(nth);
        self.arguments = Some(self.generated_arguments());
        self
    }

    fn generated_arguments(&self) -> String {
        let list = self.selectors.as_deref().map(selector_list_text);
        match (self.nth, list) {
            (Some(nth), Some(list)) => format!("{nth} of {list}"),
            (Some(nth), None) => nth.to_string(),
            (None, Some(list)) => list,
            (None, None) => String::new(),
        }
    }
}

/// Serialized shape of a [`PseudoClause`]; `kind` is re-derived on load and
/// missing argument text is regenerated from `nth` and `selectors`.
#[derive(Serialize, Deserialize)]
struct PseudoClauseRepr {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arguments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selectors: Option<Vec<CompoundSelector>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nth: Option<NthFormula>,
}

impl From<PseudoClauseRepr> for PseudoClause {
    fn from(repr: PseudoClauseRepr) -> Self {
        let mut clause = Self::new(&repr.name);
        clause.nth = repr.nth;
        clause.selectors = repr.selectors;
        match repr.arguments {
            Some(arguments) => clause.with_arguments(&arguments),
            None if clause.nth.is_some() || clause.selectors.is_some() => {
                clause.arguments = Some(clause.generated_arguments());
                clause
            }
            None => clause,
        }
    }
}

impl From<PseudoClause> for PseudoClauseRepr {
    fn from(clause: PseudoClause) -> Self {
        Self {
            name: clause.name,
            arguments: clause.arguments,
            selectors: clause.selectors,
            nth: clause.nth,
        }
    }
}

fn selector_list_text(selectors: &[CompoundSelector]) -> String {
    selectors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Canonical text of the compound, e.g. `input#agree.required[type="checkbox"]:checked`.
///
/// Only used for diagnostics; matching never looks at it.
impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut written = false;

        if let Some(tag) = &self.tag_name {
            f.write_str(tag)?;
            written = true;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
            written = true;
        }
        for class in self.class_names.iter().flatten() {
            write!(f, ".{class}")?;
            written = true;
        }
        for attribute in self.attributes.iter().flatten() {
            write!(f, "{attribute}")?;
            written = true;
        }

        let prefix = if self.is_pseudo_element { "::" } else { ":" };
        for clause in self.pseudos.iter().flatten() {
            write!(f, "{prefix}{}", clause.name)?;
            if let Some(arguments) = &clause.arguments {
                write!(f, "({arguments})")?;
            }
            written = true;
        }

        if written { Ok(()) } else { f.write_str("*") }
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.name)?;
        if let Some(value) = &self.value {
            let operator = match self.operator {
                AttributeOperator::Exists => AttributeOperator::Equals,
                operator => operator,
            };
            write!(f, "{}\"{value}\"", operator.as_str())?;
            if self.case_insensitive {
                f.write_str(" i")?;
            }
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudo_class_names_resolve() {
        assert_eq!(PseudoClause::new("first-child").kind, Some(PseudoClass::FirstChild));
        assert_eq!(
            PseudoClause::new("nth-last-of-type").kind,
            Some(PseudoClass::NthLastOfType)
        );
        assert_eq!(PseudoClause::new("Only-Of-Type").kind, Some(PseudoClass::OnlyOfType));
        assert_eq!(PseudoClause::new("hover").kind, None);
    }

    #[test]
    fn test_with_arguments_compiles_nth() {
        let clause = PseudoClause::new("nth-child").with_arguments("2n+1 of .item");
        assert_eq!(clause.nth, Some(NthFormula::odd()));
        assert_eq!(clause.arguments.as_deref(), Some("2n+1 of .item"));

        // Only the nth family compiles a formula
        let clause = PseudoClause::new("not").with_arguments("3");
        assert_eq!(clause.nth, None);
    }

    #[test]
    fn test_generated_arguments() {
        let clause = PseudoClause::new("nth-child")
            .with_nth(NthFormula::even())
            .with_selectors(vec![CompoundSelector::new().with_class("item")]);
        assert_eq!(clause.arguments.as_deref(), Some("2n of .item"));
    }

    #[test]
    fn test_with_class_dedupes() {
        let selector = CompoundSelector::new().with_class("a").with_class("a");
        assert_eq!(selector.class_names, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_attribute_operators() {
        use AttributeOperator as Op;
        assert!(Op::Equals.matches("text", "text", false));
        assert!(!Op::Equals.matches("Text", "text", false));
        assert!(Op::Equals.matches("Text", "text", true));
        assert!(Op::Includes.matches("btn active", "active", false));
        assert!(!Op::Includes.matches("btn inactive", "active", false));
        assert!(Op::DashMatch.matches("en", "en", false));
        assert!(Op::DashMatch.matches("en-US", "en", false));
        assert!(!Op::DashMatch.matches("english", "en", false));
        assert!(Op::PrefixMatch.matches("https://x", "https", false));
        assert!(Op::SuffixMatch.matches("photo.png", ".png", false));
        assert!(Op::SubstringMatch.matches("my-dark-mode", "dark", false));
        assert!(!Op::SubstringMatch.matches("anything", "", false));
    }
}
