//! [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
//!
//! Matching of one compound selector against one element, and the priority
//! weight it contributes to the cascade.
//!
//! Weights: a concrete type selector is worth 1, an ID 100, and each class,
//! attribute and pseudo-class 10. `*` and `:where()` are worth 0, and `:is()`
//! is worth whatever its last matching alternative is worth.

#[cfg(feature = "match-trace")]
use std::cell::Cell;

use koala_common::warning::warn_once;

use crate::element::Element;
use crate::error::SelectorError;
use crate::selector::{CompoundSelector, PseudoClass, PseudoClause};

#[cfg(feature = "match-trace")]
thread_local! {
    static MATCH_DEPTH: Cell<usize> = const { Cell::new(0) };
}

const TYPE_WEIGHT: u32 = 1;
const ID_WEIGHT: u32 = 100;
const CLASS_WEIGHT: u32 = 10;
const ATTRIBUTE_WEIGHT: u32 = 10;
const PSEUDO_CLASS_WEIGHT: u32 = 10;

/// A successful match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match {
    /// Cascade ordering weight accumulated by every satisfied condition.
    pub priority_weight: u32,
}

/// `Ok(None)` is an ordinary non-match.
pub type MatchResult = Result<Option<Match>, SelectorError>;

impl CompoundSelector {
    /// Match this compound against `element`. See [`matches`].
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::InvalidSelector`] if a functional pseudo-class
    /// is missing its argument.
    pub fn matches<E: Element>(&self, element: &E) -> MatchResult {
        matches(self, element)
    }
}

/// Match `selector` against `element`.
///
/// Conditions are checked in order: pseudo-element, type, id, classes,
/// attributes, pseudo-classes. The first failing condition ends the match
/// and no weight is reported.
///
/// # Errors
///
/// Returns [`SelectorError::InvalidSelector`] if `:not`, `:nth-child`,
/// `:nth-of-type`, `:nth-last-child` or `:nth-last-of-type` has no argument.
/// Blank argument text counts as missing. The error is never raised when a
/// structural condition or an earlier pseudo-class clause already failed.
pub fn matches<E: Element>(selector: &CompoundSelector, element: &E) -> MatchResult {
    #[cfg(feature = "match-trace")]
    let depth = MATCH_DEPTH.with(|d| {
        let current = d.get();
        d.set(current + 1);
        current
    });

    let result = match_compound(selector, element);

    #[cfg(feature = "match-trace")]
    {
        MATCH_DEPTH.with(|d| d.set(depth));
        eprintln!(
            "{:indent$}[match] {selector} against <{}> -> {result:?}",
            "",
            element.tag_name(),
            indent = depth * 2
        );
    }

    result
}

fn match_compound<E: Element>(selector: &CompoundSelector, element: &E) -> MatchResult {
    // [§ 3.6](https://www.w3.org/TR/selectors-4/#pseudo-elements)
    // Pseudo-elements are not elements of the document tree.
    if selector.is_pseudo_element {
        return Ok(None);
    }

    let Some(structural) = match_structure(selector, element) else {
        return Ok(None);
    };

    let Some(pseudo) = match_pseudo_classes(selector, element)? else {
        return Ok(None);
    };

    Ok(Some(Match {
        priority_weight: structural + pseudo,
    }))
}

/// Type, id, class and attribute conditions. Returns their summed weight.
fn match_structure<E: Element>(selector: &CompoundSelector, element: &E) -> Option<u32> {
    let mut weight = 0;

    // [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    // [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    // "The universal selector ... represents the qualified name of any element type."
    match selector.tag_name.as_deref() {
        None | Some("*") => {}
        Some(tag) => {
            if !element.tag_name().eq_ignore_ascii_case(tag) {
                return None;
            }
            weight += TYPE_WEIGHT;
        }
    }

    // [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    // Case-sensitive in standards mode.
    if let Some(id) = selector.id.as_deref() {
        if element.id() != id {
            return None;
        }
        weight += ID_WEIGHT;
    }

    // [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    if let Some(class_names) = &selector.class_names {
        let class_text = element.class_attribute();
        for class_name in class_names {
            if !class_text.split(' ').any(|token| token == class_name) {
                return None;
            }
            weight += CLASS_WEIGHT;
        }
    }

    // [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    if let Some(attributes) = &selector.attributes {
        for attribute in attributes {
            let actual = element.attribute(&attribute.name)?;
            weight += ATTRIBUTE_WEIGHT;

            // An empty attribute never satisfies a required value
            if attribute.value.is_some()
                && (actual.is_empty() || !attribute.matches_value(actual))
            {
                return None;
            }
        }
    }

    Some(weight)
}

/// All pseudo-class clauses, combined with AND. Returns their summed weight.
fn match_pseudo_classes<E: Element>(
    selector: &CompoundSelector,
    element: &E,
) -> Result<Option<u32>, SelectorError> {
    let Some(clauses) = selector.pseudos.as_deref() else {
        return Ok(Some(0));
    };

    let parent = element.parent();
    let mut weight = 0;
    for clause in clauses {
        let Some(kind) = clause.kind else {
            warn_once(
                "Selectors",
                &format!("unsupported pseudo-class ':{}' never matches", clause.name),
            );
            return Ok(None);
        };

        // A functional pseudo-class without its argument makes the whole
        // selector invalid, unless an earlier clause already failed.
        if kind.requires_argument() && !has_argument(clause) {
            return Err(SelectorError::InvalidSelector {
                selector: selector.to_string(),
            });
        }

        // Selectors Level 4 lets child-indexed pseudo-classes match parentless
        // elements; this engine does not.
        if parent.is_none() && kind.depends_on_position() {
            return Ok(None);
        }

        match match_pseudo_class(kind, clause, element, parent.as_ref())? {
            Some(clause_weight) => weight += clause_weight,
            None => return Ok(None),
        }
    }

    Ok(Some(weight))
}

/// Evaluate a single clause. `parent` is only `None` for clauses that do not
/// depend on sibling position.
fn match_pseudo_class<E: Element>(
    kind: PseudoClass,
    clause: &PseudoClause,
    element: &E,
    parent: Option<&E>,
) -> Result<Option<u32>, SelectorError> {
    let satisfied = |matched: bool| matched.then_some(PSEUDO_CLASS_WEIGHT);
    let siblings = || parent.map(E::children).unwrap_or_default();

    let weight = match kind {
        // [§ 14.3.1](https://www.w3.org/TR/selectors-4/#the-first-child-pseudo)
        // "first among its inclusive siblings"
        PseudoClass::FirstChild => satisfied(siblings().first() == Some(element)),

        // [§ 14.3.2](https://www.w3.org/TR/selectors-4/#the-last-child-pseudo)
        // "last among its inclusive siblings"
        PseudoClass::LastChild => satisfied(siblings().last() == Some(element)),

        // [§ 14.3.3](https://www.w3.org/TR/selectors-4/#the-only-child-pseudo)
        // "an element that has no siblings"
        PseudoClass::OnlyChild => satisfied(siblings().as_slice() == std::slice::from_ref(element)),

        // [§ 14.4.1](https://www.w3.org/TR/selectors-4/#the-first-of-type-pseudo)
        // "the first sibling of its type"
        PseudoClass::FirstOfType => satisfied(
            siblings()
                .iter()
                .find(|&sibling| same_type(sibling, element))
                == Some(element),
        ),

        // [§ 14.4.2](https://www.w3.org/TR/selectors-4/#the-last-of-type-pseudo)
        // "the last sibling of its type"
        PseudoClass::LastOfType => satisfied(
            siblings()
                .iter()
                .rev()
                .find(|&sibling| same_type(sibling, element))
                == Some(element),
        ),

        // [§ 14.4.3](https://www.w3.org/TR/selectors-4/#the-only-of-type-pseudo)
        // "an element that has no siblings with the same expanded element name"
        PseudoClass::OnlyOfType => {
            let siblings = siblings();
            let mut of_type = siblings.iter().filter(|&sibling| same_type(sibling, element));
            satisfied(of_type.next() == Some(element) && of_type.next().is_none())
        }

        // [§ 13.3.2](https://www.w3.org/TR/selectors-4/#checked)
        PseudoClass::Checked => satisfied(element.is_checked_input()),

        // [§ 14.2](https://www.w3.org/TR/selectors-4/#the-empty-pseudo)
        // Only element children count; text content does not.
        PseudoClass::Empty => satisfied(element.children().is_empty()),

        // [§ 14.1](https://www.w3.org/TR/selectors-4/#the-root-pseudo)
        // "In HTML, this is the html element."
        PseudoClass::Root => satisfied(element.tag_name().eq_ignore_ascii_case("html")),

        // [§ 4.3](https://www.w3.org/TR/selectors-4/#negation)
        // Only the first alternative of the list is consulted.
        PseudoClass::Not => match clause.selectors.as_deref().and_then(|list| list.first()) {
            Some(negated) => satisfied(matches(negated, element)?.is_none()),
            None => None,
        },

        // [§ 14.3.4](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
        // [§ 14.3.5](https://www.w3.org/TR/selectors-4/#the-nth-last-child-pseudo)
        PseudoClass::NthChild | PseudoClass::NthLastChild => {
            let mut candidates = Vec::new();
            for sibling in siblings() {
                let qualifies = match clause.selectors.as_deref() {
                    Some(filter) => any_matches(filter, &sibling)?.is_some(),
                    None => true,
                };
                if qualifies {
                    candidates.push(sibling);
                }
            }
            satisfied(nth_position_matches(
                clause,
                candidates,
                element,
                kind == PseudoClass::NthLastChild,
            ))
        }

        // [§ 14.4.4](https://www.w3.org/TR/selectors-4/#the-nth-of-type-pseudo)
        // [§ 14.4.5](https://www.w3.org/TR/selectors-4/#the-nth-last-of-type-pseudo)
        PseudoClass::NthOfType | PseudoClass::NthLastOfType => {
            if parent.is_none() {
                return Ok(None);
            }
            let candidates = siblings()
                .into_iter()
                .filter(|sibling| same_type(sibling, element))
                .collect();
            satisfied(nth_position_matches(
                clause,
                candidates,
                element,
                kind == PseudoClass::NthLastOfType,
            ))
        }

        // [§ 8.2](https://www.w3.org/TR/selectors-4/#the-target-pseudo)
        // "The :target pseudo-class matches the document's target elements."
        PseudoClass::Target => {
            let fragment = element.document_location_fragment();
            satisfied(!fragment.is_empty() && element.is_connected() && element.id() == fragment)
        }

        // [§ 4.2](https://www.w3.org/TR/selectors-4/#matches)
        // Every alternative is tested; a later match replaces the weight of an
        // earlier one instead of taking the highest.
        PseudoClass::Is => {
            let mut weight = None;
            for alternative in clause.selectors.iter().flatten() {
                if let Some(matched) = matches(alternative, element)? {
                    weight = Some(matched.priority_weight);
                }
            }
            weight
        }

        // [§ 4.4](https://www.w3.org/TR/selectors-4/#zero-matches)
        // "The specificity of a :where() pseudo-class is replaced by zero."
        PseudoClass::Where => {
            let alternatives = clause.selectors.as_deref().unwrap_or_default();
            any_matches(alternatives, element)?.map(|_| 0)
        }
    };

    Ok(weight)
}

/// Blank argument text such as `:nth-child()` counts as missing.
fn has_argument(clause: &PseudoClause) -> bool {
    clause
        .arguments
        .as_deref()
        .is_some_and(|arguments| !arguments.trim().is_empty())
}

/// First alternative of `selectors` that matches `element`.
fn any_matches<E: Element>(selectors: &[CompoundSelector], element: &E) -> MatchResult {
    for selector in selectors {
        if let Some(matched) = matches(selector, element)? {
            return Ok(Some(matched));
        }
    }
    Ok(None)
}

/// Whether `element`'s 1-based index among `candidates` satisfies the clause's
/// `An+B`. Counting starts from the end when `from_end` is set.
fn nth_position_matches<E: Element>(
    clause: &PseudoClause,
    mut candidates: Vec<E>,
    element: &E,
    from_end: bool,
) -> bool {
    let Some(formula) = clause.nth else {
        return false;
    };
    if from_end {
        candidates.reverse();
    }
    candidates
        .iter()
        .position(|candidate| candidate == element)
        .is_some_and(|position| formula.matches(position + 1))
}

fn same_type<E: Element>(a: &E, b: &E) -> bool {
    a.tag_name().eq_ignore_ascii_case(b.tag_name())
}
