//! [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
//!
//! Chaining compound selectors across combinators, and collecting matches
//! from a document.
//!
//! A complex selector is a slice of compounds written left to right; each
//! compound's [`combinator`](CompoundSelector::combinator) says how it relates
//! to the compound before it. Matching starts from the rightmost compound (the
//! subject) and walks outward, backtracking when a descendant or subsequent
//! sibling candidate leads to a dead end.

use koala_dom::{DomTree, NodeId};

use crate::dom::DomElement;
use crate::element::Element;
use crate::error::SelectorError;
use crate::matching::{Match, MatchResult, matches};
use crate::selector::{Combinator, CompoundSelector};

/// Match a complex selector against `element`, which must be its subject.
///
/// The weight is the sum over every compound in the chain. An empty chain
/// never matches.
///
/// # Errors
///
/// Propagates [`SelectorError::InvalidSelector`] from any compound that is
/// evaluated.
pub fn matches_chain<E: Element>(chain: &[CompoundSelector], element: &E) -> MatchResult {
    let Some((subject, rest)) = chain.split_last() else {
        return Ok(None);
    };
    match_candidate(subject, rest, element)
}

/// Match a selector list (`a, b c, d > e`) against `element`.
///
/// Reports the highest weight among the complex selectors that match.
///
/// # Errors
///
/// Propagates [`SelectorError::InvalidSelector`] from any compound that is
/// evaluated.
pub fn matches_any<E: Element>(groups: &[Vec<CompoundSelector>], element: &E) -> MatchResult {
    let mut best: Option<Match> = None;
    for group in groups {
        if let Some(matched) = matches_chain(group, element)? {
            best = best.max(Some(matched));
        }
    }
    Ok(best)
}

/// [DOM § 4.2.6 `querySelectorAll()`](https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall)
///
/// Every element of `tree` matching `groups`, in tree order, with its weight.
///
/// # Errors
///
/// Returns the first [`SelectorError`] raised while matching; the partial
/// result is discarded.
pub fn query_selector_all(
    tree: &DomTree,
    groups: &[Vec<CompoundSelector>],
) -> Result<Vec<(NodeId, Match)>, SelectorError> {
    let mut found = Vec::new();
    for node_id in tree.descendants(tree.root()) {
        let Some(element) = DomElement::new(tree, node_id) else {
            continue;
        };
        if let Some(matched) = matches_any(groups, &element)? {
            found.push((element.node_id(), matched));
        }
    }
    Ok(found)
}

/// [DOM § 4.2.6 `querySelector()`](https://dom.spec.whatwg.org/#dom-parentnode-queryselector)
///
/// The first element of `tree`, in tree order, matching `groups`.
///
/// # Errors
///
/// Returns the first [`SelectorError`] raised while matching.
pub fn query_selector(
    tree: &DomTree,
    groups: &[Vec<CompoundSelector>],
) -> Result<Option<(NodeId, Match)>, SelectorError> {
    for node_id in tree.descendants(tree.root()) {
        let Some(element) = DomElement::new(tree, node_id) else {
            continue;
        };
        if let Some(matched) = matches_any(groups, &element)? {
            return Ok(Some((element.node_id(), matched)));
        }
    }
    Ok(None)
}

/// Match `compound` against `candidate`, then the remaining compounds to its
/// left against the elements its combinator reaches.
fn match_candidate<E: Element>(
    compound: &CompoundSelector,
    rest: &[CompoundSelector],
    candidate: &E,
) -> MatchResult {
    let Some(own) = matches(compound, candidate)? else {
        return Ok(None);
    };
    let Some((next, remaining)) = rest.split_last() else {
        return Ok(Some(own));
    };

    let reached = match compound.combinator {
        // "an element B that is a direct child of element A"
        Combinator::Child => match candidate.parent_element() {
            Some(parent) => match_candidate(next, remaining, &parent)?,
            None => None,
        },

        // "an element B that is an arbitrary descendant of some ancestor element A"
        Combinator::Descendant => {
            let mut found = None;
            let mut ancestor = candidate.parent_element();
            while let Some(current) = ancestor {
                found = match_candidate(next, remaining, &current)?;
                if found.is_some() {
                    break;
                }
                ancestor = current.parent_element();
            }
            found
        }

        // "an element B that immediately follows element A"
        Combinator::NextSibling => match preceding_siblings(candidate).into_iter().next() {
            Some(previous) => match_candidate(next, remaining, &previous)?,
            None => None,
        },

        // "an element B that follows element A (not necessarily immediately)"
        Combinator::SubsequentSibling => {
            let mut found = None;
            for sibling in preceding_siblings(candidate) {
                found = match_candidate(next, remaining, &sibling)?;
                if found.is_some() {
                    break;
                }
            }
            found
        }
    };

    Ok(reached.map(|left| Match {
        priority_weight: own.priority_weight + left.priority_weight,
    }))
}

/// Element siblings before `element`, nearest first.
fn preceding_siblings<E: Element>(element: &E) -> Vec<E> {
    let Some(parent) = element.parent() else {
        return Vec::new();
    };
    let mut siblings = parent.children();
    let position = siblings
        .iter()
        .position(|sibling| sibling == element)
        .unwrap_or(0);
    siblings.truncate(position);
    siblings.reverse();
    siblings
}
