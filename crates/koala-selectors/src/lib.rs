//! Compound selector matching for the Koala DOM.
//!
//! # Scope
//!
//! This crate implements:
//! - **Compound selector descriptors** ([§ 4.2](https://www.w3.org/TR/selectors-4/#compound))
//!   - Type, universal, ID, class and attribute selectors
//!   - Pseudo-classes resolved to a closed enum when the descriptor is built
//!   - Pseudo-elements, which never match real elements
//!
//! - **Matching** ([§ 4.1](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element))
//!   - Structural pseudo-classes (`:first-child`, `:only-of-type`, `:empty`, `:root`, ...)
//!   - `:nth-child()`, `:nth-last-child()` (with `of S`), `:nth-of-type()`, `:nth-last-of-type()`
//!   - `:not()`, `:is()`, `:where()`, `:checked`, `:target`
//!   - Priority weights for cascade ordering
//!
//! - **Combinators** ([§ 16](https://www.w3.org/TR/selectors-4/#combinators))
//!   - Descendant, child, next-sibling and subsequent-sibling chaining
//!   - `querySelector` / `querySelectorAll` over a [`koala_dom::DomTree`]
//!
//! # Not Implemented
//!
//! - Parsing selector text; descriptors are built through the builder API
//!   or deserialized with serde
//! - `:has()`, user-action and input pseudo-classes other than `:checked`
//! - Namespaces

/// [`Element`] implementation over the arena DOM.
pub mod dom;
/// The element capability trait the matcher reads through.
pub mod element;
/// Selector errors.
pub mod error;
/// Compound selector matching and priority weights.
pub mod matching;
/// The `An+B` index formula.
pub mod nth;
/// Combinator chaining and document queries.
pub mod query;
/// Compound selector descriptors.
pub mod selector;

pub use dom::DomElement;
pub use element::Element;
pub use error::SelectorError;
pub use matching::{Match, MatchResult, matches};
pub use nth::{NthFormula, ParseNthError};
pub use query::{matches_any, matches_chain, query_selector, query_selector_all};
pub use selector::{
    AttributeOperator, AttributeSelector, Combinator, CompoundSelector, PseudoClass, PseudoClause,
};
