//! Errors raised while matching selectors.

/// [§ 3.1 Invalid selectors](https://www.w3.org/TR/selectors-4/#invalid)
///
/// Everything that merely fails to match is reported as `Ok(None)`; this type
/// is reserved for selectors that could never have been valid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// A functional pseudo-class (`:not()`, `:nth-child()`, ...) was built
    /// without its argument.
    #[error("'{selector}' is not a valid selector")]
    InvalidSelector {
        /// Canonical text of the offending compound selector.
        selector: String,
    },
}
